//! Question domain
//!
//! Entities and value objects describing exam questions and the
//! parameters used to generate them.

pub mod entities;
pub mod kind;
pub mod options;
pub mod request;
