//! Core domain concepts shared across all subdomains.
//!
//! - [`model::AiModel`]: AI provider selector (DeepSeek, Tongyi, unknown)
//! - [`error::DomainError`]: domain-level validation errors
//! - [`error::ErrorKind`]: classification every layer maps its errors onto

pub mod error;
pub mod model;
pub mod string;
