//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod confirm_questions;
pub mod generate_questions;
pub mod manage_questions;
pub(crate) mod shared;

#[cfg(test)]
mod test_support;

pub use shared::UserLocks;
