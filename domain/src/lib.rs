//! Domain layer for examforge
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Provisional questions
//!
//! Generated questions are persisted immediately but stay **provisional**
//! until their owner confirms a selection. Confirmation promotes the
//! selected ones and permanently erases the rest.
//!
//! ## Defensive parsing
//!
//! Completion text is untrusted. [`generation::parsing`] repairs what it
//! can and drops what it cannot, failing only when nothing usable remains.

pub mod core;
pub mod generation;
pub mod prompt;
pub mod question;

// Re-export commonly used types
pub use core::{
    error::{DomainError, ErrorKind},
    model::AiModel,
};
pub use generation::{ParseError, SelectionPartition, parse_generated_questions};
pub use prompt::QuestionPromptTemplate;
pub use question::{
    entities::{
        DraftQuestion, NewQuestion, Question, QuestionFilter, QuestionId, QuestionUpdate, UserId,
    },
    kind::QuestionKind,
    options::{AnswerLabel, GENERATED_OPTION_COUNT, QuestionOptions},
    request::{GenerationRequest, MAX_QUESTIONS_PER_REQUEST},
};
