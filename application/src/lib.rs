//! Application layer for examforge
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ModelProfile, ModelProfiles};
pub use ports::{
    completion_gateway::{CompletionGateway, GatewayError},
    progress::{GenerationProgress, GenerationStage, NoProgress},
    question_store::{QuestionStore, StoreError},
};
pub use use_cases::UserLocks;
pub use use_cases::confirm_questions::{
    ConfirmQuestionsError, ConfirmQuestionsInput, ConfirmQuestionsOutput, ConfirmQuestionsUseCase,
};
pub use use_cases::generate_questions::{
    GenerateQuestionsError, GenerateQuestionsInput, GenerateQuestionsUseCase,
};
pub use use_cases::manage_questions::{
    ManageQuestionsError, ManageQuestionsUseCase, UpdateQuestionInput,
};
