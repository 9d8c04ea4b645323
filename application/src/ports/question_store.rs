//! Question Store port
//!
//! Persistence contract for questions in both lifecycle states.
//!
//! Visibility rules every adapter must follow:
//!
//! - Soft-deleted questions are invisible to every read.
//! - Provisional questions are only visible through
//!   [`QuestionStore::find_provisional_by_user`] and through
//!   [`QuestionStore::find_by_id`] with `include_provisional = true`.
//! - `create_batch`, `promote`, and `erase_hard` are all-or-nothing.

use async_trait::async_trait;
use examforge_domain::{ErrorKind, NewQuestion, Question, QuestionFilter, QuestionId, UserId};
use thiserror::Error;

/// Errors that can occur in the question store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Question {0} not found")]
    NotFound(QuestionId),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Corrupt question row: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotFound(_) => ErrorKind::NotFound,
            StoreError::Backend(_) | StoreError::Corrupt(_) => ErrorKind::StoreError,
        }
    }
}

/// Port for question persistence
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Insert all questions atomically, returning them with identifiers assigned
    async fn create_batch(&self, questions: Vec<NewQuestion>) -> Result<Vec<Question>, StoreError>;

    /// Fetch one question
    async fn find_by_id(
        &self,
        id: QuestionId,
        include_provisional: bool,
    ) -> Result<Question, StoreError>;

    /// All provisional questions owned by `user_id`
    async fn find_provisional_by_user(&self, user_id: UserId) -> Result<Vec<Question>, StoreError>;

    /// Confirmed questions owned by `user_id`, newest first
    async fn list_by_user(
        &self,
        user_id: UserId,
        filter: &QuestionFilter,
    ) -> Result<Vec<Question>, StoreError>;

    /// Clear the provisional marker; returns the number of rows promoted
    async fn promote(&self, ids: &[QuestionId]) -> Result<u64, StoreError>;

    /// Permanently remove provisional rows; returns the number erased
    async fn erase_hard(&self, ids: &[QuestionId]) -> Result<u64, StoreError>;

    /// Overwrite a confirmed question's content
    async fn update(&self, question: &Question) -> Result<(), StoreError>;

    /// Mark a confirmed question deleted
    async fn soft_delete(&self, id: QuestionId) -> Result<(), StoreError>;
}
