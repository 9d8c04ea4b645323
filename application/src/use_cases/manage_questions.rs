//! Manage Questions use case
//!
//! Owner-scoped access to confirmed questions: list, get, update and
//! soft delete. Provisional questions are only reachable through
//! confirmation.

use crate::ports::question_store::{QuestionStore, StoreError};
use chrono::Utc;
use examforge_domain::{
    DomainError, ErrorKind, Question, QuestionFilter, QuestionId, QuestionKind, QuestionOptions,
    QuestionUpdate, UserId,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while managing questions
#[derive(Error, Debug)]
pub enum ManageQuestionsError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),

    #[error("Question {0} not found")]
    NotFound(QuestionId),

    #[error("No permission to modify question {0}")]
    PermissionDenied(QuestionId),

    #[error("Storage failure: {0}")]
    Store(StoreError),
}

impl ManageQuestionsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ManageQuestionsError::InvalidInput(e) => e.kind(),
            ManageQuestionsError::NotFound(_) => ErrorKind::NotFound,
            ManageQuestionsError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            ManageQuestionsError::Store(_) => ErrorKind::StoreError,
        }
    }
}

impl From<StoreError> for ManageQuestionsError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ManageQuestionsError::NotFound(id),
            other => ManageQuestionsError::Store(other),
        }
    }
}

/// Raw replacement content for a question
#[derive(Debug, Clone)]
pub struct UpdateQuestionInput {
    pub title: String,
    /// `"single"` or `"multiple"`
    pub kind: String,
    pub options: Vec<String>,
    pub answer: String,
    pub explanation: String,
    pub keywords: String,
    pub language: String,
    pub ai_model: String,
}

impl UpdateQuestionInput {
    fn into_update(self) -> Result<QuestionUpdate, DomainError> {
        let kind: QuestionKind = self.kind.parse()?;
        Ok(QuestionUpdate {
            title: self.title,
            kind,
            options: QuestionOptions::new(self.options),
            answer: self.answer,
            explanation: self.explanation,
            keywords: self.keywords,
            language: self.language,
            ai_model: self.ai_model,
        })
    }
}

/// Use case for owner-scoped question management
pub struct ManageQuestionsUseCase<S: QuestionStore + 'static> {
    store: Arc<S>,
}

impl<S: QuestionStore + 'static> ManageQuestionsUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Confirmed questions of `user_id` matching `filter`, newest first
    pub async fn list(
        &self,
        user_id: UserId,
        filter: &QuestionFilter,
    ) -> Result<Vec<Question>, ManageQuestionsError> {
        let questions = self.store.list_by_user(user_id, filter).await?;
        debug!("Listed {} question(s) for user {}", questions.len(), user_id);
        Ok(questions)
    }

    pub async fn get(
        &self,
        user_id: UserId,
        id: QuestionId,
    ) -> Result<Question, ManageQuestionsError> {
        self.owned(user_id, id).await
    }

    /// Replace the content of a confirmed question.
    ///
    /// The option count is not checked; only generated questions are
    /// held to four options.
    pub async fn update(
        &self,
        user_id: UserId,
        id: QuestionId,
        input: UpdateQuestionInput,
    ) -> Result<Question, ManageQuestionsError> {
        let update = input.into_update()?;
        let mut question = self.owned(user_id, id).await?;

        update.apply_to(&mut question, Utc::now());
        self.store.update(&question).await?;

        info!("User {} updated question {}", user_id, id);
        Ok(question)
    }

    /// Soft delete a confirmed question
    pub async fn delete(&self, user_id: UserId, id: QuestionId) -> Result<(), ManageQuestionsError> {
        self.owned(user_id, id).await?;
        self.store.soft_delete(id).await?;

        info!("User {} deleted question {}", user_id, id);
        Ok(())
    }

    async fn owned(&self, user_id: UserId, id: QuestionId) -> Result<Question, ManageQuestionsError> {
        let question = self.store.find_by_id(id, false).await?;
        if !question.is_owned_by(user_id) {
            warn!(
                "User {} denied access to question {} owned by {}",
                user_id, id, question.user_id
            );
            return Err(ManageQuestionsError::PermissionDenied(id));
        }
        Ok(question)
    }
}
