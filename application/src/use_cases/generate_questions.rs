//! Generate Questions use case
//!
//! Orchestrates one generation call:
//!
//! 1. Validate the request (question kind, language, count)
//! 2. Resolve the model selector to a configured [`ModelProfile`]
//! 3. Build the prompt, call the gateway, parse the completion
//! 4. Stamp each question with its owner and persist the batch as provisional
//!
//! Any failure aborts the whole call; nothing is persisted unless every
//! earlier stage succeeded, and the batch insert itself is atomic.

use crate::config::{ModelProfile, ModelProfiles};
use crate::ports::completion_gateway::{CompletionGateway, GatewayError};
use crate::ports::progress::{GenerationProgress, GenerationStage, NoProgress};
use crate::ports::question_store::{QuestionStore, StoreError};
use crate::use_cases::shared::{UserLocks, lock_user};
use chrono::Utc;
use examforge_domain::{
    AiModel, DomainError, ErrorKind, GenerationRequest, ParseError, Question,
    QuestionPromptTemplate, UserId, parse_generated_questions,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during question generation
#[derive(Error, Debug)]
pub enum GenerateQuestionsError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] DomainError),

    #[error("Unknown or unconfigured model: {0}")]
    UnknownModel(String),

    #[error("Completion failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Could not parse completion: {0}")]
    Parse(#[from] ParseError),

    #[error("Failed to save questions: {0}")]
    Store(#[from] StoreError),
}

impl GenerateQuestionsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerateQuestionsError::InvalidRequest(e) => e.kind(),
            GenerateQuestionsError::UnknownModel(_) => ErrorKind::UnknownModel,
            GenerateQuestionsError::Gateway(e) => e.kind(),
            GenerateQuestionsError::Parse(e) => e.kind(),
            GenerateQuestionsError::Store(_) => ErrorKind::StoreError,
        }
    }
}

/// Input for the GenerateQuestions use case (raw caller parameters)
#[derive(Debug, Clone)]
pub struct GenerateQuestionsInput {
    pub user_id: UserId,
    /// Model selector, e.g. `"deepseek"`
    pub model: String,
    pub language: String,
    /// `"single"` or `"multiple"`
    pub kind: String,
    pub keywords: String,
    pub count: u32,
}

impl GenerateQuestionsInput {
    pub fn new(
        user_id: UserId,
        model: impl Into<String>,
        language: impl Into<String>,
        kind: impl Into<String>,
        keywords: impl Into<String>,
        count: u32,
    ) -> Self {
        Self {
            user_id,
            model: model.into(),
            language: language.into(),
            kind: kind.into(),
            keywords: keywords.into(),
            count,
        }
    }
}

/// Use case for generating provisional questions
pub struct GenerateQuestionsUseCase<G: CompletionGateway + 'static, S: QuestionStore + 'static> {
    gateway: Arc<G>,
    store: Arc<S>,
    profiles: ModelProfiles,
    locks: Option<Arc<UserLocks>>,
}

impl<G: CompletionGateway + 'static, S: QuestionStore + 'static> GenerateQuestionsUseCase<G, S> {
    pub fn new(gateway: Arc<G>, store: Arc<S>, profiles: ModelProfiles) -> Self {
        Self {
            gateway,
            store,
            profiles,
            locks: None,
        }
    }

    /// Serialize the persist step against confirmation for the same user
    pub fn with_user_locks(mut self, locks: Arc<UserLocks>) -> Self {
        self.locks = Some(locks);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: GenerateQuestionsInput,
    ) -> Result<Vec<Question>, GenerateQuestionsError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: GenerateQuestionsInput,
        progress: &dyn GenerationProgress,
    ) -> Result<Vec<Question>, GenerateQuestionsError> {
        let model: AiModel = input.model.parse().unwrap_or_else(|never| match never {});
        let request = GenerationRequest::new(
            model,
            input.language,
            &input.kind,
            input.keywords,
            input.count,
        )?;
        let profile = self.resolve_profile(&request.model)?;

        info!(
            "Generating {} {} question(s) for user {} with {} (language: {})",
            request.count, request.kind, input.user_id, request.model, request.language
        );

        progress.on_stage_start(GenerationStage::Prompt);
        let prompt = QuestionPromptTemplate::generation_prompt(
            request.kind,
            &request.language,
            &request.keywords,
            request.count,
        );
        progress.on_stage_complete(GenerationStage::Prompt, true);

        progress.on_stage_start(GenerationStage::Request);
        let completion = self.gateway.complete(profile, &prompt).await;
        progress.on_stage_complete(GenerationStage::Request, completion.is_ok());
        let completion = completion?;

        progress.on_stage_start(GenerationStage::Parse);
        let drafts = parse_generated_questions(&completion);
        progress.on_stage_complete(GenerationStage::Parse, drafts.is_ok());
        let drafts = drafts?;

        if drafts.len() != request.count as usize {
            warn!(
                "Requested {} questions, provider yielded {} valid",
                request.count,
                drafts.len()
            );
        }

        let now = Utc::now();
        let batch = drafts
            .into_iter()
            .map(|draft| {
                draft.stamp(
                    input.user_id,
                    &request.model,
                    &request.language,
                    &request.keywords,
                    now,
                )
            })
            .collect();

        progress.on_stage_start(GenerationStage::Persist);
        let saved = {
            let _guard = lock_user(&self.locks, input.user_id).await;
            self.store.create_batch(batch).await
        };
        progress.on_stage_complete(GenerationStage::Persist, saved.is_ok());
        let saved = saved?;

        debug!(
            "Saved provisional questions {:?}",
            saved.iter().map(|q| q.id.0).collect::<Vec<_>>()
        );
        progress.on_generated(saved.len());

        Ok(saved)
    }

    fn resolve_profile(&self, model: &AiModel) -> Result<&ModelProfile, GenerateQuestionsError> {
        self.profiles.resolve(model).ok_or_else(|| {
            warn!("No usable credentials for model selector '{}'", model);
            GenerateQuestionsError::UnknownModel(model.to_string())
        })
    }
}
