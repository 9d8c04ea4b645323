//! Generation request value object

use super::kind::QuestionKind;
use crate::core::error::DomainError;
use crate::core::model::AiModel;

/// Upper bound on questions per generation call
pub const MAX_QUESTIONS_PER_REQUEST: u32 = 50;

/// Validated parameters for one generation call (transient, never persisted)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model: AiModel,
    pub language: String,
    pub kind: QuestionKind,
    pub keywords: String,
    pub count: u32,
}

impl GenerationRequest {
    /// Validate raw caller parameters.
    ///
    /// The model selector is not checked here; unknown selectors are
    /// rejected when credentials are resolved.
    pub fn new(
        model: AiModel,
        language: impl Into<String>,
        kind: &str,
        keywords: impl Into<String>,
        count: u32,
    ) -> Result<Self, DomainError> {
        let kind: QuestionKind = kind.parse()?;

        let language = language.into();
        if language.trim().is_empty() {
            return Err(DomainError::InvalidRequest(
                "language cannot be empty".to_string(),
            ));
        }

        if count == 0 || count > MAX_QUESTIONS_PER_REQUEST {
            return Err(DomainError::InvalidRequest(format!(
                "question count must be between 1 and {}, got {}",
                MAX_QUESTIONS_PER_REQUEST, count
            )));
        }

        Ok(Self {
            model,
            language,
            kind,
            keywords: keywords.into(),
            count,
        })
    }
}
