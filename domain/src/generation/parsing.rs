//! Question parsing from completion text.
//!
//! Providers are asked for a `{"questions": [...]}` object (see
//! [`crate::prompt::QuestionPromptTemplate`]) but routinely wrap it in a
//! markdown fence, return fewer options than requested, or put the option
//! text where the label belongs. Each item is validated on its own:
//!
//! 1. Items without exactly 4 options are skipped.
//! 2. An answer that is not a literal label `A`..`D` is repaired by
//!    matching it against the option texts (first exact match wins);
//!    items that still have no label are skipped.
//!
//! The whole call fails only when the payload does not decode or when no
//! item survives.

use crate::core::error::ErrorKind;
use crate::core::string::truncate;
use crate::question::entities::DraftQuestion;
use crate::question::kind::QuestionKind;
use crate::question::options::{AnswerLabel, GENERATED_OPTION_COUNT, QuestionOptions};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that fail a whole parse call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed question payload: {0}")]
    Malformed(String),

    #[error("no valid questions in provider output")]
    NoValidQuestions,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Malformed(_) => ErrorKind::ParseError,
            ParseError::NoValidQuestions => ErrorKind::EmptyResult,
        }
    }
}

/// Why a single item was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    WrongOptionCount(usize),
    UnresolvableAnswer(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::WrongOptionCount(n) => {
                write!(f, "expected {} options, got {}", GENERATED_OPTION_COUNT, n)
            }
            SkipReason::UnresolvableAnswer(answer) => {
                write!(f, "answer '{}' matches no label or option", answer)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeneratedPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) questions: Vec<GeneratedItem>,
}

// `null` fields decode as empty so the per-item checks decide what to skip.
#[derive(Debug, Deserialize)]
pub(crate) struct GeneratedItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) title: String,
    #[serde(default, deserialize_with = "options_with_nulls")]
    pub(crate) options: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) answer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) explanation: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn options_with_nulls<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let options: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
    Ok(options
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// Remove surrounding whitespace and a ```` ```json ```` / ```` ``` ```` fence
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

/// Parse completion text into validated draft questions.
pub fn parse_generated_questions(raw: &str) -> Result<Vec<DraftQuestion>, ParseError> {
    let content = strip_code_fence(raw);

    let payload: GeneratedPayload = serde_json::from_str(content).map_err(|e| {
        warn!(
            "Failed to decode question payload: {} (content: {})",
            e,
            truncate(content, 200)
        );
        ParseError::Malformed(e.to_string())
    })?;

    let total = payload.questions.len();
    let mut questions = Vec::with_capacity(total);

    for item in payload.questions {
        match validate_item(item) {
            Ok(question) => questions.push(question),
            Err((title, reason)) => {
                warn!("Skipping question '{}': {}", truncate(&title, 60), reason);
            }
        }
    }

    debug!("Parsed {}/{} questions", questions.len(), total);

    if questions.is_empty() {
        return Err(ParseError::NoValidQuestions);
    }

    Ok(questions)
}

fn validate_item(item: GeneratedItem) -> Result<DraftQuestion, (String, SkipReason)> {
    if item.options.len() != GENERATED_OPTION_COUNT {
        let count = item.options.len();
        return Err((item.title, SkipReason::WrongOptionCount(count)));
    }

    let options = QuestionOptions::new(item.options);

    let label = match item.answer.parse::<AnswerLabel>() {
        Ok(label) => label,
        Err(_) => match options.label_of(&item.answer) {
            Some(label) => {
                debug!(
                    "Repaired answer '{}' to label {}",
                    truncate(&item.answer, 40),
                    label
                );
                label
            }
            None => return Err((item.title, SkipReason::UnresolvableAnswer(item.answer))),
        },
    };

    Ok(DraftQuestion {
        title: item.title,
        // Output is always tagged single-answer, even when a multiple-answer
        // prompt was sent: one label per item is all this format carries.
        kind: QuestionKind::Single,
        options: options.to_storage(),
        answer: label.as_str().to_string(),
        explanation: item.explanation,
    })
}
