//! Question entities
//!
//! A question moves through three shapes:
//!
//! 1. [`DraftQuestion`]: parsed from AI output, not yet owned by anyone
//! 2. [`NewQuestion`]: stamped with owner and generation metadata, ready to insert
//! 3. [`Question`]: persisted, with an identifier assigned by the store
//!
//! A persisted question is **provisional** while `provisional_since` is set.
//! Confirmation clears the marker; discarding erases the row.

use super::kind::QuestionKind;
use super::options::QuestionOptions;
use crate::core::error::DomainError;
use crate::core::model::AiModel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned question identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub i64);

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owning user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated question extracted from AI output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftQuestion {
    pub title: String,
    pub kind: QuestionKind,
    /// Storage form (JSON array string)
    pub options: String,
    pub answer: String,
    pub explanation: String,
}

impl DraftQuestion {
    /// Attach ownership and generation metadata.
    ///
    /// The result is provisional as of `now`.
    pub fn stamp(
        self,
        user_id: UserId,
        model: &AiModel,
        language: &str,
        keywords: &str,
        now: DateTime<Utc>,
    ) -> NewQuestion {
        NewQuestion {
            title: self.title,
            kind: self.kind,
            options: self.options,
            answer: self.answer,
            explanation: self.explanation,
            keywords: keywords.to_string(),
            language: language.to_string(),
            ai_model: model.to_string(),
            user_id,
            provisional_since: Some(now),
        }
    }
}

/// A question ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub title: String,
    pub kind: QuestionKind,
    pub options: String,
    pub answer: String,
    pub explanation: String,
    pub keywords: String,
    pub language: String,
    pub ai_model: String,
    pub user_id: UserId,
    pub provisional_since: Option<DateTime<Utc>>,
}

/// A persisted exam question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    pub kind: QuestionKind,
    /// Storage form (JSON array string)
    pub options: String,
    pub answer: String,
    pub explanation: String,
    pub keywords: String,
    pub language: String,
    pub ai_model: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set while the question awaits confirmation
    pub provisional_since: Option<DateTime<Utc>>,
    /// Set once the owner soft-deletes a confirmed question
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Question {
    pub fn is_provisional(&self) -> bool {
        self.provisional_since.is_some()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Decode the stored option list
    pub fn decoded_options(&self) -> Result<QuestionOptions, DomainError> {
        QuestionOptions::from_storage(&self.options)
    }
}

/// Owner-supplied replacement content for a confirmed question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionUpdate {
    pub title: String,
    pub kind: QuestionKind,
    pub options: QuestionOptions,
    pub answer: String,
    pub explanation: String,
    pub keywords: String,
    pub language: String,
    pub ai_model: String,
}

impl QuestionUpdate {
    /// Apply onto an existing question; ownership and lifecycle fields are kept.
    pub fn apply_to(self, question: &mut Question, now: DateTime<Utc>) {
        question.title = self.title;
        question.kind = self.kind;
        question.options = self.options.to_storage();
        question.answer = self.answer;
        question.explanation = self.explanation;
        question.keywords = self.keywords;
        question.language = self.language;
        question.ai_model = self.ai_model;
        question.updated_at = now;
    }
}

/// Listing filter for confirmed questions; empty fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub language: Option<String>,
    pub kind: Option<QuestionKind>,
    /// Substring match on the title
    pub title_keyword: Option<String>,
}

impl QuestionFilter {
    pub fn matches(&self, question: &Question) -> bool {
        if let Some(language) = &self.language
            && &question.language != language
        {
            return false;
        }
        if let Some(kind) = self.kind
            && question.kind != kind
        {
            return false;
        }
        if let Some(keyword) = &self.title_keyword
            && !question.title.contains(keyword.as_str())
        {
            return false;
        }
        true
    }
}
