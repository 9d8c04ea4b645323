//! Option list and answer label value objects
//!
//! Options are stored as a JSON array string. [`QuestionOptions`] is the
//! decoded form; [`QuestionOptions::to_storage`] and
//! [`QuestionOptions::from_storage`] convert between the two.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Number of options every AI-generated question must carry
pub const GENERATED_OPTION_COUNT: usize = 4;

/// Option position label ("A".."D")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnswerLabel {
    A,
    B,
    C,
    D,
}

impl AnswerLabel {
    pub const ALL: [AnswerLabel; 4] = [AnswerLabel::A, AnswerLabel::B, AnswerLabel::C, AnswerLabel::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerLabel::A => "A",
            AnswerLabel::B => "B",
            AnswerLabel::C => "C",
            AnswerLabel::D => "D",
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl std::fmt::Display for AnswerLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AnswerLabel {
    type Err = DomainError;

    /// Accepts only the literal labels; no trimming, no lowercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(AnswerLabel::A),
            "B" => Ok(AnswerLabel::B),
            "C" => Ok(AnswerLabel::C),
            "D" => Ok(AnswerLabel::D),
            other => Err(DomainError::InvalidAnswer(other.to_string())),
        }
    }
}

/// Ordered option texts of a question
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionOptions(Vec<String>);

impl QuestionOptions {
    pub fn new(options: Vec<String>) -> Self {
        Self(options)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Label of the first option whose text equals `text` exactly.
    ///
    /// Only the first four positions are labelled.
    pub fn label_of(&self, text: &str) -> Option<AnswerLabel> {
        self.0
            .iter()
            .position(|option| option == text)
            .and_then(AnswerLabel::from_index)
    }

    /// Encode as the JSON array string used in storage
    pub fn to_storage(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }

    /// Decode the JSON array string used in storage
    pub fn from_storage(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str::<Vec<String>>(raw)
            .map(Self)
            .map_err(|e| DomainError::MalformedOptions(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(items: &[&str]) -> QuestionOptions {
        QuestionOptions::new(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_label_parsing_is_literal() {
        assert_eq!("C".parse::<AnswerLabel>(), Ok(AnswerLabel::C));
        assert!("c".parse::<AnswerLabel>().is_err());
        assert!(" A".parse::<AnswerLabel>().is_err());
        assert!("E".parse::<AnswerLabel>().is_err());
    }

    #[test]
    fn test_label_index_mapping() {
        assert_eq!(AnswerLabel::from_index(2), Some(AnswerLabel::C));
        assert_eq!(AnswerLabel::from_index(4), None);
    }

    #[test]
    fn test_label_of_first_match_wins() {
        let opts = options(&["x", "dup", "dup", "y"]);
        assert_eq!(opts.label_of("dup"), Some(AnswerLabel::B));
        assert_eq!(opts.label_of("missing"), None);
    }

    #[test]
    fn test_label_of_ignores_unlabelled_positions() {
        let opts = options(&["a", "b", "c", "d", "e"]);
        assert_eq!(opts.label_of("e"), None);
    }

    #[test]
    fn test_storage_roundtrip_preserves_unicode_and_quotes() {
        let opts = options(&["make([]int, 0)", "\"quoted\"", "切片", "nil"]);
        let stored = opts.to_storage();
        assert_eq!(QuestionOptions::from_storage(&stored).unwrap(), opts);
    }

    #[test]
    fn test_from_storage_rejects_garbage() {
        let err = QuestionOptions::from_storage("not json").unwrap_err();
        assert!(matches!(err, DomainError::MalformedOptions(_)));
    }
}
