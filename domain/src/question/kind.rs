//! Question kind value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Single-answer or multiple-answer question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    #[default]
    Single,
    Multiple,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Single => "single",
            QuestionKind::Multiple => "multiple",
        }
    }

    /// Wording used inside generation prompts
    pub fn prompt_description(&self) -> &'static str {
        match self {
            QuestionKind::Single => "单选题",
            QuestionKind::Multiple => "多选题",
        }
    }
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for QuestionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(QuestionKind::Single),
            "multiple" => Ok(QuestionKind::Multiple),
            other => Err(DomainError::InvalidQuestionType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kinds() {
        assert_eq!("single".parse::<QuestionKind>(), Ok(QuestionKind::Single));
        assert_eq!(
            "multiple".parse::<QuestionKind>(),
            Ok(QuestionKind::Multiple)
        );
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!(matches!(
            "Single".parse::<QuestionKind>(),
            Err(DomainError::InvalidQuestionType(_))
        ));
        assert!("".parse::<QuestionKind>().is_err());
    }

    #[test]
    fn test_prompt_description() {
        assert_eq!(QuestionKind::Single.prompt_description(), "单选题");
        assert_eq!(QuestionKind::Multiple.prompt_description(), "多选题");
    }
}
