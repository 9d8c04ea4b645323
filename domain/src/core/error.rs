//! Domain error types and the shared error classification

use thiserror::Error;

/// Classification shared by every error in the workspace.
///
/// Callers (the CLI, or any request layer put in front of the use cases)
/// map these kinds to their own failure responses. The core only promises
/// that every failure carries a correct kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad question kind, malformed request
    InvalidInput,
    /// Unrecognized or unconfigured AI model selector
    UnknownModel,
    /// Network or timeout talking to the provider
    TransportError,
    /// Non-retryable provider failure, or retries exhausted
    ProviderError,
    /// Malformed provider payload
    ParseError,
    /// Zero usable completions or zero valid questions
    EmptyResult,
    /// Persistence failure
    StoreError,
    /// Question does not belong to the caller
    PermissionDenied,
    /// Question does not exist (or is not visible on this path)
    NotFound,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::UnknownModel => "unknown_model",
            ErrorKind::TransportError => "transport_error",
            ErrorKind::ProviderError => "provider_error",
            ErrorKind::ParseError => "parse_error",
            ErrorKind::EmptyResult => "empty_result",
            ErrorKind::StoreError => "store_error",
            ErrorKind::PermissionDenied => "permission_denied",
            ErrorKind::NotFound => "not_found",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Domain-level validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid question type: {0}")]
    InvalidQuestionType(String),

    #[error("invalid answer label: {0}")]
    InvalidAnswer(String),

    #[error("invalid generation request: {0}")]
    InvalidRequest(String),

    #[error("malformed options payload: {0}")]
    MalformedOptions(String),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::InvalidQuestionType(_)
            | DomainError::InvalidAnswer(_)
            | DomainError::InvalidRequest(_) => ErrorKind::InvalidInput,
            DomainError::MalformedOptions(_) => ErrorKind::ParseError,
        }
    }
}
