//! Completion Gateway port
//!
//! Defines the interface for obtaining raw completion text from an AI provider.

use crate::config::ModelProfile;
use async_trait::async_trait;
use examforge_domain::ErrorKind;
use thiserror::Error;

/// Errors that can occur during completion gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Provider error (status {status})")]
    Provider { status: u16, body: String },

    #[error("Max retries exceeded after {attempts} attempts: {last}")]
    MaxRetriesExceeded {
        attempts: u32,
        last: Box<GatewayError>,
    },

    #[error("Invalid response envelope: {0}")]
    InvalidResponse(String),

    #[error("Provider returned no completion choices")]
    EmptyResult,
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::UnknownModel(_) => ErrorKind::UnknownModel,
            GatewayError::Transport(_) => ErrorKind::TransportError,
            GatewayError::Provider { .. } | GatewayError::MaxRetriesExceeded { .. } => {
                ErrorKind::ProviderError
            }
            GatewayError::InvalidResponse(_) => ErrorKind::ParseError,
            GatewayError::EmptyResult => ErrorKind::EmptyResult,
        }
    }

    /// HTTP status carried by a provider failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Provider { status, .. } => Some(*status),
            GatewayError::MaxRetriesExceeded { last, .. } => last.status(),
            _ => None,
        }
    }
}

/// Gateway for AI text completion
///
/// This port defines how the application layer obtains completions.
/// Implementations (adapters) live in the infrastructure layer and own
/// retries, timeouts, and envelope decoding.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Send `prompt` as a single user message and return the first choice's text
    async fn complete(&self, profile: &ModelProfile, prompt: &str) -> Result<String, GatewayError>;
}
