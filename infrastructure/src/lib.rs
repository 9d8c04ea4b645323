//! Infrastructure layer for examforge
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod chat;
pub mod config;
pub mod store;

// Re-export commonly used types
pub use chat::{
    ChatCompletionGateway, ChatSettings, HttpResponse, HttpTransport, ReqwestTransport,
    RetryPolicy, Sleeper, TokioSleeper, TransportFailure,
};
pub use config::{ConfigError, ConfigLoader, ConfigValidationError, FileConfig};
pub use store::SqliteQuestionStore;
