//! Chat-completion adapter
//!
//! Implements CompletionGateway for OpenAI-compatible endpoints
//! (DeepSeek, Tongyi compatible mode) over HTTP with retry and backoff.

pub mod gateway;
pub mod protocol;
pub mod retry;
pub mod transport;

pub use gateway::{ChatCompletionGateway, ChatSettings};
pub use retry::{RETRYABLE_STATUSES, RetryPolicy, Sleeper, TokioSleeper};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport, TransportFailure};
