//! Chat-completion gateway implementation

use super::protocol::{ChatRequest, ChatResponse};
use super::retry::{RetryPolicy, Sleeper, TokioSleeper};
use super::transport::{HttpResponse, HttpTransport, ReqwestTransport};
use async_trait::async_trait;
use examforge_application::{CompletionGateway, GatewayError, ModelProfile};
use examforge_domain::core::string::truncate;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Payload and timeout settings shared by all providers
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
    /// Bound on each attempt, not the whole call
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

/// [`CompletionGateway`] for OpenAI-compatible chat-completion endpoints
pub struct ChatCompletionGateway {
    transport: Arc<dyn HttpTransport>,
    sleeper: Arc<dyn Sleeper>,
    settings: ChatSettings,
    policy: RetryPolicy,
}

impl ChatCompletionGateway {
    /// Create a gateway over a `reqwest` client
    pub fn new(settings: ChatSettings, policy: RetryPolicy) -> Result<Self, GatewayError> {
        let transport = ReqwestTransport::new(settings.timeout)
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        info!(
            "ChatCompletionGateway initialized (timeout {:?}, {} attempts)",
            settings.timeout,
            policy.max_attempts()
        );

        Ok(Self::with_transport(
            Arc::new(transport),
            Arc::new(TokioSleeper),
            settings,
            policy,
        ))
    }

    /// Create a gateway with an existing transport and sleeper (for testing)
    pub fn with_transport(
        transport: Arc<dyn HttpTransport>,
        sleeper: Arc<dyn Sleeper>,
        settings: ChatSettings,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            sleeper,
            settings,
            policy,
        }
    }

    fn decode(body: &str) -> Result<String, GatewayError> {
        let response: ChatResponse = serde_json::from_str(body).map_err(|e| {
            warn!("Undecodable completion envelope: {}", e);
            GatewayError::InvalidResponse(e.to_string())
        })?;
        response
            .into_first_content()
            .ok_or(GatewayError::EmptyResult)
    }

    fn provider_error(response: HttpResponse) -> GatewayError {
        GatewayError::Provider {
            status: response.status,
            body: response.body,
        }
    }
}

#[async_trait]
impl CompletionGateway for ChatCompletionGateway {
    async fn complete(&self, profile: &ModelProfile, prompt: &str) -> Result<String, GatewayError> {
        if !profile.is_configured() {
            return Err(GatewayError::UnknownModel(
                "profile has no endpoint or API key configured".to_string(),
            ));
        }

        let request = ChatRequest::user_prompt(
            &profile.model_name,
            prompt,
            self.settings.temperature,
            self.settings.max_tokens,
        );
        let body = serde_json::to_string(&request)
            .map_err(|e| GatewayError::Transport(format!("failed to encode request: {}", e)))?;

        let max_attempts = self.policy.max_attempts();
        let mut last_failure = None;

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                let delay = self.policy.delay_before(attempt - 1);
                debug!("Retrying in {:?} ({}/{})", delay, attempt, max_attempts);
                self.sleeper.sleep(delay).await;
            }

            match self
                .transport
                .post_json(&profile.endpoint, &profile.api_key, body.clone())
                .await
            {
                Ok(response) if response.is_success() => {
                    info!(
                        "Completion from {} succeeded (attempt {}/{}, status {})",
                        profile.model_name, attempt, max_attempts, response.status
                    );
                    return Self::decode(&response.body);
                }
                Ok(response) => {
                    let retry = self.policy.is_retryable(response.status) && attempt < max_attempts;
                    warn!(
                        "Completion from {} failed (attempt {}/{}, status {}){}",
                        profile.model_name,
                        attempt,
                        max_attempts,
                        response.status,
                        if retry { ", retrying" } else { "" }
                    );
                    if !retry {
                        debug!("Provider response body: {}", truncate(&response.body, 200));
                        return Err(Self::provider_error(response));
                    }
                    last_failure = Some(Self::provider_error(response));
                }
                Err(failure) => {
                    warn!(
                        "Completion from {} failed (attempt {}/{}): {}",
                        profile.model_name, attempt, max_attempts, failure
                    );
                    last_failure = Some(GatewayError::Transport(failure.to_string()));
                }
            }
        }

        let last = last_failure
            .unwrap_or_else(|| GatewayError::Transport("no attempt was made".to_string()));
        Err(GatewayError::MaxRetriesExceeded {
            attempts: max_attempts,
            last: Box::new(last),
        })
    }
}
