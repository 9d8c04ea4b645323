//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Environment overrides are merged into the same shape by the loader.
//!
//! ```toml
//! [database]
//! url = "sqlite://examforge.db"
//!
//! [gateway]
//! timeout_seconds = 30
//! max_retries = 3
//!
//! [providers.deepseek]
//! endpoint = "https://api.deepseek.com/chat/completions"
//! api_key = "sk-..."
//! model = "deepseek-chat"
//! ```

use crate::chat::{ChatSettings, RetryPolicy};
use examforge_application::{ModelProfile, ModelProfiles};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("gateway.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("gateway.max_tokens cannot be 0")]
    InvalidMaxTokens,

    #[error("gateway.temperature must be within 0.0..=2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("gateway.initial_backoff_ms ({initial}) exceeds gateway.max_backoff_ms ({max})")]
    InvalidBackoff { initial: u64, max: u64 },

    #[error("database.url cannot be empty")]
    EmptyDatabaseUrl,
}

/// Raw database configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDatabaseConfig {
    /// sqlx connection URL
    pub url: String,
}

impl Default for FileDatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://examforge.db".to_string(),
        }
    }
}

/// Raw completion gateway configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    /// Per-attempt request timeout
    pub timeout_seconds: u64,
    /// Retries after the first attempt
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            max_retries: 3,
            initial_backoff_ms: 1_000,
            max_backoff_ms: 4_000,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

/// Raw provider configuration (one per model selector)
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Chat-completion endpoint URL
    pub endpoint: String,
    /// Bearer credential (prefer the environment variable)
    pub api_key: String,
    /// Provider-side model name
    pub model: String,
}

impl FileProviderConfig {
    fn with_defaults(endpoint: &str, model: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            api_key: String::new(),
            model: model.to_string(),
        }
    }

    fn to_profile(&self) -> Option<ModelProfile> {
        let profile = ModelProfile::new(&self.endpoint, &self.api_key, &self.model);
        profile.is_configured().then_some(profile)
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self::with_defaults("", "")
    }
}

impl std::fmt::Debug for FileProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileProviderConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &if self.has_api_key() { "<set>" } else { "<unset>" })
            .field("model", &self.model)
            .finish()
    }
}

/// Raw `[providers]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub deepseek: FileProviderConfig,
    pub tongyi: FileProviderConfig,
}

impl Default for FileProvidersConfig {
    fn default() -> Self {
        Self {
            deepseek: FileProviderConfig::with_defaults(
                "https://api.deepseek.com/chat/completions",
                "deepseek-chat",
            ),
            tongyi: FileProviderConfig::with_defaults(
                "https://dashscope.aliyuncs.com/compatible-mode/v1/chat/completions",
                "qwen-plus",
            ),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Question store settings
    pub database: FileDatabaseConfig,
    /// Retry, timeout and payload settings shared by all providers
    pub gateway: FileGatewayConfig,
    /// Endpoint and credentials per model selector
    pub providers: FileProvidersConfig,
}

impl FileConfig {
    /// Validate the configuration, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let gateway = &self.gateway;
        if gateway.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if gateway.max_tokens == 0 {
            return Err(ConfigValidationError::InvalidMaxTokens);
        }
        if !(0.0..=2.0).contains(&gateway.temperature) {
            return Err(ConfigValidationError::InvalidTemperature(gateway.temperature));
        }
        if gateway.initial_backoff_ms > gateway.max_backoff_ms {
            return Err(ConfigValidationError::InvalidBackoff {
                initial: gateway.initial_backoff_ms,
                max: gateway.max_backoff_ms,
            });
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyDatabaseUrl);
        }
        Ok(())
    }

    /// Profiles for every provider with both endpoint and key set
    pub fn model_profiles(&self) -> ModelProfiles {
        ModelProfiles {
            deepseek: self.providers.deepseek.to_profile(),
            tongyi: self.providers.tongyi.to_profile(),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.gateway.max_retries,
            initial_backoff: Duration::from_millis(self.gateway.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.gateway.max_backoff_ms),
            ..RetryPolicy::default()
        }
    }

    pub fn chat_settings(&self) -> ChatSettings {
        ChatSettings {
            timeout: Duration::from_secs(self.gateway.timeout_seconds),
            temperature: self.gateway.temperature,
            max_tokens: self.gateway.max_tokens,
        }
    }
}
