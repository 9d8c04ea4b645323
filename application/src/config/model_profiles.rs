//! Provider endpoint and credentials per model selector.

use examforge_domain::AiModel;

/// Connection details for one completion provider
#[derive(Clone, PartialEq, Eq)]
pub struct ModelProfile {
    /// Chat-completion endpoint URL
    pub endpoint: String,
    /// Bearer credential
    pub api_key: String,
    /// Provider-side model name sent in the request payload
    pub model_name: String,
}

impl ModelProfile {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model_name: model_name.into(),
        }
    }

    /// Both endpoint and key are present
    pub fn is_configured(&self) -> bool {
        !self.endpoint.trim().is_empty() && !self.api_key.trim().is_empty()
    }
}

// The key must never end up in logs.
impl std::fmt::Debug for ModelProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelProfile")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("model_name", &self.model_name)
            .finish()
    }
}

/// Profiles for every selector this deployment can route
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelProfiles {
    pub deepseek: Option<ModelProfile>,
    pub tongyi: Option<ModelProfile>,
}

impl ModelProfiles {
    /// Look up a usable profile.
    ///
    /// Returns `None` for [`AiModel::Unknown`] and for known selectors
    /// whose endpoint or key is missing.
    pub fn resolve(&self, model: &AiModel) -> Option<&ModelProfile> {
        let profile = match model {
            AiModel::DeepSeek => self.deepseek.as_ref(),
            AiModel::Tongyi => self.tongyi.as_ref(),
            AiModel::Unknown(_) => None,
        }?;
        profile.is_configured().then_some(profile)
    }

    /// Selectors with a usable profile
    pub fn configured_models(&self) -> Vec<AiModel> {
        AiModel::known()
            .into_iter()
            .filter(|m| self.resolve(m).is_some())
            .collect()
    }
}
