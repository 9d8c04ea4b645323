//! Model selector value object

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// AI provider selected for question generation (Value Object)
///
/// Selectors arrive as free-form strings from callers. Parsing is total:
/// anything unrecognized becomes [`AiModel::Unknown`], which the generation
/// use case rejects before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AiModel {
    #[default]
    DeepSeek,
    Tongyi,
    Unknown(String),
}

impl AiModel {
    /// Canonical selector string, also stored as the question's model tag
    pub fn as_str(&self) -> &str {
        match self {
            AiModel::DeepSeek => "deepseek",
            AiModel::Tongyi => "通义千问",
            AiModel::Unknown(s) => s,
        }
    }

    /// Selectors this deployment knows how to route
    pub fn known() -> Vec<AiModel> {
        vec![AiModel::DeepSeek, AiModel::Tongyi]
    }
}

impl std::fmt::Display for AiModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AiModel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim() {
            "deepseek" => AiModel::DeepSeek,
            "通义千问" | "tongyi" => AiModel::Tongyi,
            other => AiModel::Unknown(other.to_string()),
        })
    }
}

impl Serialize for AiModel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AiModel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        // FromStr is infallible
        Ok(s.parse().unwrap_or_else(|never| match never {}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roundtrip() {
        for model in AiModel::known() {
            let parsed: AiModel = model.to_string().parse().unwrap();
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_tongyi_alias() {
        let model: AiModel = "tongyi".parse().unwrap();
        assert_eq!(model, AiModel::Tongyi);
        assert_eq!(model.as_str(), "通义千问");
    }

    #[test]
    fn test_unknown_selector() {
        let model: AiModel = "gpt-9".parse().unwrap();
        assert_eq!(model, AiModel::Unknown("gpt-9".to_string()));
        assert!(!AiModel::known().contains(&model));
        assert_eq!(model.to_string(), "gpt-9");
    }

    #[test]
    fn test_default_is_deepseek() {
        assert_eq!(AiModel::default(), AiModel::DeepSeek);
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&AiModel::DeepSeek).unwrap();
        assert_eq!(json, "\"deepseek\"");
        let back: AiModel = serde_json::from_str("\"tongyi\"").unwrap();
        assert_eq!(back, AiModel::Tongyi);
    }
}
