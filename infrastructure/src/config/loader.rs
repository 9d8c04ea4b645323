//! Configuration file loader with multi-source merging

use super::file_config::{ConfigValidationError, FileConfig};
use examforge_domain::ErrorKind;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::env::VarError;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Project-level config file name
pub const PROJECT_CONFIG_FILE: &str = "examforge.toml";

/// Environment variables honoured on top of every file, with their config keys
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("DEEPSEEK_API_KEY", "providers.deepseek.api_key"),
    ("DEEPSEEK_API_URL", "providers.deepseek.endpoint"),
    ("TONGYI_API_KEY", "providers.tongyi.api_key"),
    ("TONGYI_API_URL", "providers.tongyi.endpoint"),
    ("EXAMFORGE_DATABASE_URL", "database.url"),
];

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigValidationError),
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment (`DEEPSEEK_API_KEY`, `DEEPSEEK_API_URL`, `TONGYI_API_KEY`,
    ///    `TONGYI_API_URL`, `EXAMFORGE_DATABASE_URL`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./examforge.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/examforge/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        Self::finish(Self::merge_env(figment))
    }

    /// Load only default configuration plus environment (for --no-config)
    pub fn load_defaults() -> Result<FileConfig, ConfigError> {
        Self::finish(Self::merge_env(
            Figment::new().merge(Serialized::defaults(FileConfig::default())),
        ))
    }

    /// Load a single file over the defaults, ignoring other sources
    pub fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
        Self::finish(
            Figment::new()
                .merge(Serialized::defaults(FileConfig::default()))
                .merge(Toml::file(path)),
        )
    }

    fn finish(figment: Figment) -> Result<FileConfig, ConfigError> {
        let config: FileConfig = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Merge the environment overrides as plain strings.
    ///
    /// Values are not parsed, so a key like `1234567890` stays a string.
    fn merge_env(mut figment: Figment) -> Figment {
        for (name, key) in ENV_OVERRIDES {
            match std::env::var(name) {
                Ok(value) => figment = figment.merge(Serialized::default(key, value)),
                Err(VarError::NotPresent) => {}
                Err(VarError::NotUnicode(_)) => warn!("Ignoring {}: not valid UTF-8", name),
            }
        }
        figment
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/examforge/config.toml if set,
    /// otherwise falls back to ~/.config/examforge/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("examforge").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_CONFIG_FILE);
        path.exists().then_some(path)
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        for (name, _) in ENV_OVERRIDES {
            let state = if std::env::var_os(name).is_some() {
                "SET  "
            } else {
                "     "
            };
            println!("  [{}] Env:     {}", state, name);
        }

        if let Some(path) = explicit {
            let state = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{}] Explicit: {}", state, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./{}", PROJECT_CONFIG_FILE);
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::io::Write;

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("examforge"));
    }

    #[test]
    fn test_env_overrides_project_file_and_defaults() {
        Jail::expect_with(|jail| {
            let config_home = jail.directory().to_path_buf();
            jail.set_env("XDG_CONFIG_HOME", config_home.display());
            jail.create_file(
                PROJECT_CONFIG_FILE,
                r#"
[database]
url = "sqlite://file.db"

[gateway]
max_retries = 2

[providers.deepseek]
endpoint = "https://file.example/chat"
api_key = "sk-file"
"#,
            )?;
            jail.set_env("DEEPSEEK_API_KEY", "sk-env");
            jail.set_env("DEEPSEEK_API_URL", "https://env.example/chat");
            jail.set_env("EXAMFORGE_DATABASE_URL", "sqlite://env.db");
            jail.set_env("TONGYI_API_KEY", "1234567890");

            let config = ConfigLoader::load(None).unwrap();

            assert_eq!(config.database.url, "sqlite://env.db");
            assert_eq!(config.gateway.max_retries, 2);
            assert_eq!(config.providers.deepseek.api_key, "sk-env");
            assert_eq!(config.providers.deepseek.endpoint, "https://env.example/chat");
            assert_eq!(config.providers.deepseek.model, "deepseek-chat");
            assert_eq!(config.providers.tongyi.api_key, "1234567890");
            Ok(())
        });
    }

    #[test]
    fn test_env_values_are_not_parsed() {
        Jail::expect_with(|jail| {
            jail.set_env("DEEPSEEK_API_KEY", "true");
            jail.set_env("TONGYI_API_KEY", "007");

            let config = ConfigLoader::load_defaults().unwrap();

            assert_eq!(config.providers.deepseek.api_key, "true");
            assert_eq!(config.providers.tongyi.api_key, "007");
            Ok(())
        });
    }

    #[test]
    fn test_load_file_merges_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[gateway]
max_retries = 5

[providers.tongyi]
api_key = "sk-tongyi"
"#
        )
        .unwrap();

        let config = ConfigLoader::load_file(file.path()).unwrap();

        assert_eq!(config.gateway.max_retries, 5);
        assert_eq!(config.gateway.timeout_seconds, 30);
        assert_eq!(config.providers.tongyi.api_key, "sk-tongyi");
        assert_eq!(config.providers.tongyi.model, "qwen-plus");
    }

    #[test]
    fn test_load_file_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[gateway]\ntimeout_seconds = 0").unwrap();

        let err = ConfigLoader::load_file(file.path()).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid(ConfigValidationError::InvalidTimeout)
        ));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_load_file_rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[gateway\nmax_retries = ").unwrap();

        let err = ConfigLoader::load_file(file.path()).unwrap_err();

        assert!(matches!(err, ConfigError::Load(_)));
    }
}
