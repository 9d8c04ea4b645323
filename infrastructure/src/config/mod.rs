//! Configuration file loading for examforge
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables (provider credentials, database URL)
//! 2. `--config <path>` specified file
//! 3. Project root: `./examforge.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/examforge/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileDatabaseConfig, FileGatewayConfig, FileProviderConfig,
    FileProvidersConfig,
};
pub use loader::{ConfigError, ConfigLoader, PROJECT_CONFIG_FILE};
