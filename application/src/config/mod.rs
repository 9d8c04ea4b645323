//! Application-level configuration.
//!
//! Values here are built once at startup by the infrastructure config
//! loader and injected into use cases. They are read-only afterwards.
//!
//! - [`ModelProfiles`]: endpoint and credentials per model selector

pub mod model_profiles;

pub use model_profiles::{ModelProfile, ModelProfiles};
