//! Base layer for config composition: serialized defaults.

use crate::config::VolfillConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with every default value so later layers only override.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = Config::try_from(&VolfillConfig::default())?;
    Ok(Config::builder().add_source(defaults))
}
