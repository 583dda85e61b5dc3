//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::VolfillConfig;
use crate::error::FillError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file and environment.
    pub fn load() -> Result<VolfillConfig, FillError> {
        MergeService::load(None)
    }

    /// Load configuration with an explicit file layered over the global one.
    pub fn load_with_file(path: &Path) -> Result<VolfillConfig, FillError> {
        if !path.exists() {
            return Err(FillError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        MergeService::load(Some(path))
    }
}
