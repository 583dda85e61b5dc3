//! MergeService: orchestrates sources, applies merge policy, deserializes to VolfillConfig.

use crate::config::sources::{environment, explicit_file, global_file};
use crate::config::VolfillConfig;
use crate::error::FillError;
use std::path::Path;
use tracing::debug;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: defaults (lowest) -> global file -> explicit file -> environment (highest).
    pub fn load(explicit: Option<&Path>) -> Result<VolfillConfig, FillError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = match explicit {
            Some(path) => explicit_file::add_to_builder(builder, path)?,
            None => builder,
        };
        let builder = environment::add_to_builder(builder)?;

        let config: VolfillConfig = builder.build()?.try_deserialize()?;
        debug!(
            workers = config.generation.workers,
            sources = config.fetch.sources.len(),
            "Loaded configuration"
        );
        Ok(config)
    }
}
