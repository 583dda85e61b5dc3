//! Configuration
//!
//! Layered configuration for volfill: built-in defaults, the global config
//! file, an explicit `--config` file, and `VOLFILL__*` environment variables.

mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use crate::materialize::DEFAULT_WRITE_BUFFER_BYTES;
use crate::run::{RunOptions, DEFAULT_FILE_NAME};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level volfill configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VolfillConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Text source fetching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum concurrent requests
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// URLs used for text fill when none are given on the command line
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_concurrent() -> usize {
    4
}

fn default_user_agent() -> String {
    format!("volfill/{}", env!("CARGO_PKG_VERSION"))
}

fn default_sources() -> Vec<String> {
    vec![
        "https://www.gutenberg.org/cache/epub/1342/pg1342.txt".to_string(),
        "https://www.gutenberg.org/cache/epub/11/pg11.txt".to_string(),
        "https://www.gutenberg.org/cache/epub/84/pg84.txt".to_string(),
    ]
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_concurrent: default_max_concurrent(),
            user_agent: default_user_agent(),
            sources: default_sources(),
        }
    }
}

/// File generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Files written concurrently (1 = sequential)
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Write buffer and zero block size in bytes
    #[serde(default = "default_write_buffer_bytes")]
    pub write_buffer_bytes: usize,

    /// Write real zero blocks instead of extending file length
    #[serde(default)]
    pub explicit_zeros: bool,

    /// File created when no specs are given
    #[serde(default = "default_file_name")]
    pub default_file_name: String,
}

fn default_workers() -> usize {
    1
}

fn default_write_buffer_bytes() -> usize {
    DEFAULT_WRITE_BUFFER_BYTES
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            write_buffer_bytes: default_write_buffer_bytes(),
            explicit_zeros: false,
            default_file_name: default_file_name(),
        }
    }
}

impl VolfillConfig {
    /// Run options derived from this configuration.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            workers: self.generation.workers.max(1),
            fetch_concurrency: self.fetch.max_concurrent.max(1),
            write_buffer_bytes: self.generation.write_buffer_bytes.max(1),
            explicit_zeros: self.generation.explicit_zeros,
            default_file_name: self.generation.default_file_name.clone(),
        }
    }
}
