//! CLI Tooling
//!
//! Command-line interface for volfill. Commands return their report as a
//! string; the binary decides where it goes.

use crate::config::{ConfigLoader, VolfillConfig};
use crate::content::HttpTextSource;
use crate::error::FillError;
use crate::logging::LoggingConfig;
use crate::plan::{load_manifest, FileSpec};
use crate::run::{format_plan_text, format_summary_text, RunCoordinator, RunRequest};
use crate::types::{Budget, FillMode};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

/// Volfill CLI - synthesize placeholder directory trees of a target size
#[derive(Parser)]
#[command(name = "volfill")]
#[command(version)]
#[command(about = "Synthesize placeholder directory trees that add up to a target size")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (info level)
    #[arg(long, short = 'v', global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Logging config with CLI flags applied over `base`.
    ///
    /// `--log-file` is not merged here; pass `log_file` to
    /// [`crate::logging::init_logging`] so it outranks `VOLFILL_LOG_FILE`.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if self.verbose {
            config.level = "info".to_string();
        }
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        config
    }
}

/// Spec and budget arguments shared by `generate` and `plan`
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PlanArgs {
    /// Total size budget in gigabytes (GiB)
    #[arg(long, short = 's', default_value_t = 1)]
    pub size_gb: u64,

    /// File to create: PATH or PATH:SIZE_MB (repeatable)
    #[arg(long = "file", short = 'f', value_name = "SPEC")]
    pub files: Vec<FileSpec>,

    /// JSON manifest of file specs; entries come before --file specs
    #[arg(long, short = 'm')]
    pub manifest: Option<PathBuf>,
}

impl PlanArgs {
    /// Collect specs from the manifest and --file flags, in that order.
    pub fn specs(&self) -> Result<Vec<FileSpec>, FillError> {
        let mut specs = match &self.manifest {
            Some(path) => load_manifest(path)?,
            None => Vec::new(),
        };
        specs.extend(self.files.iter().cloned());
        Ok(specs)
    }

    pub fn budget(&self) -> Budget {
        Budget::from_gb(self.size_gb)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Generate placeholder files under a destination directory
    Generate {
        /// Destination root directory (created if missing)
        destination: PathBuf,

        #[command(flatten)]
        plan: PlanArgs,

        /// Fill mode: zero bytes or repeated fetched text
        #[arg(long, value_enum, default_value_t = FillMode::Zero)]
        fill: FillMode,

        /// Text source URL for --fill text (repeatable; defaults to configured sources)
        #[arg(long = "url", value_name = "URL")]
        urls: Vec<String>,

        /// Files written concurrently (default from config, 1 = sequential)
        #[arg(long, short = 'j')]
        workers: Option<usize>,

        /// Write real zero blocks instead of extending file length
        #[arg(long)]
        explicit_zeros: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Show how the budget would be split, without writing anything
    Plan {
        #[command(flatten)]
        plan: PlanArgs,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// CLI context for command execution
pub struct CliContext {
    config: VolfillConfig,
}

impl CliContext {
    /// Create a new CLI context, loading configuration from standard sources.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, FillError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_with_file(path)?,
            None => ConfigLoader::load()?,
        };
        Ok(Self { config })
    }

    /// Create a CLI context from an already loaded configuration.
    pub fn from_config(config: VolfillConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VolfillConfig {
        &self.config
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, FillError> {
        match command {
            Commands::Generate {
                destination,
                plan,
                fill,
                urls,
                workers,
                explicit_zeros,
                format,
            } => self.handle_generate(
                destination,
                plan,
                *fill,
                urls,
                *workers,
                *explicit_zeros,
                format,
            ),
            Commands::Plan { plan, format } => self.handle_plan(plan, format),
            Commands::Config => self.handle_config(),
        }
    }

    fn coordinator(
        &self,
        workers: Option<usize>,
        explicit_zeros: bool,
    ) -> Result<RunCoordinator<HttpTextSource>, FillError> {
        let mut options = self.config.run_options();
        if let Some(workers) = workers {
            options.workers = workers.max(1);
        }
        options.explicit_zeros |= explicit_zeros;

        let source = HttpTextSource::new(self.config.fetch.timeout(), &self.config.fetch.user_agent)?;
        Ok(RunCoordinator::new(source, options))
    }

    #[allow(clippy::too_many_arguments)]
    fn handle_generate(
        &self,
        destination: &Path,
        plan: &PlanArgs,
        fill: FillMode,
        urls: &[String],
        workers: Option<usize>,
        explicit_zeros: bool,
        format: &str,
    ) -> Result<String, FillError> {
        let urls = if urls.is_empty() {
            self.config.fetch.sources.clone()
        } else {
            urls.to_vec()
        };
        let request = RunRequest {
            destination: destination.to_path_buf(),
            specs: plan.specs()?,
            budget: plan.budget(),
            fill_mode: fill,
            urls,
        };
        let coordinator = self.coordinator(workers, explicit_zeros)?;

        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(FillError::Runtime(
                "Cannot run generation from within an async runtime; call RunCoordinator::run directly"
                    .to_string(),
            ));
        }
        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| FillError::Runtime(format!("Failed to create runtime: {}", e)))?;
        let summary = rt.block_on(coordinator.run(request))?;
        info!(
            files = summary.outcomes.len(),
            failed = summary.failed,
            "Generate command finished"
        );

        if format == "json" {
            serde_json::to_string_pretty(&summary)
                .map_err(|e| FillError::Runtime(format!("Failed to serialize summary: {}", e)))
        } else {
            Ok(format_summary_text(&summary))
        }
    }

    fn handle_plan(&self, plan: &PlanArgs, format: &str) -> Result<String, FillError> {
        let coordinator = self.coordinator(None, false)?;
        let allocation = coordinator.plan(plan.specs()?, plan.budget())?;

        if format == "json" {
            serde_json::to_string_pretty(&allocation)
                .map_err(|e| FillError::Runtime(format!("Failed to serialize plan: {}", e)))
        } else {
            Ok(format_plan_text(&allocation))
        }
    }

    fn handle_config(&self) -> Result<String, FillError> {
        toml::to_string_pretty(&self.config)
            .map_err(|e| FillError::ConfigError(format!("Failed to serialize config: {}", e)))
    }
}
