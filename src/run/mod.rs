//! Run Coordination
//!
//! Drives a full run: normalize specs, allocate the budget, fetch text when
//! asked, materialize every file, and aggregate outcomes. Only an empty spec
//! list or an unusable destination stop a run; everything else is recorded
//! and the run continues.

pub mod report;

pub use report::{format_plan_text, format_summary_text};

use crate::content::{fetch_all, ContentSource, TextSource};
use crate::error::FillError;
use crate::materialize::{FileMaterializer, FileOutcome, DEFAULT_WRITE_BUFFER_BYTES};
use crate::plan::{Allocation, FileSpec, SizeBudgetAllocator};
use crate::types::{Budget, FillMode};
use crate::warning::RunWarning;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, warn};

/// File name used when no specs are given at all
pub const DEFAULT_FILE_NAME: &str = "dummy_file.dat";

/// What to generate and where
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub destination: PathBuf,
    pub specs: Vec<FileSpec>,
    pub budget: Budget,
    pub fill_mode: FillMode,
    /// Text sources for [`FillMode::Text`]
    pub urls: Vec<String>,
}

/// Tunables for a run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Files materialized concurrently; 1 keeps the run sequential
    pub workers: usize,
    /// Concurrent text fetches
    pub fetch_concurrency: usize,
    pub write_buffer_bytes: usize,
    pub explicit_zeros: bool,
    pub default_file_name: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            workers: 1,
            fetch_concurrency: 4,
            write_buffer_bytes: DEFAULT_WRITE_BUFFER_BYTES,
            explicit_zeros: false,
            default_file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

/// Aggregate result of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub destination: PathBuf,
    /// Fill mode actually used, after any fallback
    pub fill_mode: FillMode,
    pub requested_fill_mode: FillMode,
    pub content_buffer_bytes: usize,
    /// One outcome per planned file, in input order
    pub outcomes: Vec<FileOutcome>,
    pub total_requested_bytes: u64,
    pub total_actual_bytes: u64,
    pub succeeded: usize,
    pub failed: usize,
    pub warnings: Vec<RunWarning>,
    pub started_at: String,
    pub duration_ms: u64,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Orchestrates planning, fetching, and materialization
pub struct RunCoordinator<S: TextSource> {
    text_source: S,
    options: RunOptions,
}

impl<S: TextSource> RunCoordinator<S> {
    pub fn new(text_source: S, options: RunOptions) -> Self {
        Self {
            text_source,
            options,
        }
    }

    /// An empty spec list becomes a single default spec.
    pub fn normalize(&self, specs: Vec<FileSpec>) -> Vec<FileSpec> {
        if specs.is_empty() {
            info!(
                file = %self.options.default_file_name,
                "No file specs given; using default"
            );
            vec![FileSpec::Path(self.options.default_file_name.clone())]
        } else {
            specs
        }
    }

    /// Allocate without touching the filesystem or network.
    pub fn plan(&self, specs: Vec<FileSpec>, budget: Budget) -> Result<Allocation, FillError> {
        let specs = self.normalize(specs);
        SizeBudgetAllocator::allocate(&specs, budget).map_err(|e| {
            error!(error = %e, "Nothing to generate");
            e
        })
    }

    /// Execute a full run.
    pub async fn run(&self, request: RunRequest) -> Result<RunSummary, FillError> {
        let start = Instant::now();
        let started_at = chrono::Utc::now().to_rfc3339();

        let allocation = self.plan(request.specs, request.budget)?;
        let destination = resolve_destination(&request.destination)?;
        let mut warnings = allocation.warnings.clone();

        info!(
            destination = %destination.display(),
            files = allocation.files.len(),
            budget_bytes = request.budget.total_bytes,
            fill_mode = %request.fill_mode,
            "Starting run"
        );

        let source = match request.fill_mode {
            FillMode::Zero => ContentSource::zero(),
            FillMode::Text => {
                let report = fetch_all(
                    &self.text_source,
                    &request.urls,
                    self.options.fetch_concurrency,
                )
                .await;
                warnings.extend(report.failures.iter().cloned());
                match report.source() {
                    Some(source) => source,
                    None => {
                        warn!(
                            attempted = report.attempted,
                            "No text content fetched; falling back to zero fill"
                        );
                        warnings.push(RunWarning::NoContentFetched {
                            attempted: report.attempted,
                        });
                        ContentSource::zero()
                    }
                }
            }
        };

        let outcomes = self.materialize_all(&destination, &allocation, &source).await;

        let total_requested_bytes = outcomes
            .iter()
            .fold(0u64, |acc, o| acc.saturating_add(o.requested_size));
        let total_actual_bytes = outcomes
            .iter()
            .fold(0u64, |acc, o| acc.saturating_add(o.actual_size));
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        let failed = outcomes.len() - succeeded;

        info!(
            succeeded,
            failed,
            total_actual_bytes,
            duration_ms = start.elapsed().as_millis() as u64,
            "Run complete"
        );

        Ok(RunSummary {
            destination,
            fill_mode: source.fill_mode(),
            requested_fill_mode: request.fill_mode,
            content_buffer_bytes: source.buffer_len(),
            outcomes,
            total_requested_bytes,
            total_actual_bytes,
            succeeded,
            failed,
            warnings,
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Materialize every planned file with at most `workers` in flight.
    ///
    /// Outcomes come back in plan order; a failed or panicked file never stops
    /// its siblings.
    async fn materialize_all(
        &self,
        root: &Path,
        allocation: &Allocation,
        source: &ContentSource,
    ) -> Vec<FileOutcome> {
        let materializer =
            FileMaterializer::new(self.options.write_buffer_bytes, self.options.explicit_zeros);
        let workers = self.options.workers.max(1);

        stream::iter(allocation.files.iter().cloned())
            .map(|file| {
                let root = root.to_path_buf();
                let source = source.clone();
                async move {
                    let path = file.path.clone();
                    let size = file.size_bytes;
                    match tokio::task::spawn_blocking(move || {
                        materializer.materialize(&root, &file, &source)
                    })
                    .await
                    {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            warn!(path = %path.display(), error = %e, "File worker aborted");
                            FileOutcome::failed(path, size, 0, format!("worker aborted: {}", e))
                        }
                    }
                }
            })
            .buffered(workers)
            .collect()
            .await
    }
}

/// Create the destination root if needed and resolve it to an absolute path.
pub fn resolve_destination(destination: &Path) -> Result<PathBuf, FillError> {
    let unresolvable = |reason: String| {
        error!(destination = %destination.display(), %reason, "Destination unusable");
        FillError::DestinationUnresolvable {
            path: destination.to_path_buf(),
            reason,
        }
    };

    if destination.as_os_str().is_empty() {
        return Err(unresolvable("path is empty".to_string()));
    }
    std::fs::create_dir_all(destination)
        .map_err(|e| unresolvable(format!("cannot create directory: {}", e)))?;
    let resolved = dunce::canonicalize(destination)
        .map_err(|e| unresolvable(format!("cannot resolve path: {}", e)))?;
    if !resolved.is_dir() {
        return Err(unresolvable("not a directory".to_string()));
    }
    Ok(resolved)
}
