//! File Materialization
//!
//! Writes one planned file to disk. Failures never escape as errors: they are
//! captured in the returned [`FileOutcome`] so the run can move on to the next file.

use crate::content::ContentSource;
use crate::error::FillError;
use crate::plan::ResolvedFile;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default write buffer and zero block size (1 MiB)
pub const DEFAULT_WRITE_BUFFER_BYTES: usize = 1024 * 1024;

/// Per-file result status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Failed,
}

/// Result of materializing one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Path relative to the destination root
    pub path: PathBuf,
    pub requested_size: u64,
    pub actual_size: u64,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl FileOutcome {
    pub fn failed(path: PathBuf, requested_size: u64, actual_size: u64, detail: String) -> Self {
        Self {
            path,
            requested_size,
            actual_size,
            status: OutcomeStatus::Failed,
            error_detail: Some(detail),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

/// Writes planned files under a destination root
#[derive(Debug, Clone, Copy)]
pub struct FileMaterializer {
    write_buffer_bytes: usize,
    explicit_zeros: bool,
}

impl Default for FileMaterializer {
    fn default() -> Self {
        Self::new(DEFAULT_WRITE_BUFFER_BYTES, false)
    }
}

impl FileMaterializer {
    /// `explicit_zeros` writes real zero blocks instead of extending the file length.
    pub fn new(write_buffer_bytes: usize, explicit_zeros: bool) -> Self {
        Self {
            write_buffer_bytes: write_buffer_bytes.max(1),
            explicit_zeros,
        }
    }

    /// Materialize `file` under `root`.
    pub fn materialize(
        &self,
        root: &Path,
        file: &ResolvedFile,
        source: &ContentSource,
    ) -> FileOutcome {
        let mut outcome = self.create(&root.join(&file.path), file.size_bytes, source);
        outcome.path = file.path.clone();
        outcome
    }

    /// Create `path` with exactly `size_bytes` bytes from `source`.
    ///
    /// The reported path is `path` as given.
    pub fn create(&self, path: &Path, size_bytes: u64, source: &ContentSource) -> FileOutcome {
        match self.write_file(path, size_bytes, source) {
            Ok(actual_size) => {
                debug!(path = %path.display(), size_bytes, "Materialized file");
                FileOutcome {
                    path: path.to_path_buf(),
                    requested_size: size_bytes,
                    actual_size,
                    status: OutcomeStatus::Success,
                    error_detail: None,
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to materialize file");
                // Report whatever landed on disk.
                let actual_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
                FileOutcome::failed(path.to_path_buf(), size_bytes, actual_size, e.to_string())
            }
        }
    }

    fn write_file(
        &self,
        path: &Path,
        size_bytes: u64,
        source: &ContentSource,
    ) -> Result<u64, FillError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| FillError::DirectoryCreation {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let write_err = |e: std::io::Error| FillError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        };

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(write_err)?;

        match source {
            ContentSource::Zero if !self.explicit_zeros => {
                file.set_len(size_bytes).map_err(write_err)?;
            }
            _ => self.stream_into(file, size_bytes, source).map_err(write_err)?,
        }

        let actual = std::fs::metadata(path).map_err(write_err)?.len();
        if actual != size_bytes {
            return Err(FillError::LengthMismatch {
                path: path.to_path_buf(),
                expected: size_bytes,
                actual,
            });
        }
        Ok(actual)
    }

    fn stream_into(
        &self,
        file: File,
        size_bytes: u64,
        source: &ContentSource,
    ) -> std::io::Result<()> {
        let mut writer = BufWriter::with_capacity(self.write_buffer_bytes, file);
        let mut written: u64 = 0;

        match source {
            ContentSource::Zero => {
                let block = source.next_chunk(0, self.write_buffer_bytes);
                while written < size_bytes {
                    let take = (size_bytes - written).min(block.len() as u64) as usize;
                    writer.write_all(&block[..take])?;
                    written += take as u64;
                }
            }
            ContentSource::Buffer(buffer) => {
                let chunk_len = buffer.len() as u64;
                while written < size_bytes {
                    let take = (size_bytes - written).min(chunk_len) as usize;
                    let chunk = source.next_chunk(written, take);
                    writer.write_all(&chunk)?;
                    written += chunk.len() as u64;
                }
            }
        }

        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()
    }
}
