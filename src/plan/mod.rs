//! File Planning
//!
//! Turns user file specs into a concrete list of files and byte counts.
//! Planning is pure: nothing here touches the filesystem apart from reading a
//! manifest when asked to.

pub mod allocator;
pub mod manifest;

pub use allocator::{Allocation, SizeBudgetAllocator};
pub use manifest::load_manifest;

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

/// One requested file, with or without an explicit size
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSpec {
    /// Size comes from the remaining budget
    Path(String),
    /// Explicit size in megabytes; non-positive values are demoted to unspecified
    Sized { path: String, size_mb: i64 },
    /// Entry that could not be read as a spec. Demoted to unspecified when
    /// `path` is usable, dropped otherwise.
    Malformed { path: String, reason: String },
}

impl FileSpec {
    pub fn path(&self) -> &str {
        match self {
            FileSpec::Path(path) => path,
            FileSpec::Sized { path, .. } => path,
            FileSpec::Malformed { path, .. } => path,
        }
    }

    pub fn size_mb(&self) -> Option<i64> {
        match self {
            FileSpec::Path(_) | FileSpec::Malformed { .. } => None,
            FileSpec::Sized { size_mb, .. } => Some(*size_mb),
        }
    }

    /// Parse `path` or `path:SIZE_MB`.
    ///
    /// The suffix after the last `:` only counts as a size when it parses as an
    /// integer, so `notes:v2` stays a plain path.
    pub fn parse(raw: &str) -> FileSpec {
        if let Some((path, size)) = raw.rsplit_once(':') {
            if let Ok(size_mb) = size.trim().parse::<i64>() {
                return FileSpec::Sized {
                    path: path.to_string(),
                    size_mb,
                };
            }
        }
        FileSpec::Path(raw.to_string())
    }
}

impl FromStr for FileSpec {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FileSpec::parse(s))
    }
}

/// A spec after size computation, ready to be written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFile {
    /// Path relative to the destination root
    pub path: PathBuf,
    pub size_bytes: u64,
    /// Whether the size came from the spec rather than the budget split
    pub explicit: bool,
}

/// Normalize a spec path into a safe relative path.
///
/// Rejects empty, absolute, and parent-traversing paths so every file stays
/// under the destination root. `.` components are dropped.
pub fn sanitize_relative_path(raw: &str) -> Result<PathBuf, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("path is empty".to_string());
    }

    let mut clean = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                return Err("absolute paths are not allowed".to_string());
            }
            Component::ParentDir => {
                return Err("path escapes the destination root".to_string());
            }
            Component::CurDir => continue,
            Component::Normal(part) => clean.push(part),
        }
    }

    if clean.as_os_str().is_empty() {
        return Err("path names no file".to_string());
    }
    Ok(clean)
}
