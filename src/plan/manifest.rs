//! JSON manifest of file specs.
//!
//! A manifest is an array mixing bare paths and objects:
//!
//! ```json
//! ["b", { "path": "a", "size_mb": 3000 }, { "path": "c" }]
//! ```

use crate::error::FillError;
use crate::plan::FileSpec;
use serde_json::Value;
use std::path::Path;

/// Read one manifest element. Entries that cannot be read become
/// [`FileSpec::Malformed`] so the allocator can report them without losing
/// the rest of the manifest.
fn entry_to_spec(index: usize, entry: Value) -> FileSpec {
    let mut fields = match entry {
        Value::String(path) => return FileSpec::Path(path),
        Value::Object(fields) => fields,
        other => {
            return FileSpec::Malformed {
                path: String::new(),
                reason: format!("manifest entry {} is not a path or object: {}", index, other),
            }
        }
    };

    let path = match fields.remove("path") {
        Some(Value::String(path)) => path,
        None | Some(Value::Null) => String::new(),
        Some(other) => {
            return FileSpec::Malformed {
                path: String::new(),
                reason: format!("manifest entry {} has a non-string path: {}", index, other),
            }
        }
    };

    let size = match fields.remove("size_mb") {
        None | Some(Value::Null) => return FileSpec::Path(path),
        Some(size) => size,
    };
    match size.as_i64() {
        Some(size_mb) => FileSpec::Sized { path, size_mb },
        None => FileSpec::Malformed {
            path,
            reason: format!("size_mb must be a whole number of megabytes, got {}", size),
        },
    }
}

/// Parse manifest JSON text into file specs, in document order.
///
/// Only a document that is not a JSON array is an error; bad elements are
/// carried through as [`FileSpec::Malformed`].
pub fn parse_manifest(content: &str) -> Result<Vec<FileSpec>, FillError> {
    let entries: Vec<Value> = serde_json::from_str(content)
        .map_err(|e| FillError::InvalidSpec(format!("Failed to parse manifest: {}", e)))?;
    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| entry_to_spec(i + 1, entry))
        .collect())
}

/// Load file specs from a manifest file.
pub fn load_manifest(path: &Path) -> Result<Vec<FileSpec>, FillError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        FillError::InvalidSpec(format!(
            "Failed to read manifest {}: {}",
            path.display(),
            e
        ))
    })?;
    parse_manifest(&content)
}
