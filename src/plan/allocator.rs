//! Size Budget Allocation
//!
//! Explicit sizes are taken from the budget first; whatever remains is split
//! evenly across files without a size. The integer-division remainder is left
//! unallocated, so a run can fall short of the budget by up to `count - 1` bytes.

use crate::error::FillError;
use crate::plan::{sanitize_relative_path, FileSpec, ResolvedFile};
use crate::types::{mb_to_bytes, Budget, FLOOR_SIZE_BYTES};
use crate::warning::RunWarning;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Result of allocating a budget across specs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// One entry per valid spec, in input order
    pub files: Vec<ResolvedFile>,
    pub budget: Budget,
    /// Sum of explicit sizes
    pub specified_bytes: u64,
    /// Bytes each unspecified file received, if any
    pub per_file_bytes: Option<u64>,
    pub warnings: Vec<RunWarning>,
}

impl Allocation {
    /// Sum of planned sizes, saturating at `u64::MAX`.
    pub fn total_bytes(&self) -> u64 {
        self.files
            .iter()
            .fold(0u64, |acc, f| acc.saturating_add(f.size_bytes))
    }
}

/// Intermediate per-spec state between validation and sizing
enum Slot {
    Explicit(PathBuf, u64),
    Unspecified(PathBuf),
}

/// Resolves file specs against a total byte budget
pub struct SizeBudgetAllocator;

impl SizeBudgetAllocator {
    /// Allocate `budget` across `specs`.
    ///
    /// Later specs naming an already planned path are dropped. Returns
    /// [`FillError::EmptyInput`] when no spec survives validation.
    pub fn allocate(specs: &[FileSpec], budget: Budget) -> Result<Allocation, FillError> {
        let mut warnings = Vec::new();
        let mut slots = Vec::with_capacity(specs.len());
        let mut seen = HashSet::new();

        for spec in specs {
            if let Some(slot) = Self::validate(spec, &mut seen, &mut warnings) {
                slots.push(slot);
            }
        }

        if slots.is_empty() {
            return Err(FillError::EmptyInput);
        }

        let specified_bytes = slots
            .iter()
            .map(|slot| match slot {
                Slot::Explicit(_, bytes) => *bytes,
                Slot::Unspecified(_) => 0,
            })
            .fold(0u64, |acc, bytes| acc.saturating_add(bytes));
        let unspecified = slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Unspecified(_)))
            .count();

        let per_file_bytes = if unspecified == 0 {
            None
        } else if specified_bytes >= budget.total_bytes {
            warn!(
                specified_bytes,
                budget_bytes = budget.total_bytes,
                floored_files = unspecified,
                "Explicit sizes exhaust the budget; unspecified files get the floor size"
            );
            warnings.push(RunWarning::BudgetExhausted {
                specified_bytes,
                budget_bytes: budget.total_bytes,
                floored_files: unspecified,
            });
            Some(FLOOR_SIZE_BYTES)
        } else {
            let remaining = budget.total_bytes - specified_bytes;
            Some(remaining / unspecified as u64)
        };

        debug!(
            files = slots.len(),
            unspecified,
            specified_bytes,
            per_file_bytes = per_file_bytes.unwrap_or(0),
            "Allocated budget"
        );

        let files = slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Explicit(path, size_bytes) => ResolvedFile {
                    path,
                    size_bytes,
                    explicit: true,
                },
                Slot::Unspecified(path) => ResolvedFile {
                    path,
                    size_bytes: per_file_bytes.unwrap_or(FLOOR_SIZE_BYTES),
                    explicit: false,
                },
            })
            .collect();

        Ok(Allocation {
            files,
            budget,
            specified_bytes,
            per_file_bytes,
            warnings,
        })
    }

    fn validate(
        spec: &FileSpec,
        seen: &mut HashSet<PathBuf>,
        warnings: &mut Vec<RunWarning>,
    ) -> Option<Slot> {
        let raw_path = spec.path();
        let path = match sanitize_relative_path(raw_path) {
            Ok(path) => path,
            Err(reason) => {
                let reason = match spec {
                    FileSpec::Malformed { reason, .. } if raw_path.trim().is_empty() => {
                        reason.clone()
                    }
                    _ => reason,
                };
                Self::drop_spec(raw_path, reason, warnings);
                return None;
            }
        };

        if !seen.insert(path.clone()) {
            Self::drop_spec(raw_path, format!("duplicate path {}", path.display()), warnings);
            return None;
        }

        let reason = match spec {
            FileSpec::Path(_) => return Some(Slot::Unspecified(path)),
            FileSpec::Malformed { reason, .. } => reason.clone(),
            FileSpec::Sized { size_mb, .. } if *size_mb <= 0 => {
                format!("size must be positive, got {} MB", size_mb)
            }
            FileSpec::Sized { size_mb, .. } => match mb_to_bytes(*size_mb as u64) {
                Some(bytes) => return Some(Slot::Explicit(path, bytes)),
                None => format!("size of {} MB overflows a byte count", size_mb),
            },
        };

        warn!(path = raw_path, %reason, "Treating file spec as unspecified size");
        warnings.push(RunWarning::InvalidSpec {
            path: raw_path.to_string(),
            reason,
            dropped: false,
        });
        Some(Slot::Unspecified(path))
    }

    fn drop_spec(raw_path: &str, reason: String, warnings: &mut Vec<RunWarning>) {
        warn!(path = raw_path, %reason, "Dropping invalid file spec");
        warnings.push(RunWarning::InvalidSpec {
            path: raw_path.to_string(),
            reason,
            dropped: true,
        });
    }
}
