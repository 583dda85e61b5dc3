//! Recoverable conditions recorded during a run.

use serde::{Deserialize, Serialize};

/// A condition the run absorbed instead of failing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunWarning {
    /// Spec entry was demoted to unspecified size or dropped
    InvalidSpec {
        path: String,
        reason: String,
        dropped: bool,
    },
    /// Explicit sizes consumed the whole budget; unspecified files got the floor size
    BudgetExhausted {
        specified_bytes: u64,
        budget_bytes: u64,
        floored_files: usize,
    },
    /// One text source failed and was skipped
    FetchFailure { url: String, reason: String },
    /// No text source succeeded; the run fell back to zero fill
    NoContentFetched { attempted: usize },
}

impl std::fmt::Display for RunWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunWarning::InvalidSpec {
                path,
                reason,
                dropped,
            } => {
                let action = if *dropped {
                    "dropped"
                } else {
                    "size ignored"
                };
                write!(f, "spec '{}' {}: {}", path, action, reason)
            }
            RunWarning::BudgetExhausted {
                specified_bytes,
                budget_bytes,
                floored_files,
            } => write!(
                f,
                "explicit sizes ({} bytes) exhaust the budget ({} bytes); {} file(s) created with 1 byte",
                specified_bytes, budget_bytes, floored_files
            ),
            RunWarning::FetchFailure { url, reason } => {
                write!(f, "text source {} skipped: {}", url, reason)
            }
            RunWarning::NoContentFetched { attempted } => write!(
                f,
                "no content fetched from {} source(s); using zero fill",
                attempted
            ),
        }
    }
}
