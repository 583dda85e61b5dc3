//! Core types and size units shared across volfill.

use serde::{Deserialize, Serialize};

/// Bytes in one megabyte (binary, 2^20)
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Bytes in one gigabyte (binary, 2^30)
pub const BYTES_PER_GB: u64 = 1024 * 1024 * 1024;

/// Size given to unspecified files when explicit sizes exhaust the budget
pub const FLOOR_SIZE_BYTES: u64 = 1;

/// Convert megabytes to bytes, `None` on overflow.
pub fn mb_to_bytes(mb: u64) -> Option<u64> {
    mb.checked_mul(BYTES_PER_MB)
}

/// Total byte target for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub total_bytes: u64,
}

impl Budget {
    pub fn from_bytes(total_bytes: u64) -> Self {
        Self { total_bytes }
    }

    /// Budget of `gb` binary gigabytes; saturates at `u64::MAX`.
    pub fn from_gb(gb: u64) -> Self {
        Self {
            total_bytes: gb.saturating_mul(BYTES_PER_GB),
        }
    }
}

/// Where file bytes come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// Zero bytes
    Zero,
    /// Repeated text fetched from remote sources
    Text,
}

impl std::fmt::Display for FillMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FillMode::Zero => write!(f, "zero"),
            FillMode::Text => write!(f, "text"),
        }
    }
}

/// Human-readable binary size, e.g. `3.50 GiB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}
