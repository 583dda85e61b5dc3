//! Volfill: Placeholder Volume Synthesis
//!
//! Builds directory trees of placeholder files whose sizes add up to a
//! requested budget, filled with zeros or with repeated text fetched from
//! remote sources.

pub mod config;
pub mod content;
pub mod error;
pub mod logging;
pub mod materialize;
pub mod plan;
pub mod run;
pub mod tooling;
pub mod types;
pub mod warning;

pub use error::FillError;
pub use types::{Budget, FillMode};
