//! Tooling & Integration Layer
//!
//! Command-line entry points on top of the planning and generation engine.

pub mod cli;

pub use cli::{Cli, CliContext, Commands, PlanArgs};
