//! Integration tests for volfill

mod cli_commands;
mod cli_parse;
mod generate_runs;
mod support;
