//! CLI subcommand implementations for the strategy-digest binary.

pub mod build_cmd;
pub mod output;
pub mod summary_cmd;
