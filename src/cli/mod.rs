//! CLI argument parsing for ccr.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ccr: run the coding-assistant CLI through a local router service.
#[derive(Parser, Debug)]
#[command(name = "ccr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Router config file (default: ~/.claude-code-router/config.json).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for ccr.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the assistant pointed at the router.
    ///
    /// All remaining arguments are passed to the assistant unchanged,
    /// followed by a generated `--settings` flag.
    Code(CodeArgs),

    /// Stop the router service regardless of active sessions.
    Stop,
}

/// Arguments for the `code` command.
#[derive(Parser, Debug)]
pub struct CodeArgs {
    /// Arguments forwarded to the assistant.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
