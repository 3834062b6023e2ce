//! Command implementations for ccr.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Each handler returns the process exit code on success.

mod code;
mod stop;

use crate::cli::{Cli, Command};
use crate::context::RouterContext;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<i32> {
    let ctx = RouterContext::resolve(cli.config)?;

    match cli.command {
        Command::Code(args) => code::cmd_code(&ctx, args),
        Command::Stop => stop::cmd_stop(&ctx),
    }
}
