//! ccr: run the coding-assistant CLI through a local router service.
//!
//! This is the main entry point for the `ccr` CLI. It parses arguments,
//! dispatches to the appropriate command handler, and turns the result into
//! the process exit code: the assistant's own code when it ran, or the
//! error's code otherwise.

mod cli;
mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod launcher;
mod logging;
pub mod refcount;
pub mod service;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse_args();

    match commands::dispatch(cli) {
        Ok(code) => ExitCode::from(to_exit_byte(code)),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(to_exit_byte(err.exit_code()))
        }
    }
}

/// Codes outside what a process can report are collapsed to a failure.
fn to_exit_byte(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(exit_codes::FAILURE as u8)
}
