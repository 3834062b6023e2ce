//! Launching the coding-assistant CLI against the local router.
//!
//! This module provides:
//!
//! - **Request**: the environment, `--settings` flag and stdio mode derived
//!   from configuration and caller arguments
//! - **Executable**: resolving and locating the assistant executable
//! - **Run**: spawn-and-wait with reference counting and service shutdown
//!
//! Every terminal outcome (executable missing, spawn failure, child exit) is
//! handled on the single control path of [`launch`].

mod executable;
mod request;
mod run;


// Re-export public API
pub use executable::{DEFAULT_EXECUTABLE, locate_executable, resolve_executable};
pub use request::{LaunchRequest, Settings, StatusLineSettings, StdioMode};
pub use run::{LaunchOutcome, launch};
