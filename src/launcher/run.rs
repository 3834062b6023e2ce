//! Spawn-and-wait for the assistant process.

use super::executable::locate_executable;
use super::request::{LaunchRequest, StdioMode};
use crate::error::{LaunchError, Result};
use crate::exit_codes;
use crate::refcount::{ActiveReference, ReferenceCounter};
use crate::service::{ServiceControl, shutdown_best_effort};
use std::process::{Command, ExitStatus, Stdio};
use tracing::{debug, info, warn};

/// How the assistant process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOutcome {
    /// Exit code, if the process exited normally.
    pub exit_code: Option<i32>,
    /// Terminating signal, if the process was killed (Unix only).
    pub signal: Option<i32>,
}

impl LaunchOutcome {
    fn from_status(status: ExitStatus) -> Self {
        #[cfg(unix)]
        let signal = {
            use std::os::unix::process::ExitStatusExt;
            status.signal()
        };
        #[cfg(not(unix))]
        let signal = None;

        Self {
            exit_code: status.code(),
            signal,
        }
    }

    /// Exit code for the launcher itself: the child's code, or 0 if it
    /// reported none.
    pub fn process_exit_code(&self) -> i32 {
        self.exit_code.unwrap_or(exit_codes::SUCCESS)
    }
}

/// Run the assistant described by `request` to completion.
///
/// One reference is held on `references` from before the executable lookup
/// until the process ends, and is given back on every path. After a normal
/// close the router service is shut down on a best-effort basis.
///
/// # Errors
///
/// * `LaunchError::ExecutableNotFound` - lookup failed; nothing was spawned
/// * `LaunchError::SpawnFailed` - the OS could not start the process
pub fn launch(
    request: &LaunchRequest,
    references: &dyn ReferenceCounter,
    service: &dyn ServiceControl,
) -> Result<LaunchOutcome> {
    let reference = ActiveReference::acquire(references)?;

    // The file can still vanish before spawn; that surfaces as SpawnFailed.
    let program =
        locate_executable(&request.executable).ok_or_else(|| LaunchError::ExecutableNotFound {
            program: request.executable.clone(),
        })?;

    info!(
        program = %program.display(),
        args = request.args.len(),
        interactive = request.interactive,
        "launching assistant"
    );

    let mut command = Command::new(&program);
    command
        .args(&request.args)
        .envs(&request.env)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    match request.stdio_mode() {
        StdioMode::Inherit => command.stdin(Stdio::inherit()),
        StdioMode::ClosedStdin => command.stdin(Stdio::piped()),
    };

    let mut child = command.spawn().map_err(|e| LaunchError::SpawnFailed {
        program: request.executable.clone(),
        source: e,
    })?;
    debug!(pid = child.id(), "assistant started");

    // Dropping the pipe closes the child's stdin.
    drop(child.stdin.take());

    let status = child.wait().map_err(|e| {
        LaunchError::UserError(format!(
            "failed to wait for '{}': {}",
            request.executable, e
        ))
    })?;
    let outcome = LaunchOutcome::from_status(status);

    match (outcome.exit_code, outcome.signal) {
        (Some(code), _) => debug!(code, "assistant exited"),
        (None, Some(signal)) => warn!(signal, "assistant terminated by signal"),
        (None, None) => warn!("assistant exited without a status code"),
    }

    if let Err(e) = reference.release() {
        warn!(error = %e, "failed to release reference");
    }
    shutdown_best_effort(service, references);

    Ok(outcome)
}
