//! Best-effort shutdown of the router service.
//!
//! The router records its PID in `~/.claude-code-router/.claude-code-router.pid`.
//! Shutting it down means signalling that PID and clearing the PID file and the
//! shared reference count, unless other launcher sessions still hold references.

use crate::error::{LaunchError, Result};
use crate::fs::remove_if_exists;
use crate::refcount::ReferenceCounter;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What a shutdown request ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Other sessions still hold this many references; nothing was touched.
    InUse(u32),
    /// No live service was found. Any stale PID file was removed.
    NotRunning,
    /// The service process was signalled.
    Stopped { pid: u32 },
}

/// Something that can stop the router service.
pub trait ServiceControl {
    /// Stop the service.
    ///
    /// Without `force`, the service is left running while `references` is
    /// above zero.
    fn shutdown(&self, references: &dyn ReferenceCounter, force: bool)
    -> Result<ShutdownOutcome>;
}

/// Service control through the router's PID file.
#[derive(Debug, Clone)]
pub struct PidFileService {
    pid_file: PathBuf,
}

impl PidFileService {
    pub fn new<P: AsRef<Path>>(pid_file: P) -> Self {
        Self {
            pid_file: pid_file.as_ref().to_path_buf(),
        }
    }

    /// PID recorded in the PID file, if there is a usable one.
    pub fn recorded_pid(&self) -> Result<Option<u32>> {
        let content = match std::fs::read_to_string(&self.pid_file) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(LaunchError::ServiceError(format!(
                    "failed to read PID file '{}': {}",
                    self.pid_file.display(),
                    e
                )));
            }
        };

        // Zero and values outside i32 would address process groups when signalled.
        Ok(content
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|&pid| pid != 0 && i32::try_from(pid).is_ok()))
    }

    fn remove_pid_file(&self) -> Result<()> {
        remove_if_exists(&self.pid_file)
            .map(|_| ())
            .map_err(|e| LaunchError::ServiceError(e.to_string()))
    }
}

impl ServiceControl for PidFileService {
    fn shutdown(
        &self,
        references: &dyn ReferenceCounter,
        force: bool,
    ) -> Result<ShutdownOutcome> {
        if !force {
            let count = references.count()?;
            if count > 0 {
                debug!(count, "service still in use, leaving it running");
                return Ok(ShutdownOutcome::InUse(count));
            }
        }

        let pid = match self.recorded_pid()? {
            Some(pid) if process_exists(pid) => pid,
            stale => {
                if let Some(pid) = stale {
                    debug!(pid, "removing stale PID file");
                }
                self.remove_pid_file()?;
                return Ok(ShutdownOutcome::NotRunning);
            }
        };

        terminate(pid)?;
        info!(pid, "router service stopped");

        self.remove_pid_file()?;
        references.reset()?;
        Ok(ShutdownOutcome::Stopped { pid })
    }
}

/// Shut the service down, logging instead of failing.
///
/// Used after a child process exits, where a shutdown problem must not change
/// the exit code.
pub fn shutdown_best_effort(service: &dyn ServiceControl, references: &dyn ReferenceCounter) {
    match service.shutdown(references, false) {
        Ok(outcome) => debug!(?outcome, "service shutdown finished"),
        Err(e) => warn!(error = %e, "service shutdown failed"),
    }
}

#[cfg(unix)]
fn process_exists(pid: u32) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    match kill(Pid::from_raw(pid as i32), None) {
        Ok(()) => true,
        Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

#[cfg(unix)]
fn terminate(pid: u32) -> Result<()> {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    kill(Pid::from_raw(pid as i32), Signal::SIGTERM).map_err(|e| {
        LaunchError::ServiceError(format!("failed to signal process {}: {}", pid, e))
    })
}

#[cfg(windows)]
fn process_exists(_pid: u32) -> bool {
    // taskkill reports a missing process itself.
    true
}

#[cfg(windows)]
fn terminate(pid: u32) -> Result<()> {
    let output = std::process::Command::new("taskkill")
        .args(["/PID", &pid.to_string(), "/F"])
        .output()
        .map_err(|e| LaunchError::ServiceError(format!("failed to run taskkill: {}", e)))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(LaunchError::ServiceError(format!(
            "taskkill failed for process {}: {}",
            pid,
            String::from_utf8_lossy(&output.stderr).trim()
        )))
    }
}
