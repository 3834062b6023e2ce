//! Counter trait and its file-backed and in-memory implementations.

use crate::error::{LaunchError, Result};
use crate::fs::{atomic_write_file, remove_if_exists};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, warn};

/// A shared count of active dependent processes.
///
/// `increment` and `decrement` return the count after the update.
/// Decrementing at zero stays at zero.
pub trait ReferenceCounter {
    fn increment(&self) -> Result<u32>;

    fn decrement(&self) -> Result<u32>;

    fn count(&self) -> Result<u32>;

    /// Drop all references, e.g. after the service has been stopped.
    fn reset(&self) -> Result<()>;
}

/// Reference count stored as decimal text in a file.
///
/// A missing file reads as zero. Unparsable content also reads as zero, with
/// a warning, so a corrupted file never blocks a launch.
///
/// Updates are read-modify-write without a cross-process lock; concurrent
/// launchers starting in the same instant can lose an update.
#[derive(Debug, Clone)]
pub struct FileReferenceCount {
    path: PathBuf,
}

impl FileReferenceCount {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<u32> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(LaunchError::ReferenceCountError(format!(
                    "failed to read '{}': {}",
                    self.path.display(),
                    e
                )));
            }
        };

        match content.trim().parse::<u32>() {
            Ok(count) => Ok(count),
            Err(_) => {
                warn!(
                    path = %self.path.display(),
                    content = content.trim(),
                    "ignoring unparsable reference count"
                );
                Ok(0)
            }
        }
    }

    fn write(&self, count: u32) -> Result<()> {
        atomic_write_file(&self.path, &count.to_string())
            .map_err(|e| LaunchError::ReferenceCountError(e.to_string()))
    }
}

impl ReferenceCounter for FileReferenceCount {
    fn increment(&self) -> Result<u32> {
        let count = self.read()?.saturating_add(1);
        self.write(count)?;
        debug!(count, "reference count incremented");
        Ok(count)
    }

    fn decrement(&self) -> Result<u32> {
        let count = self.read()?.saturating_sub(1);
        self.write(count)?;
        debug!(count, "reference count decremented");
        Ok(count)
    }

    fn count(&self) -> Result<u32> {
        self.read()
    }

    fn reset(&self) -> Result<()> {
        remove_if_exists(&self.path)
            .map(|_| ())
            .map_err(|e| LaunchError::ReferenceCountError(e.to_string()))
    }
}

/// In-process reference count.
#[derive(Debug, Default)]
pub struct MemoryReferenceCount {
    count: AtomicU32,
}

impl MemoryReferenceCount {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReferenceCounter for MemoryReferenceCount {
    fn increment(&self) -> Result<u32> {
        Ok(self.count.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn decrement(&self) -> Result<u32> {
        let previous = self
            .count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |c| {
                Some(c.saturating_sub(1))
            })
            .unwrap_or_default();
        Ok(previous.saturating_sub(1))
    }

    fn count(&self) -> Result<u32> {
        Ok(self.count.load(Ordering::SeqCst))
    }

    fn reset(&self) -> Result<()> {
        self.count.store(0, Ordering::SeqCst);
        Ok(())
    }
}
