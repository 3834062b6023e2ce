//! Filesystem helpers for ccr's small state files.
//!
//! Writes go to a uniquely named `.{filename}.XXXXXX.tmp` in the target
//! directory and are renamed into place, so a concurrent reader sees either the
//! old or the new content and concurrent writers never share a temp file.

use crate::error::{LaunchError, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::Builder;

/// Atomically replace `path` with `content`, creating parent directories.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent).map_err(|e| {
            LaunchError::UserError(format!(
                "failed to create parent directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let filename = path.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
        LaunchError::UserError(format!("invalid file path '{}'", path.display()))
    })?;

    // Created exclusively under a random name, so symlinks are never followed.
    let mut temp = Builder::new()
        .prefix(&format!(".{}.", filename))
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|e| {
            LaunchError::UserError(format!(
                "failed to create temporary file in '{}': {}",
                parent.display(),
                e
            ))
        })?;

    temp.write_all(content.as_bytes())
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| LaunchError::UserError(format!("failed to write temporary file: {}", e)))?;

    // The temp file is deleted on drop if persisting fails.
    temp.persist(path).map_err(|e| {
        LaunchError::UserError(format!(
            "failed to atomically replace '{}': {}",
            path.display(),
            e.error
        ))
    })?;

    Ok(())
}

/// Remove a file, treating "already gone" as success.
///
/// Returns whether a file was actually removed.
pub fn remove_if_exists<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(LaunchError::UserError(format!(
            "failed to remove '{}': {}",
            path.display(),
            e
        ))),
    }
}
