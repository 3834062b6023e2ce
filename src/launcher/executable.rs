//! Assistant executable resolution.

use crate::config::Config;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Executable name used when nothing else is configured.
pub const DEFAULT_EXECUTABLE: &str = "claude";

/// Pick the executable: config `CLAUDE_PATH`, then the `CLAUDE_PATH`
/// environment variable, then [`DEFAULT_EXECUTABLE`].
pub fn resolve_executable(config: &Config, env_override: Option<&str>) -> String {
    config
        .claude_path()
        .or(env_override.filter(|v| !v.is_empty()))
        .unwrap_or(DEFAULT_EXECUTABLE)
        .to_string()
}

/// Find `program` the way a shell would.
///
/// A value containing a path separator must name an executable file directly;
/// a bare name is searched for on `PATH`.
pub fn locate_executable(program: &str) -> Option<PathBuf> {
    locate_in(program, std::env::var_os("PATH").as_deref())
}

pub(crate) fn locate_in(program: &str, path_var: Option<&OsStr>) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }

    let candidate = Path::new(program);
    if has_separator(candidate) {
        return with_extensions(candidate)
            .into_iter()
            .find(|p| is_executable(p));
    }

    let path_var = path_var?;
    std::env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| with_extensions(&dir.join(program)))
        .find(|p| is_executable(p))
}

fn has_separator(path: &Path) -> bool {
    path.components().count() > 1 || path.is_absolute()
}

#[cfg(unix)]
fn with_extensions(path: &Path) -> Vec<PathBuf> {
    vec![path.to_path_buf()]
}

#[cfg(windows)]
fn with_extensions(path: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![path.to_path_buf()];
    if path.extension().is_none() {
        let pathext =
            std::env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
        for ext in pathext.split(';').filter(|e| !e.is_empty()) {
            let mut name = path.as_os_str().to_os_string();
            name.push(ext);
            candidates.push(PathBuf::from(name));
        }
    }
    candidates
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(windows)]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
