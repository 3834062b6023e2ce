//! Router home directory resolution for ccr.
//!
//! Every file ccr reads or writes is derived from here: the router config
//! under `~/.claude-code-router/`, the router service PID file next to it,
//! and the shared reference count file in the system temp directory.

use crate::error::{LaunchError, Result};
use std::path::{Path, PathBuf};

/// Router home directory name under the user's home directory.
pub const ROUTER_HOME_DIR: &str = ".claude-code-router";

/// Config file name inside the router home.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// PID file written by the router service.
pub const PID_FILE_NAME: &str = ".claude-code-router.pid";

/// Reference count file shared by concurrent launchers.
pub const REFERENCE_COUNT_FILE_NAME: &str = "claude-code-reference-count.txt";

/// Resolved paths used by ccr.
///
/// All paths are absolute.
#[derive(Debug, Clone)]
pub struct RouterContext {
    /// `~/.claude-code-router/`
    pub home_dir: PathBuf,

    /// Config file to load. Defaults to `{home_dir}/config.json`.
    pub config_path: PathBuf,

    /// `{home_dir}/.claude-code-router.pid`
    pub pid_file: PathBuf,

    /// `{temp_dir}/claude-code-reference-count.txt`
    pub reference_count_file: PathBuf,
}

impl RouterContext {
    /// Resolve the context from the current user's home directory.
    ///
    /// `config_override` replaces the default config file location.
    pub fn resolve(config_override: Option<PathBuf>) -> Result<Self> {
        let user_home = dirs::home_dir().ok_or_else(|| {
            LaunchError::UserError("could not resolve the user's home directory".to_string())
        })?;

        let mut ctx = Self::from_home(user_home.join(ROUTER_HOME_DIR), std::env::temp_dir());
        if let Some(path) = config_override {
            ctx.config_path = path;
        }
        Ok(ctx)
    }

    /// Build a context rooted at explicit directories.
    pub fn from_home<P: AsRef<Path>, T: AsRef<Path>>(home_dir: P, temp_dir: T) -> Self {
        let home_dir = home_dir.as_ref().to_path_buf();
        Self {
            config_path: home_dir.join(CONFIG_FILE_NAME),
            pid_file: home_dir.join(PID_FILE_NAME),
            reference_count_file: temp_dir.as_ref().join(REFERENCE_COUNT_FILE_NAME),
            home_dir,
        }
    }
}
