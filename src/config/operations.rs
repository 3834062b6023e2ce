//! Config loading operations.

use super::model::Config;
use crate::error::{LaunchError, Result};
use std::path::Path;
use tracing::{debug, warn};

impl Config {
    /// Load config from a JSON file.
    ///
    /// Unknown fields in the JSON are silently ignored.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded config
    /// * `Err(LaunchError::UserError)` - Read or parse error
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            LaunchError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_json(&content).map_err(|e| {
            LaunchError::UserError(format!("{} (in '{}')", e, path.display()))
        })
    }

    /// Load config, falling back to defaults when the file does not exist.
    ///
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            warn!(
                path = %path.display(),
                "config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "loading config");
        Self::load(path)
    }

    /// Parse config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| LaunchError::UserError(format!("failed to parse config JSON: {}", e)))
    }

    /// Serialize config to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            LaunchError::UserError(format!("failed to serialize config to JSON: {}", e))
        })
    }
}
