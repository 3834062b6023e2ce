//! Config struct definition and effective-value accessors.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Port the router service listens on when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3456;

/// Auth token handed to the assistant when `APIKEY` is unset.
pub const DEFAULT_API_KEY: &str = "test";

/// Request timeout (10 minutes) when `API_TIMEOUT_MS` is unset.
pub const DEFAULT_API_TIMEOUT_MS: u64 = 600_000;

/// Launcher-relevant subset of the router configuration.
///
/// Field names follow the router's JSON keys. Values are stored as written;
/// use the accessor methods to get effective values with defaults applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Router listening port. `0` counts as unset.
    #[serde(
        rename = "PORT",
        deserialize_with = "number_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub port: Option<u16>,

    /// Token the assistant presents to the router. Empty counts as unset.
    #[serde(rename = "APIKEY", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in milliseconds. An explicit `0` is kept.
    #[serde(
        rename = "API_TIMEOUT_MS",
        deserialize_with = "number_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub api_timeout_ms: Option<u64>,

    #[serde(rename = "StatusLine", skip_serializing_if = "Option::is_none")]
    pub status_line: Option<StatusLineConfig>,

    /// Disable terminal-interactive behavior for unattended runs.
    #[serde(rename = "NON_INTERACTIVE_MODE", deserialize_with = "null_as_false")]
    pub non_interactive_mode: bool,

    #[serde(
        rename = "ANTHROPIC_SMALL_FAST_MODEL",
        skip_serializing_if = "Option::is_none"
    )]
    pub small_fast_model: Option<String>,

    /// Explicit path to the assistant executable.
    #[serde(rename = "CLAUDE_PATH", skip_serializing_if = "Option::is_none")]
    pub claude_path: Option<String>,
}

/// `StatusLine` section of the router configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusLineConfig {
    #[serde(deserialize_with = "null_as_false")]
    pub enabled: bool,
}

impl Config {
    /// Effective router port.
    pub fn port(&self) -> u16 {
        match self.port {
            Some(port) if port != 0 => port,
            _ => DEFAULT_PORT,
        }
    }

    /// Effective auth token.
    pub fn api_key(&self) -> &str {
        non_empty(self.api_key.as_deref()).unwrap_or(DEFAULT_API_KEY)
    }

    /// Effective request timeout in milliseconds.
    pub fn api_timeout_ms(&self) -> u64 {
        self.api_timeout_ms.unwrap_or(DEFAULT_API_TIMEOUT_MS)
    }

    pub fn status_line_enabled(&self) -> bool {
        self.status_line.as_ref().is_some_and(|s| s.enabled)
    }

    pub fn small_fast_model(&self) -> Option<&str> {
        non_empty(self.small_fast_model.as_deref())
    }

    pub fn claude_path(&self) -> Option<&str> {
        non_empty(self.claude_path.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Accept `8080`, `"8080"` or `null` for a numeric setting.
///
/// A blank string counts as unset. Anything else is rejected.
fn number_or_string<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64> + FromStr,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => T::try_from(n)
            .map(Some)
            .map_err(|_| D::Error::custom(format!("number {} is out of range", n))),
        Some(Raw::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<T>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("\"{}\" is not a valid number", text)))
        }
    }
}

/// Read a flag where `null` means off.
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}
