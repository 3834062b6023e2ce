//! Launch request construction.

use super::executable::resolve_executable;
use crate::config::Config;
use crate::error::{LaunchError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Loopback host the router service listens on.
pub const LOOPBACK_HOST: &str = "127.0.0.1";

/// Command the assistant runs to render its status line.
pub const STATUS_LINE_COMMAND: &str = "ccr statusline";

/// Flag carrying the serialized [`Settings`].
pub const SETTINGS_FLAG: &str = "--settings";

/// How the child's standard streams are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdioMode {
    /// stdin, stdout and stderr are all inherited.
    Inherit,
    /// stdin is a pipe that is closed right after spawn; stdout and stderr
    /// are inherited.
    ClosedStdin,
}

/// Settings object passed to the assistant as `--settings <json>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub env: BTreeMap<String, String>,

    #[serde(rename = "statusLine", skip_serializing_if = "Option::is_none")]
    pub status_line: Option<StatusLineSettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusLineSettings {
    #[serde(rename = "type")]
    pub kind: String,
    pub command: String,
    pub padding: u32,
}

impl StatusLineSettings {
    fn router_command() -> Self {
        Self {
            kind: "command".to_string(),
            command: STATUS_LINE_COMMAND.to_string(),
            padding: 0,
        }
    }
}

/// Everything needed to spawn the assistant once.
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    /// Caller arguments followed by `--settings <json>`.
    pub args: Vec<String>,
    pub port: u16,
    pub auth_token: String,
    pub base_url: String,
    pub timeout_ms: u64,
    pub executable: String,
    pub interactive: bool,

    /// Variables layered over the parent environment for the child.
    pub env: BTreeMap<String, String>,

    /// The object serialized into the settings flag.
    pub settings: Settings,
}

impl LaunchRequest {
    /// Build a request from configuration and caller arguments.
    ///
    /// `env_claude_path` is the value of the `CLAUDE_PATH` environment
    /// variable, consulted when the config does not name an executable.
    pub fn from_config(
        config: &Config,
        caller_args: Vec<String>,
        env_claude_path: Option<&str>,
    ) -> Result<Self> {
        let port = config.port();
        let auth_token = config.api_key().to_string();
        let base_url = format!("http://{}:{}", LOOPBACK_HOST, port);
        let timeout_ms = config.api_timeout_ms();

        let mut env = BTreeMap::new();
        env.insert("ANTHROPIC_AUTH_TOKEN".to_string(), auth_token.clone());
        env.insert("ANTHROPIC_API_KEY".to_string(), String::new());
        env.insert("ANTHROPIC_BASE_URL".to_string(), base_url.clone());
        env.insert("NO_PROXY".to_string(), LOOPBACK_HOST.to_string());
        env.insert("DISABLE_TELEMETRY".to_string(), "true".to_string());
        env.insert("DISABLE_COST_WARNINGS".to_string(), "true".to_string());
        env.insert("API_TIMEOUT_MS".to_string(), timeout_ms.to_string());

        let settings = Settings {
            env: env.clone(),
            status_line: config
                .status_line_enabled()
                .then(StatusLineSettings::router_command),
        };

        let settings_json = serde_json::to_string(&settings).map_err(|e| {
            LaunchError::UserError(format!("failed to serialize settings: {}", e))
        })?;

        let mut args = caller_args;
        args.push(SETTINGS_FLAG.to_string());
        args.push(settings_json);

        // Child-only variables; the serialized settings above do not carry them.
        let interactive = !config.non_interactive_mode;
        if !interactive {
            for (key, value) in [
                ("CI", "true"),
                ("FORCE_COLOR", "0"),
                ("NODE_NO_READLINE", "1"),
                ("TERM", "dumb"),
            ] {
                env.insert(key.to_string(), value.to_string());
            }
        }

        if let Some(model) = config.small_fast_model() {
            env.insert("ANTHROPIC_SMALL_FAST_MODEL".to_string(), model.to_string());
        }

        Ok(Self {
            args,
            port,
            auth_token,
            base_url,
            timeout_ms,
            executable: resolve_executable(config, env_claude_path),
            interactive,
            env,
            settings,
        })
    }

    pub fn stdio_mode(&self) -> StdioMode {
        if self.interactive {
            StdioMode::Inherit
        } else {
            StdioMode::ClosedStdin
        }
    }

    /// The JSON value following `--settings` in [`args`](Self::args).
    pub fn settings_json(&self) -> Option<&str> {
        let flag = self.args.iter().rposition(|a| a == SETTINGS_FLAG)?;
        self.args.get(flag + 1).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatusLineConfig;
    use serde_json::{Value, json};

    fn request(config: &Config) -> LaunchRequest {
        LaunchRequest::from_config(config, vec![], None).unwrap()
    }

    fn settings_value(req: &LaunchRequest) -> Value {
        serde_json::from_str(req.settings_json().unwrap()).unwrap()
    }

    #[test]
    fn test_defaults() {
        let req = request(&Config::default());

        assert_eq!(req.port, 3456);
        assert_eq!(req.base_url, "http://127.0.0.1:3456");
        assert_eq!(req.auth_token, "test");
        assert_eq!(req.timeout_ms, 600_000);
        assert_eq!(req.executable, "claude");
        assert!(req.interactive);
        assert_eq!(req.stdio_mode(), StdioMode::Inherit);

        assert_eq!(req.env["ANTHROPIC_AUTH_TOKEN"], "test");
        assert_eq!(req.env["ANTHROPIC_API_KEY"], "");
        assert_eq!(req.env["ANTHROPIC_BASE_URL"], "http://127.0.0.1:3456");
        assert_eq!(req.env["NO_PROXY"], "127.0.0.1");
        assert_eq!(req.env["DISABLE_TELEMETRY"], "true");
        assert_eq!(req.env["DISABLE_COST_WARNINGS"], "true");
        assert_eq!(req.env["API_TIMEOUT_MS"], "600000");
        assert_eq!(req.env.len(), 7);
    }

    #[test]
    fn test_configured_values() {
        let config = Config {
            port: Some(8081),
            api_key: Some("secret".to_string()),
            api_timeout_ms: Some(1234),
            ..Default::default()
        };
        let req = request(&config);

        assert_eq!(req.env["ANTHROPIC_BASE_URL"], "http://127.0.0.1:8081");
        assert_eq!(req.env["ANTHROPIC_AUTH_TOKEN"], "secret");
        assert_eq!(req.env["API_TIMEOUT_MS"], "1234");
    }

    #[test]
    fn test_api_key_env_is_always_empty() {
        let config = Config {
            api_key: Some("secret".to_string()),
            non_interactive_mode: true,
            small_fast_model: Some("haiku".to_string()),
            ..Default::default()
        };
        let req = request(&config);

        assert_eq!(req.env["ANTHROPIC_API_KEY"], "");
        assert_eq!(req.settings.env["ANTHROPIC_API_KEY"], "");
    }

    #[test]
    fn test_settings_flag_is_appended_after_caller_args() {
        let args = vec!["-p".to_string(), "explain this".to_string()];
        let req = LaunchRequest::from_config(&Config::default(), args, None).unwrap();

        assert_eq!(req.args.len(), 4);
        assert_eq!(req.args[0], "-p");
        assert_eq!(req.args[1], "explain this");
        assert_eq!(req.args[2], "--settings");

        let value = settings_value(&req);
        assert_eq!(value["env"]["ANTHROPIC_BASE_URL"], "http://127.0.0.1:3456");
        assert_eq!(value["env"].as_object().unwrap().len(), 7);
    }

    #[test]
    fn test_status_line_enabled() {
        let config = Config {
            status_line: Some(StatusLineConfig { enabled: true }),
            ..Default::default()
        };
        let value = settings_value(&request(&config));

        assert_eq!(
            value["statusLine"],
            json!({ "type": "command", "command": "ccr statusline", "padding": 0 })
        );
    }

    #[test]
    fn test_status_line_disabled_or_absent_is_omitted() {
        let disabled = Config {
            status_line: Some(StatusLineConfig { enabled: false }),
            ..Default::default()
        };

        for config in [Config::default(), disabled] {
            let value = settings_value(&request(&config));
            assert!(value.get("statusLine").is_none());
        }
    }

    #[test]
    fn test_non_interactive_mode() {
        let config = Config {
            non_interactive_mode: true,
            ..Default::default()
        };
        let req = request(&config);

        assert!(!req.interactive);
        assert_eq!(req.stdio_mode(), StdioMode::ClosedStdin);
        assert_eq!(req.env["CI"], "true");
        assert_eq!(req.env["FORCE_COLOR"], "0");
        assert_eq!(req.env["NODE_NO_READLINE"], "1");
        assert_eq!(req.env["TERM"], "dumb");

        // Terminal markers go to the child environment only.
        let value = settings_value(&req);
        assert!(value["env"].get("CI").is_none());
        assert!(value["env"].get("TERM").is_none());
    }

    #[test]
    fn test_interactive_mode_sets_no_terminal_markers() {
        let req = request(&Config::default());

        for key in ["CI", "FORCE_COLOR", "NODE_NO_READLINE", "TERM"] {
            assert!(!req.env.contains_key(key), "{} should be unset", key);
        }
    }

    #[test]
    fn test_small_fast_model() {
        let config = Config {
            small_fast_model: Some("claude-3-5-haiku".to_string()),
            ..Default::default()
        };
        let req = request(&config);

        assert_eq!(req.env["ANTHROPIC_SMALL_FAST_MODEL"], "claude-3-5-haiku");
        assert!(!req.settings.env.contains_key("ANTHROPIC_SMALL_FAST_MODEL"));

        let req = request(&Config::default());
        assert!(!req.env.contains_key("ANTHROPIC_SMALL_FAST_MODEL"));
    }

    #[test]
    fn test_executable_from_env_override() {
        let req =
            LaunchRequest::from_config(&Config::default(), vec![], Some("/opt/claude")).unwrap();
        assert_eq!(req.executable, "/opt/claude");
    }

    #[test]
    fn test_settings_json_uses_last_flag() {
        // A caller-supplied --settings is kept; the generated one comes last.
        let args = vec!["--settings".to_string(), "{}".to_string()];
        let req = LaunchRequest::from_config(&Config::default(), args, None).unwrap();

        assert_eq!(req.args[1], "{}");
        assert!(req.settings_json().unwrap().contains("ANTHROPIC_BASE_URL"));
    }
}
