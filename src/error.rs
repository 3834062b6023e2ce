//! Error types for the ccr CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for ccr operations.
#[derive(Error, Debug)]
pub enum LaunchError {
    /// The coding-assistant executable could not be resolved before spawn.
    #[error(
        "Claude Code command not found: '{program}'\n\
         \n\
         Please do one of the following:\n\
         1. Install Claude Code globally:\n   \
            npm install -g @anthropic-ai/claude-code\n\
         \n\
         2. Or set CLAUDE_PATH in your config (~/.claude-code-router/config.json):\n   \
            \"CLAUDE_PATH\": \"/path/to/claude\"\n\
         \n\
         3. Or set the CLAUDE_PATH environment variable:\n   \
            export CLAUDE_PATH=/path/to/claude"
    )]
    ExecutableNotFound { program: String },

    /// The executable was found but the OS refused to start it.
    #[error(
        "Failed to start claude command '{program}': {source}\n\
         Make sure Claude Code is installed: npm install -g @anthropic-ai/claude-code"
    )]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// User provided invalid input or configuration.
    #[error("{0}")]
    UserError(String),

    /// The shared reference count could not be read or updated.
    #[error("Reference count update failed: {0}")]
    ReferenceCountError(String),

    /// The router service could not be stopped.
    #[error("Service shutdown failed: {0}")]
    ServiceError(String),
}

impl LaunchError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::ExecutableNotFound { .. }
            | LaunchError::SpawnFailed { .. }
            | LaunchError::UserError(_)
            | LaunchError::ReferenceCountError(_)
            | LaunchError::ServiceError(_) => exit_codes::FAILURE,
        }
    }
}

/// Result type alias for ccr operations.
pub type Result<T> = std::result::Result<T, LaunchError>;
