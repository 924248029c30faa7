//! Error types for the autoshell agent

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the autoshell agent
#[derive(Error, Debug)]
pub enum AgentError {
    /// Shell executable not found or could not be spawned
    #[error("Shell not available: {0}")]
    ShellNotFound(String),

    /// The shell process closed its output before the end-of-output sentinel
    #[error("Shell channel error: {0}")]
    ShellChannel(String),

    /// Chat-completions API returned a failure
    #[error("Model API error{}: {message}", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    Api {
        /// Error message
        message: String,
        /// HTTP status code, when the request reached the server
        status: Option<u16>,
    },

    /// HTTP transport error when calling the model collaborator
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON decode error when parsing an API response
    #[error("JSON decode error: {0}")]
    JsonDecode(#[from] serde_json::Error),

    /// A preprompt resource could not be loaded
    #[error("Failed to load preamble {}: {source}", .path.display())]
    Preamble {
        /// Path of the missing or unreadable resource
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Confirmation gate misuse or a dropped decision channel
    #[error("Confirmation gate error: {0}")]
    Gate(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Timeout error
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

impl AgentError {
    /// Create a shell-not-found error with installation guidance
    #[must_use]
    pub fn shell_not_found() -> Self {
        Self::ShellNotFound(
            "No usable shell found. Install bash or sh, \
             or point the agent at one explicitly via AgentOptions::shell_program"
                .to_string(),
        )
    }

    /// Create a shell channel error
    pub fn shell_channel(msg: impl Into<String>) -> Self {
        Self::ShellChannel(msg.into())
    }

    /// Create a model API error
    pub fn api(msg: impl Into<String>, status: Option<u16>) -> Self {
        Self::Api {
            message: msg.into(),
            status,
        }
    }

    /// Create a preamble load error
    pub fn preamble(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Preamble {
            path: path.into(),
            source,
        }
    }

    /// Create a gate error
    pub fn gate(msg: impl Into<String>) -> Self {
        Self::Gate(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Whether this error leaves the process unable to continue
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ShellNotFound(_) | Self::Preamble { .. })
    }
}
