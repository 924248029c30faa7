//! Message-related type definitions
//!
//! This module contains the conversation data model. A session history is an
//! ordered sequence of [`Message`]s; the ordering is semantically significant
//! because the serialized history IS the prompt sent to the model.

use serde::{Deserialize, Serialize};

/// Speaker role of a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// System preamble seeding the conversation
    System,
    /// Text entered (or spoken) by the user
    User,
    /// Reply generated by the model
    Assistant,
    /// Shell output folded back into the history
    SystemOutput,
}

impl Role {
    /// Name used in chat dumps and displays
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::SystemOutput => "system-output",
        }
    }

    /// Role name on the chat-completions wire
    ///
    /// The API knows no dedicated role for command output; shell results are
    /// presented to the model as `system` messages.
    #[must_use]
    pub fn api_str(self) -> &'static str {
        match self {
            Self::System | Self::SystemOutput => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One conversation message, immutable once created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Speaker role
    pub role: Role,
    /// Message text
    pub content: String,
}

impl Message {
    /// Create a message with an explicit role
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create a shell-output message
    pub fn system_output(content: impl Into<String>) -> Self {
        Self::new(Role::SystemOutput, content)
    }
}
