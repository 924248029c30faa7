//! Agent options and configuration
//!
//! This module contains the main configuration options for the agent,
//! including a builder pattern for easy configuration. Defaults reproduce
//! the stock behavior: confirm-before-execute on, 16384-token budget with a
//! 2000-token reserve, 1000-token shell output cap.

use std::path::PathBuf;
use std::time::Duration;

/// Main options for the autoshell agent
#[derive(Debug, Clone)]
pub struct AgentOptions {
    /// Model used for conversation turns
    pub model: String,
    /// Model used for routing classification
    pub router_model: String,
    /// Sampling temperature for both models
    pub temperature: f32,
    /// Maximum reply tokens for a conversation turn
    pub max_reply_tokens: u32,
    /// Maximum reply tokens for a classification call
    pub classify_max_tokens: u32,
    /// Session token budget (the model's context size)
    pub token_budget: usize,
    /// Tokens held back from the budget before forcing a reset
    pub token_reserve: usize,
    /// Token cap applied to shell output folded into the session
    pub output_token_cap: usize,
    /// Whether shell commands require user confirmation before execution
    pub confirm_before_execute: bool,
    /// Whether the session carries over between utterances
    pub follow_up_questions: bool,
    /// Maximum consecutive shell executions per utterance
    pub max_command_chain: usize,
    /// Shell executable; discovered via PATH lookup when `None`
    pub shell_program: Option<PathBuf>,
    /// Directory holding the preprompt resources
    pub prompt_dir: PathBuf,
    /// Directory receiving transcripts and chat dumps
    pub log_dir: PathBuf,
    /// Deadline for draining one command's output; `None` waits indefinitely
    pub shell_read_deadline: Option<Duration>,
    /// Deadline for a confirmation decision; `None` waits indefinitely
    pub decision_timeout: Option<Duration>,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo-16k".to_string(),
            router_model: "gpt-3.5-turbo".to_string(),
            temperature: 1.01,
            max_reply_tokens: 1000,
            classify_max_tokens: 5,
            token_budget: 16384,
            token_reserve: 2000,
            output_token_cap: 1000,
            confirm_before_execute: true,
            follow_up_questions: false,
            max_command_chain: 8,
            shell_program: None,
            prompt_dir: PathBuf::from("files"),
            log_dir: PathBuf::from("logs"),
            shell_read_deadline: None,
            decision_timeout: None,
        }
    }
}

impl AgentOptions {
    /// Create a new builder for `AgentOptions`
    #[must_use]
    pub fn builder() -> AgentOptionsBuilder {
        AgentOptionsBuilder::default()
    }

    /// Budget threshold past which the session resets
    #[must_use]
    pub fn budget_threshold(&self) -> usize {
        self.token_budget.saturating_sub(self.token_reserve)
    }
}

/// Builder for `AgentOptions`
#[derive(Debug, Default)]
pub struct AgentOptionsBuilder {
    options: AgentOptions,
}

impl AgentOptionsBuilder {
    /// Set the conversation model
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.options.model = model.into();
        self
    }

    /// Set the classification model
    #[must_use]
    pub fn router_model(mut self, model: impl Into<String>) -> Self {
        self.options.router_model = model.into();
        self
    }

    /// Set the sampling temperature
    #[must_use]
    pub const fn temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = temperature;
        self
    }

    /// Set the session token budget and reserve
    ///
    /// # Panics
    /// Panics if the reserve is not smaller than the budget
    #[must_use]
    pub fn token_budget(mut self, budget: usize, reserve: usize) -> Self {
        assert!(
            reserve < budget,
            "token reserve {reserve} must be smaller than budget {budget}"
        );
        self.options.token_budget = budget;
        self.options.token_reserve = reserve;
        self
    }

    /// Set the shell output token cap
    #[must_use]
    pub const fn output_token_cap(mut self, cap: usize) -> Self {
        self.options.output_token_cap = cap;
        self
    }

    /// Enable or disable confirm-before-execute
    #[must_use]
    pub const fn confirm_before_execute(mut self, confirm: bool) -> Self {
        self.options.confirm_before_execute = confirm;
        self
    }

    /// Enable or disable follow-up questions
    #[must_use]
    pub const fn follow_up_questions(mut self, follow_up: bool) -> Self {
        self.options.follow_up_questions = follow_up;
        self
    }

    /// Bound the number of consecutive shell executions per utterance
    #[must_use]
    pub const fn max_command_chain(mut self, max: usize) -> Self {
        self.options.max_command_chain = max;
        self
    }

    /// Set an explicit shell executable
    #[must_use]
    pub fn shell_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.options.shell_program = Some(program.into());
        self
    }

    /// Set the preprompt directory
    #[must_use]
    pub fn prompt_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.prompt_dir = dir.into();
        self
    }

    /// Set the transcript/log directory
    #[must_use]
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.log_dir = dir.into();
        self
    }

    /// Bound the shell output drain with a deadline
    #[must_use]
    pub const fn shell_read_deadline(mut self, deadline: Duration) -> Self {
        self.options.shell_read_deadline = Some(deadline);
        self
    }

    /// Bound the confirmation wait with a timeout
    #[must_use]
    pub const fn decision_timeout(mut self, timeout: Duration) -> Self {
        self.options.decision_timeout = Some(timeout);
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> AgentOptions {
        self.options
    }
}
