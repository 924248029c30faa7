//! # Autoshell
//!
//! A conversational agent that mediates between a language-model service
//! and a persistent command shell. Each model turn is classified as either
//! user-facing speech or an executable command; commands are gated behind an
//! explicit confirmation step, executed over a long-lived shell process, and
//! their output is fed back to the model.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use autoshell::{
//!     AgentOptions, ConfirmationGate, OpenAiModel, Orchestrator, PrepromptStore, Router,
//!     SamplingParams, Session, SessionId, ShellChannel, TerminalUi, TranscriptLog,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = AgentOptions::default();
//!     let model = Arc::new(OpenAiModel::try_from_env()?);
//!     let preprompts = PrepromptStore::new(&options.prompt_dir);
//!
//!     let session = Session::new(
//!         preprompts.clone(),
//!         options.token_budget,
//!         options.token_reserve,
//!     )?;
//!     let router = Router::new(
//!         model.clone(),
//!         preprompts,
//!         options.router_model.clone(),
//!         SamplingParams::new(options.temperature, options.classify_max_tokens),
//!     )?;
//!     let shell = ShellChannel::spawn(options.shell_program.clone(), None)?;
//!     let transcript = TranscriptLog::new(&options.log_dir, SessionId::generate())?;
//!     let gate = Arc::new(ConfirmationGate::new());
//!
//!     let mut orchestrator = Orchestrator::new(
//!         session, router, model, gate, shell, transcript, TerminalUi::new(), options,
//!     );
//!     orchestrator.handle_utterance("list the files in my home directory").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`session`]: ordered conversation history with token accounting and
//!   the reset/eviction policy
//! - [`router`]: reply classification via a secondary low-token model call
//! - [`gate`]: suspend/resume confirmation gate awaiting one user decision
//! - [`shell`]: sentinel-framed transport over the persistent shell process
//! - [`orchestrator`]: the turn loop tying the above together
//! - [`model`]: chat-completion collaborator seam and OpenAI implementation
//! - [`prompt`]: preprompt resources, reloaded on every reset
//! - [`transcript`]: append-only execution records and per-session chat dumps
//! - [`ui`]: category-tagged outbound display boundary
//! - [`types`]: message data model, options builder, identifiers
//! - [`error`]: error types and handling
//!
//! ## Concurrency model
//!
//! One task drives the orchestrator end-to-end; the session and the shell
//! channel are never touched from elsewhere. The confirmation gate's
//! `Waiting` episode is the only suspension point that crosses a task
//! boundary: the frontend routes the decision key into the gate while the
//! orchestrator awaits it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod gate;
pub mod model;
pub mod orchestrator;
pub mod prompt;
pub mod router;
pub mod session;
pub mod shell;
pub mod transcript;
pub mod types;
pub mod ui;

// Re-export commonly used types for a flat public API
pub use error::{AgentError, Result};
pub use gate::{ConfirmationGate, Decision};
pub use model::{LanguageModel, OpenAiModel, SamplingParams};
pub use orchestrator::Orchestrator;
pub use prompt::PrepromptStore;
pub use router::{Classification, Router};
pub use session::Session;
pub use shell::{
    CappedOutput, ShellChannel, ShellExecutor, ShellTranscript, enforce_output_cap,
};
pub use transcript::TranscriptLog;
pub use types::{AgentOptions, AgentOptionsBuilder, Message, Role, SessionId};
pub use ui::{OutputCategory, TerminalUi, Ui};

/// Version of the agent
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
