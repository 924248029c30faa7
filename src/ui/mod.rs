//! User-facing output boundary
//!
//! The orchestrator never prints directly: every outbound text is tagged
//! with a semantic [`OutputCategory`] and handed to a [`Ui`] collaborator.
//! The shipped terminal frontend lives in [`terminal`]; a GUI or voice
//! frontend would implement the same trait.

pub mod terminal;

pub use terminal::TerminalUi;

/// Semantic category of an outbound text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCategory {
    /// Speech addressed to the user
    User,
    /// A shell command proposed or about to run
    ShellProposal,
    /// Raw output produced by the shell
    ShellOutput,
    /// Operator notice or diagnostic
    Notice,
}

/// Outbound display collaborator
pub trait Ui: Send + Sync {
    /// Display (or speak) `text` under the given category
    fn display(&self, category: OutputCategory, text: &str);
}
