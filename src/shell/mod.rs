//! Shell execution over a persistent subprocess
//!
//! This module provides the framed transport to the shell collaborator: a
//! single interactive process accepting line-oriented stdin, with each
//! command's output delimited by an echoed sentinel line — inline framing
//! over a raw text stream. It also owns the output-cap policy applied
//! before shell output is folded back into the conversation.

mod channel;
pub mod config;

pub use channel::ShellChannel;
pub use config::{DEFAULT_OUTPUT_TOKEN_CAP, END_OF_OUTPUT_SENTINEL};

use crate::error::Result;
use crate::session::tokens::{estimate_tokens, truncate_chars};

/// One execution record: the command text and exactly its output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellTranscript {
    /// Command text as submitted (without framing)
    pub commands: String,
    /// Everything the invocation wrote to stdout
    pub output: String,
}

/// Command execution seam
///
/// [`ShellChannel`] is the production implementation; tests substitute
/// scripted executors. Taking `&mut self` keeps executions serialized.
pub trait ShellExecutor: Send {
    /// Execute `commands` and return exactly their output
    ///
    /// # Errors
    /// Returns an error if the transport fails or the output cannot be
    /// framed.
    fn execute(
        &mut self,
        commands: &str,
    ) -> impl std::future::Future<Output = Result<ShellTranscript>> + Send;
}

/// Output bounded by [`enforce_output_cap`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CappedOutput {
    /// Kept output, with a truncation notice appended when shortened
    pub text: String,
    /// Whether truncation was applied
    pub truncated: bool,
}

/// Bound `output` to roughly `cap` tokens
///
/// For output measured at `T` tokens with `T > cap`, the overflow fraction
/// `f = (T - cap) / T` is cut from the *character* buffer: the kept length is
/// `round(L × (1 - f))` characters. Tokens and characters are not
/// proportional; the approximation only bounds worst-case prompt growth.
/// A notice is appended to the kept text so the model knows output is
/// missing.
#[must_use]
pub fn enforce_output_cap(output: &str, cap: usize) -> CappedOutput {
    let tokens = estimate_tokens(output);
    if tokens <= cap {
        return CappedOutput {
            text: output.to_string(),
            truncated: false,
        };
    }

    let length = output.chars().count();
    let overflow = (tokens - cap) as f64 / tokens as f64;
    let keep = (length as f64 * (1.0 - overflow)).round() as usize;

    let mut text = truncate_chars(output, keep).to_string();
    text.push_str(&format!(
        "\n\nSYSTEM INFO:\nShell output exceeded {cap} tokens and was shortened.\n"
    ));
    CappedOutput {
        text,
        truncated: true,
    }
}
