//! Token estimation for context window management.
//!
//! Uses character-based heuristics calibrated for LLM tokenizers. English
//! prose averages ~3.5-4.0 chars/token; 3.2 errs toward overestimation,
//! which is safer than underestimating and overflowing the context window.
//! The estimator is deterministic, so every budget in the crate (session
//! budget, output cap) is measured consistently.

/// Average characters per token for English prose.
const CHARS_PER_TOKEN: f64 = 3.2;

/// Per-message overhead (role label, formatting tokens).
const MESSAGE_OVERHEAD_TOKENS: usize = 4;

use crate::types::Message;

/// Estimate the token count for a string of text.
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    let chars = text.chars().count() as f64;
    (chars / CHARS_PER_TOKEN).ceil() as usize
}

/// Estimate the token count for one conversation message.
///
/// Accounts for content plus per-message overhead.
#[must_use]
pub fn estimate_message_tokens(message: &Message) -> usize {
    MESSAGE_OVERHEAD_TOKENS + estimate_tokens(&message.content)
}

/// Estimate the total token count for a serialized history.
#[must_use]
pub fn estimate_history_tokens(messages: &[Message]) -> usize {
    messages.iter().map(estimate_message_tokens).sum()
}

/// Truncate `text` to at most `max_chars` characters on a char boundary.
///
/// Counts are in characters, not bytes, so the cut never splits a code
/// point.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
