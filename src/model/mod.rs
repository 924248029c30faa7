//! Language-model collaborator
//!
//! The orchestrator and router talk to the model through the
//! [`LanguageModel`] trait so tests can script replies. The production
//! implementation is [`OpenAiModel`] over the chat-completions HTTP API.

mod openai;

pub use openai::OpenAiModel;

use crate::error::Result;
use crate::types::Message;

/// Sampling parameters for one completion request
#[derive(Debug, Clone, Copy)]
pub struct SamplingParams {
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens in the reply
    pub max_tokens: u32,
    /// Nucleus sampling cutoff
    pub top_p: f32,
    /// Frequency penalty
    pub frequency_penalty: f32,
    /// Presence penalty
    pub presence_penalty: f32,
}

impl SamplingParams {
    /// Parameters with stock nucleus/penalty defaults
    #[must_use]
    pub const fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

/// Chat-completion collaborator
///
/// Implementations take an ordered message list and return one reply text.
/// No retries happen at this seam; a failure aborts the caller's turn.
pub trait LanguageModel: Send + Sync {
    /// Request a completion of `messages` from `model`
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be
    /// decoded.
    fn complete(
        &self,
        model: &str,
        messages: &[Message],
        params: &SamplingParams,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}
