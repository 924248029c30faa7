//! Reply classification
//!
//! Every model turn is routed by a second, low-token model call: the
//! candidate reply is presented to the classification preamble as the only
//! user turn, and the raw answer is decoded into a closed
//! [`Classification`]. Anything other than the three known literals decodes
//! to [`Classification::Unknown`], which carries the raw value so the
//! orchestrator can surface it as a diagnostic instead of dropping it.

use std::sync::Arc;

use crate::error::Result;
use crate::model::{LanguageModel, SamplingParams};
use crate::prompt::PrepromptStore;
use crate::types::Message;

/// Routing outcome for one candidate reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The reply is user-facing speech
    User,
    /// The reply is an executable shell command
    Shell,
    /// The model produced the explicit empty-reply sentinel
    Empty,
    /// The classifier answered with an unexpected literal (kept verbatim)
    Unknown(String),
}

impl Classification {
    /// Decode a raw classifier answer
    ///
    /// Matching is exact and case-sensitive; the classification preamble is
    /// expected to pin the output to one of the three known literals.
    #[must_use]
    pub fn decode(raw: &str) -> Self {
        match raw {
            "user" => Self::User,
            "shell" => Self::Shell,
            "empty" => Self::Empty,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Classifier over a secondary model call
///
/// Stateless apart from the cached classification preamble, which reloads on
/// every session reset.
pub struct Router<M: LanguageModel> {
    model: Arc<M>,
    router_model: String,
    preamble: String,
    preprompts: PrepromptStore,
    params: SamplingParams,
}

impl<M: LanguageModel> Router<M> {
    /// Create a router, loading the classification preamble
    ///
    /// # Errors
    /// Returns [`crate::AgentError::Preamble`] if the preamble resource
    /// cannot be loaded; classification cannot run without it.
    pub fn new(
        model: Arc<M>,
        preprompts: PrepromptStore,
        router_model: impl Into<String>,
        params: SamplingParams,
    ) -> Result<Self> {
        let preamble = preprompts.load_router()?;
        Ok(Self {
            model,
            router_model: router_model.into(),
            preamble,
            preprompts,
            params,
        })
    }

    /// Re-read the classification preamble from disk
    ///
    /// # Errors
    /// Returns [`crate::AgentError::Preamble`] if the resource cannot be
    /// reloaded.
    pub fn reload(&mut self) -> Result<()> {
        self.preamble = self.preprompts.load_router()?;
        Ok(())
    }

    /// Classify one candidate reply
    ///
    /// Issues a short completion against the classification preamble with
    /// the candidate as the only turn content. No side effects beyond the
    /// network call.
    ///
    /// # Errors
    /// Returns an error if the model call fails.
    pub async fn classify(&self, candidate: &str) -> Result<Classification> {
        let turns = [
            Message::system(self.preamble.as_str()),
            Message::user(candidate),
        ];
        let answer = self
            .model
            .complete(&self.router_model, &turns, &self.params)
            .await?;
        log::debug!("classifier answered {answer:?}");
        Ok(Classification::decode(&answer))
    }
}
