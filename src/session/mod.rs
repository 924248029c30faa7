//! Conversation session state
//!
//! A [`Session`] owns the ordered message history, its running token count,
//! and the last-assistant-reply memory used for loop detection. It is
//! created at startup and after any reset, and is mutated only by `append`
//! and `reset` — a single-owner, single-threaded mutation boundary. The
//! orchestrator is the sole writer.

pub mod tokens;

use crate::error::Result;
use crate::prompt::PrepromptStore;
use crate::types::Message;

use tokens::{estimate_history_tokens, estimate_message_tokens};

/// Ordered conversation history with token accounting
pub struct Session {
    messages: Vec<Message>,
    token_count: usize,
    budget: usize,
    reserve: usize,
    last_assistant_reply: Option<String>,
    preprompts: PrepromptStore,
}

impl Session {
    /// Create a session seeded with a freshly loaded system preamble
    ///
    /// # Errors
    /// Returns [`crate::AgentError::Preamble`] if the preamble resource
    /// cannot be loaded; the process cannot proceed without a system prompt.
    pub fn new(preprompts: PrepromptStore, budget: usize, reserve: usize) -> Result<Self> {
        let preamble = preprompts.load_main()?;
        let messages = vec![Message::system(preamble)];
        let token_count = estimate_history_tokens(&messages);
        Ok(Self {
            messages,
            token_count,
            budget,
            reserve,
            last_assistant_reply: None,
            preprompts,
        })
    }

    /// Append a message to the history, in conversation order
    pub fn append(&mut self, message: Message) {
        self.token_count += estimate_message_tokens(&message);
        self.messages.push(message);
    }

    /// Replace the history with a freshly reloaded system preamble
    ///
    /// Clears the last-reply memory. The preamble is re-read from disk so
    /// edits to the resource take effect on the next reset.
    ///
    /// # Errors
    /// Returns [`crate::AgentError::Preamble`] if the resource cannot be
    /// reloaded.
    pub fn reset(&mut self) -> Result<()> {
        let preamble = self.preprompts.load_main()?;
        self.messages = vec![Message::system(preamble)];
        self.token_count = estimate_history_tokens(&self.messages);
        self.last_assistant_reply = None;
        Ok(())
    }

    /// Current token total over the serialized history
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    /// Configured maximum token budget
    #[must_use]
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Whether the history has grown past `budget - reserve`
    #[must_use]
    pub fn over_budget(&self) -> bool {
        self.token_count > self.budget.saturating_sub(self.reserve)
    }

    /// The ordered history
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages currently held
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the history is empty (never true after construction)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether `reply` is character-equal to the previous assistant reply
    ///
    /// Guards against the model being stuck emitting the same reply in a
    /// loop.
    #[must_use]
    pub fn is_duplicate_reply(&self, reply: &str) -> bool {
        self.last_assistant_reply.as_deref() == Some(reply)
    }

    /// Record the most recent assistant reply for duplicate detection
    pub fn record_reply(&mut self, reply: &str) {
        self.last_assistant_reply = Some(reply.to_string());
    }
}
