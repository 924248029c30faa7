//! Confirmation gate for proposed shell commands
//!
//! The gate moves through `Idle → Waiting → {Approved, Rejected} → Idle`.
//! [`ConfirmationGate::begin`] arms a single decision slot and hands the
//! caller a receiver to await — a real blocking wait, not a poll loop. The
//! frontend feeds key events through [`ConfirmationGate::submit_key`]; the
//! first key while `Waiting` consumes the slot, and keys while `Idle` are
//! not captured (the caller keeps them as plain input). At most one episode
//! can be in flight, matching the one-pending-command invariant.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::error::{AgentError, Result};

/// Outcome of one confirmation episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The user let the command through
    Approved,
    /// The user blocked the command
    Rejected,
}

impl Decision {
    /// Map a decision key to an outcome
    ///
    /// `y`, `Y` and the enter key (empty line or a bare carriage return)
    /// approve; any other key rejects.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "y" | "Y" | "" | "\r" | "\n" => Self::Approved,
            _ => Self::Rejected,
        }
    }
}

/// Single-slot suspend/resume gate awaiting one user decision
#[derive(Default)]
pub struct ConfirmationGate {
    slot: Mutex<Option<oneshot::Sender<Decision>>>,
}

impl ConfirmationGate {
    /// Create an idle gate
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a `Waiting` episode is in flight
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Arm the gate and return the receiver for the pending decision
    ///
    /// # Errors
    /// Returns [`AgentError::Gate`] if an episode is already waiting; only
    /// one command may be pending at a time.
    pub fn begin(&self) -> Result<oneshot::Receiver<Decision>> {
        let mut slot = self.slot.lock();
        if slot.is_some() {
            return Err(AgentError::gate("a confirmation is already pending"));
        }
        let (tx, rx) = oneshot::channel();
        *slot = Some(tx);
        Ok(rx)
    }

    /// Offer a key event to the gate
    ///
    /// Consumes the pending slot and returns `true` when the gate was
    /// `Waiting`; returns `false` when `Idle`, leaving the key to the
    /// caller. Taking the sender out of the slot guarantees exactly one
    /// decision per episode.
    pub fn submit_key(&self, key: &str) -> bool {
        let sender = self.slot.lock().take();
        match sender {
            Some(tx) => {
                // A dropped receiver means the waiter is gone; the episode
                // is over either way.
                let _ = tx.send(Decision::from_key(key));
                true
            }
            None => false,
        }
    }

    /// Await the decision for an armed episode
    ///
    /// With a timeout, an unanswered episode is abandoned: the slot is
    /// cleared so the next episode starts clean, and the caller receives
    /// [`AgentError::Timeout`] to surface as a blocked execution.
    ///
    /// # Errors
    /// Returns [`AgentError::Gate`] if the decision channel was dropped and
    /// [`AgentError::Timeout`] if `timeout` elapsed first.
    pub async fn wait(
        &self,
        rx: oneshot::Receiver<Decision>,
        timeout: Option<Duration>,
    ) -> Result<Decision> {
        match timeout {
            None => rx
                .await
                .map_err(|_| AgentError::gate("decision channel dropped")),
            Some(limit) => match tokio::time::timeout(limit, rx).await {
                Ok(Ok(decision)) => Ok(decision),
                Ok(Err(_)) => Err(AgentError::gate("decision channel dropped")),
                Err(_) => {
                    self.slot.lock().take();
                    Err(AgentError::timeout("no confirmation decision received"))
                }
            },
        }
    }
}
