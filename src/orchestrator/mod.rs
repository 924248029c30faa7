//! Turn orchestration
//!
//! The [`Orchestrator`] owns every collaborator it drives — session, router,
//! confirmation gate, shell executor, transcript log, model and UI — and is
//! driven by a single task. One call to [`Orchestrator::handle_utterance`]
//! runs one full turn: complete over the history, route the reply, and
//! either deliver it to the user or push it through the gate into the shell
//! and feed the output back to the model. The feed-back loop is bounded by
//! `max_command_chain`; the bound is a safety net against a model stuck
//! emitting commands, not a policy change.
//!
//! No retries happen here. A model or shell failure aborts the turn and
//! propagates to the frontend; duplicate replies and budget overflows reset
//! the session with a notice; a declined command is recorded and never
//! executed.

use std::sync::Arc;

use crate::error::{AgentError, Result};
use crate::gate::{ConfirmationGate, Decision};
use crate::model::{LanguageModel, SamplingParams};
use crate::router::{Classification, Router};
use crate::session::Session;
use crate::shell::{ShellExecutor, enforce_output_cap};
use crate::transcript::TranscriptLog;
use crate::types::{AgentOptions, Message};
use crate::ui::{OutputCategory, Ui};

/// Drives the turn loop over owned collaborators
pub struct Orchestrator<M, E, U>
where
    M: LanguageModel,
    E: ShellExecutor,
    U: Ui,
{
    session: Session,
    router: Router<M>,
    model: Arc<M>,
    gate: Arc<ConfirmationGate>,
    shell: E,
    transcript: TranscriptLog,
    ui: U,
    options: AgentOptions,
    conversation_params: SamplingParams,
}

impl<M, E, U> Orchestrator<M, E, U>
where
    M: LanguageModel,
    E: ShellExecutor,
    U: Ui,
{
    /// Assemble an orchestrator from its collaborators
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        session: Session,
        router: Router<M>,
        model: Arc<M>,
        gate: Arc<ConfirmationGate>,
        shell: E,
        transcript: TranscriptLog,
        ui: U,
        options: AgentOptions,
    ) -> Self {
        let conversation_params =
            SamplingParams::new(options.temperature, options.max_reply_tokens);
        Self {
            session,
            router,
            model,
            gate,
            shell,
            transcript,
            ui,
            options,
            conversation_params,
        }
    }

    /// The session history (read-only; the orchestrator is the sole writer)
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Toggle confirm-before-execute at runtime
    pub fn set_confirm_before_execute(&mut self, confirm: bool) {
        self.options.confirm_before_execute = confirm;
    }

    /// Toggle follow-up questions at runtime
    pub fn set_follow_up_questions(&mut self, follow_up: bool) {
        self.options.follow_up_questions = follow_up;
    }

    /// Run one full turn for a user utterance
    ///
    /// # Errors
    /// Propagates model, shell and transcript failures; the turn is aborted
    /// and no retry is attempted.
    pub async fn handle_utterance(&mut self, text: &str) -> Result<()> {
        // Without follow-up questions every utterance starts a fresh
        // conversation.
        if !self.options.follow_up_questions {
            self.session.reset()?;
            self.router.reload()?;
        }
        self.session.append(Message::user(text));
        self.run_turns().await
    }

    async fn run_turns(&mut self) -> Result<()> {
        for _ in 0..self.options.max_command_chain {
            let reply = self
                .model
                .complete(
                    &self.options.model,
                    self.session.messages(),
                    &self.conversation_params,
                )
                .await?;

            // A repeated reply means the model is stuck; reset and stop the
            // turn without routing the stale reply.
            if self.session.is_duplicate_reply(&reply) {
                self.reset_with_notice("Same AI response as last time, chat history reset.")?;
                return Ok(());
            }
            self.session.record_reply(&reply);

            let classification = self.router.classify(&reply).await?;
            match classification {
                Classification::User => {
                    self.deliver_user_reply(&reply).await?;
                    return Ok(());
                }
                Classification::Empty => {
                    self.notice("Model created an empty reply message for the user.");
                    return Ok(());
                }
                Classification::Unknown(raw) => {
                    self.notice(&format!(
                        "Debug warning: the routing decision is neither 'shell' nor 'user' but {raw}."
                    ));
                    return Ok(());
                }
                Classification::Shell => {
                    if !self.run_command(&reply).await? {
                        return Ok(());
                    }
                    // Shell output was folded into the session; loop to feed
                    // it back to the model.
                }
            }
        }

        self.notice(&format!(
            "Command chain limit of {} reached, stopping this turn.",
            self.options.max_command_chain
        ));
        Ok(())
    }

    /// Execute one shell-classified reply, gated by the confirmation policy.
    ///
    /// Returns `true` when the command ran and the turn should loop, `false`
    /// when the turn ends here (declined or timed out).
    async fn run_command(&mut self, command: &str) -> Result<bool> {
        if self.options.confirm_before_execute {
            self.ui.display(OutputCategory::ShellProposal, command);
            self.notice("Let through? (y/n):");

            let rx = self.gate.begin()?;
            let outcome = self.gate.wait(rx, self.options.decision_timeout).await;
            match outcome {
                Ok(Decision::Approved) => {}
                Ok(Decision::Rejected) => {
                    return self.block_command(command, "Shell execution blocked by user due to security issues.").await;
                }
                Err(AgentError::Timeout(_)) => {
                    return self.block_command(command, "No confirmation decision received in time, shell execution blocked.").await;
                }
                Err(e) => return Err(e),
            }
        } else {
            self.ui.display(OutputCategory::ShellProposal, command);
        }

        self.session.append(Message::assistant(command));

        let transcript = self.shell.execute(command).await?;
        self.transcript.record_execution(&transcript).await?;
        self.ui.display(OutputCategory::ShellOutput, &transcript.output);

        let capped = enforce_output_cap(&transcript.output, self.options.output_token_cap);
        if capped.truncated {
            self.notice(&format!(
                "Shell output exceeded {} tokens and was shortened for the prompt history.",
                self.options.output_token_cap
            ));
        }
        self.session.append(Message::system_output(capped.text));
        self.transcript.save_chat(self.session.messages()).await?;
        Ok(true)
    }

    /// Record a blocked command without executing it; the turn ends.
    async fn block_command(&mut self, command: &str, notice: &str) -> Result<bool> {
        self.session.append(Message::assistant(command));
        self.notice(notice);
        self.transcript.save_chat(self.session.messages()).await?;
        Ok(false)
    }

    /// Deliver a user-facing reply and apply the budget policy.
    async fn deliver_user_reply(&mut self, reply: &str) -> Result<()> {
        let clean = strip_user_wrapper(reply);
        self.session.append(Message::assistant(clean));
        self.ui.display(OutputCategory::User, clean);

        let used = self.session.token_count();
        let budget = self.session.budget();
        self.notice(&format!(
            "Tokens used: {used} / {budget} ({:.2} %)",
            used as f64 / budget as f64 * 100.0
        ));

        self.transcript.save_chat(self.session.messages()).await?;

        if self.session.over_budget() {
            self.reset_with_notice("Maximum number of tokens reached, chat history reset.")?;
        }
        Ok(())
    }

    fn reset_with_notice(&mut self, notice: &str) -> Result<()> {
        self.session.reset()?;
        self.router.reload()?;
        self.notice(notice);
        Ok(())
    }

    fn notice(&self, text: &str) {
        self.ui.display(OutputCategory::Notice, text);
    }
}

/// Strip a recognized `talk_to_user("...")` wrapper, if present
#[must_use]
pub fn strip_user_wrapper(reply: &str) -> &str {
    reply
        .strip_prefix("talk_to_user(\"")
        .and_then(|rest| rest.strip_suffix("\")"))
        .unwrap_or(reply)
}
