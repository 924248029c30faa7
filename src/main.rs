// Autoshell terminal frontend
//
// Stands in for the GUI/voice collaborator: reads utterance lines from
// stdin, routes the decision key into the confirmation gate while a turn is
// waiting on it, and prints category-tagged output.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use autoshell::{
    AgentOptions, ConfirmationGate, OpenAiModel, Orchestrator, OutputCategory, PrepromptStore,
    Router, SamplingParams, Session, SessionId, ShellChannel, TerminalUi, TranscriptLog, Ui,
};

/// Read stdin lines on a dedicated thread; blocking reads must not park the
/// runtime.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let options = AgentOptions::default();
    let ui = TerminalUi::new();

    // Startup is all-or-nothing: a missing API key, preamble or shell leaves
    // nothing to degrade to.
    let model = Arc::new(OpenAiModel::try_from_env().context("model collaborator")?);
    let preprompts = PrepromptStore::new(&options.prompt_dir);
    let session = Session::new(
        preprompts.clone(),
        options.token_budget,
        options.token_reserve,
    )
    .context("system preamble")?;
    let router = Router::new(
        model.clone(),
        preprompts,
        options.router_model.clone(),
        SamplingParams::new(options.temperature, options.classify_max_tokens),
    )
    .context("classification preamble")?;
    let shell = ShellChannel::spawn(options.shell_program.clone(), options.shell_read_deadline)
        .context("shell channel")?;

    let session_id = SessionId::generate();
    log::info!("starting session {session_id}");
    let transcript = TranscriptLog::new(&options.log_dir, session_id).context("transcript log")?;

    let gate = Arc::new(ConfirmationGate::new());
    let mut confirm = options.confirm_before_execute;
    let mut follow_up = options.follow_up_questions;

    let mut orchestrator = Orchestrator::new(
        session,
        router,
        model,
        Arc::clone(&gate),
        shell,
        transcript,
        ui,
        options,
    );

    println!("Autoshell ready. Type a request; :direct and :followup toggle modes.");

    let mut lines = spawn_stdin_reader();
    let mut stdin_closed = false;

    while let Some(line) = lines.recv().await {
        match line.trim() {
            "" => continue,
            ":direct" => {
                confirm = !confirm;
                orchestrator.set_confirm_before_execute(confirm);
                let notice = if confirm {
                    "Direct Code Execution Disabled"
                } else {
                    "Direct Code Execution Enabled"
                };
                ui.display(OutputCategory::Notice, notice);
                continue;
            }
            ":followup" => {
                follow_up = !follow_up;
                orchestrator.set_follow_up_questions(follow_up);
                let notice = if follow_up {
                    "Follow-Up Questions Enabled"
                } else {
                    "Follow-Up Questions Disabled"
                };
                ui.display(OutputCategory::Notice, notice);
                continue;
            }
            _ => {}
        }

        println!("USER:\n{line}\n");

        // Drive the turn while routing further input lines into the gate:
        // the first line during a Waiting episode is the decision key.
        let turn = orchestrator.handle_utterance(&line);
        tokio::pin!(turn);
        let result = loop {
            tokio::select! {
                res = &mut turn => break res,
                maybe = lines.recv(), if !stdin_closed => {
                    match maybe {
                        Some(key) => {
                            if !gate.submit_key(key.trim_end_matches(['\r', '\n'])) {
                                log::debug!("input ignored while a turn is in progress");
                            }
                        }
                        None => stdin_closed = true,
                    }
                }
            }
        };

        if let Err(e) = result {
            log::error!("turn failed: {e}");
            ui.display(OutputCategory::Notice, &format!("Turn aborted: {e}"));
        }

        if stdin_closed {
            break;
        }
    }

    Ok(())
}
