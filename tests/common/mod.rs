//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use autoshell::error::{AgentError, Result};
use autoshell::{
    LanguageModel, Message, OutputCategory, SamplingParams, ShellExecutor, ShellTranscript, Ui,
};
use tempfile::TempDir;

/// Model collaborator returning a scripted sequence of replies
pub struct ScriptedModel {
    replies: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<(String, usize)>>,
}

impl ScriptedModel {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(ToString::to_string).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Number of completion calls issued so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Model names passed to each call, in order
    pub fn called_models(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(m, _)| m.clone()).collect()
    }

    /// History length seen by call `index`
    pub fn history_len(&self, index: usize) -> usize {
        self.calls.lock().unwrap()[index].1
    }
}

impl LanguageModel for ScriptedModel {
    async fn complete(
        &self,
        model: &str,
        messages: &[Message],
        _params: &SamplingParams,
    ) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), messages.len()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AgentError::api("scripted replies exhausted", None))
    }
}

/// Shell executor recording commands instead of running them
pub struct ScriptedExecutor {
    outputs: VecDeque<String>,
    log: Arc<Mutex<Vec<String>>>,
}

impl ScriptedExecutor {
    pub fn new(outputs: &[&str]) -> (Self, Arc<Mutex<Vec<String>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                outputs: outputs.iter().map(ToString::to_string).collect(),
                log: Arc::clone(&log),
            },
            log,
        )
    }
}

impl ShellExecutor for ScriptedExecutor {
    async fn execute(&mut self, commands: &str) -> Result<ShellTranscript> {
        self.log.lock().unwrap().push(commands.to_string());
        let output = self.outputs.pop_front().unwrap_or_else(|| "ok\n".to_string());
        Ok(ShellTranscript {
            commands: commands.to_string(),
            output,
        })
    }
}

/// UI collaborator recording every display call
#[derive(Clone, Default)]
pub struct RecordingUi {
    events: Arc<Mutex<Vec<(OutputCategory, String)>>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(OutputCategory, String)> {
        self.events.lock().unwrap().clone()
    }

    /// All notices displayed so far
    pub fn notices(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|(c, _)| *c == OutputCategory::Notice)
            .map(|(_, t)| t)
            .collect()
    }

    pub fn has_notice_containing(&self, needle: &str) -> bool {
        self.notices().iter().any(|n| n.contains(needle))
    }
}

impl Ui for RecordingUi {
    fn display(&self, category: OutputCategory, text: &str) {
        self.events.lock().unwrap().push((category, text.to_string()));
    }
}

pub const MAIN_PREAMBLE: &str = "You are connected to a command shell.";
pub const ROUTER_PREAMBLE: &str = "Answer shell, user or empty.";

/// Temp directory seeded with both preprompt resources
pub fn preprompt_fixture() -> TempDir {
    let dir = tempfile::tempdir().expect("create preprompt dir");
    std::fs::write(dir.path().join("pre_prompt_shell.txt"), MAIN_PREAMBLE)
        .expect("write main preamble");
    std::fs::write(dir.path().join("pre_prompt_forwarder.txt"), ROUTER_PREAMBLE)
        .expect("write router preamble");
    dir
}
