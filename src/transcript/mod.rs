//! Durable transcripts
//!
//! Two artifacts, both under an explicit log directory:
//! - `complete_command_history.txt`: append-only record of every shell
//!   execution, written before the output is folded back into the session.
//! - `chat_history_<timestamp>.txt`: per-session chat dump, rewritten with
//!   the full history whenever a turn concludes. The timestamp is fixed at
//!   construction so one process run maps to one file.
//!
//! Files are UTF-8 so output in any language survives a round trip.

use std::path::{Path, PathBuf};

use chrono::Local;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::shell::ShellTranscript;
use crate::types::{Message, SessionId};

/// File receiving the append-only execution records
pub const COMMAND_HISTORY_FILE: &str = "complete_command_history.txt";

/// Writer for execution records and chat dumps
pub struct TranscriptLog {
    dir: PathBuf,
    chat_dump: PathBuf,
    session_id: SessionId,
}

impl TranscriptLog {
    /// Create a log rooted at `dir`, creating the directory if needed
    ///
    /// # Errors
    /// Returns an I/O error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>, session_id: SessionId) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        let stamp = Local::now().format("%d.%m.%Y-%Hh%Mm%Ss");
        let chat_dump = dir.join(format!("chat_history_{stamp}.txt"));
        Ok(Self {
            dir,
            chat_dump,
            session_id,
        })
    }

    /// Directory the artifacts live in
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of this session's chat dump
    #[must_use]
    pub fn chat_dump_path(&self) -> &Path {
        &self.chat_dump
    }

    /// Append one execution record to the command history
    ///
    /// # Errors
    /// Returns an I/O error if the record cannot be appended.
    pub async fn record_execution(&self, transcript: &ShellTranscript) -> Result<()> {
        let path = self.dir.join(COMMAND_HISTORY_FILE);
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        let record = format!(
            "commands:\n{}\n\noutput:\n{}",
            transcript.commands, transcript.output
        );
        file.write_all(record.as_bytes()).await?;
        file.flush().await?;
        log::debug!(
            "session {}: recorded execution ({} output bytes)",
            self.session_id,
            transcript.output.len()
        );
        Ok(())
    }

    /// Rewrite the chat dump with the full history
    ///
    /// # Errors
    /// Returns an I/O error if the dump cannot be written.
    pub async fn save_chat(&self, messages: &[Message]) -> Result<()> {
        let mut dump = String::new();
        for message in messages {
            dump.push_str(&format!("\n{}: {}\n", message.role, message.content));
        }
        tokio::fs::write(&self.chat_dump, dump.as_bytes()).await?;
        Ok(())
    }
}
