//! Persistent shell subprocess with sentinel framing

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::task::JoinHandle;

use crate::error::{AgentError, Result};

use super::config::{CLEAR_DIRECTIVE, END_OF_OUTPUT_SENTINEL, SHELL_CANDIDATES};
use super::{ShellExecutor, ShellTranscript};

/// Framed request/response transport over one long-lived shell process
///
/// The channel serializes executions: `&mut self` on [`ShellChannel::execute`]
/// plus single-task orchestration mean no command is sent while a prior
/// command's output is still draining. If a read deadline expires, the
/// abandoned command's output may still arrive on the stream — the channel is
/// desynchronized and should be dropped and respawned.
pub struct ShellChannel {
    program: PathBuf,
    process: Child,
    stdin: Option<ChildStdin>,
    stdout: BufReader<ChildStdout>,
    stderr_task: JoinHandle<()>,
    read_deadline: Option<Duration>,
}

impl ShellChannel {
    /// Spawn the shell process and set up the channel
    ///
    /// Uses `program` when given, otherwise probes the PATH for a known
    /// shell. There is no degraded mode without a shell.
    ///
    /// # Errors
    /// Returns [`AgentError::ShellNotFound`] if no shell can be located or
    /// spawned.
    pub fn spawn(program: Option<PathBuf>, read_deadline: Option<Duration>) -> Result<Self> {
        let program = match program {
            Some(path) => path,
            None => Self::find_shell()?,
        };

        let mut cmd = Command::new(&program);
        // TERM=dumb: terminal control sequences are meaningless on a pipe,
        // and the screen-clear directive must not inject them into stdout.
        cmd.env("TERM", "dumb")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| {
            AgentError::ShellNotFound(format!("failed to start {}: {e}", program.display()))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| AgentError::shell_channel("failed to get stdin handle"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| AgentError::shell_channel("failed to get stdout handle"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| AgentError::shell_channel("failed to get stderr handle"))?;

        // Drain stderr to the parent's stderr. Piping instead of inheriting
        // keeps the child from manipulating the parent terminal state.
        let stderr_task = tokio::spawn(async move {
            use tokio::io::AsyncReadExt;
            let mut stderr = stderr;
            let mut buffer = vec![0u8; 4096];
            loop {
                match stderr.read(&mut buffer).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        let _ = std::io::Write::write_all(&mut std::io::stderr(), &buffer[..n]);
                    }
                }
            }
        });

        log::info!("shell channel connected to {}", program.display());

        Ok(Self {
            program,
            process: child,
            stdin: Some(stdin),
            stdout: BufReader::new(stdout),
            stderr_task,
            read_deadline,
        })
    }

    /// Locate a shell executable on the PATH
    ///
    /// # Errors
    /// Returns [`AgentError::ShellNotFound`] if no candidate resolves.
    pub fn find_shell() -> Result<PathBuf> {
        for candidate in SHELL_CANDIDATES {
            if let Ok(path) = which::which(candidate) {
                return Ok(path);
            }
        }
        Err(AgentError::shell_not_found())
    }

    /// The shell executable this channel runs
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Close stdin and wait for the shell to exit, killing it on timeout
    ///
    /// # Errors
    /// Returns an I/O error if waiting on the process fails.
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(mut stdin) = self.stdin.take() {
            let _ = stdin.shutdown().await;
        }
        match tokio::time::timeout(Duration::from_secs(5), self.process.wait()).await {
            Ok(status) => {
                status?;
            }
            Err(_) => {
                let _ = self.process.kill().await;
            }
        }
        Ok(())
    }

    /// Write the framed command block: clear directive, the command text,
    /// then the sentinel echo.
    async fn send(&mut self, commands: &str) -> Result<()> {
        let framed = format!("{CLEAR_DIRECTIVE}\n{commands}\necho '{END_OF_OUTPUT_SENTINEL}'\n");
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| AgentError::shell_channel("stdin already closed"))?;
        stdin.write_all(framed.as_bytes()).await?;
        stdin.flush().await?;
        Ok(())
    }

    /// Read stdout lines until the sentinel, accumulating everything before
    /// it and discarding the sentinel itself.
    async fn drain(&mut self) -> Result<String> {
        let mut output = String::new();
        loop {
            let mut line = String::new();
            let n = self.stdout.read_line(&mut line).await?;
            if n == 0 {
                return Err(AgentError::shell_channel(
                    "shell closed its output before the end-of-output sentinel",
                ));
            }
            if line.trim_end_matches(['\r', '\n']) == END_OF_OUTPUT_SENTINEL {
                break;
            }
            output.push_str(&line);
        }
        Ok(output)
    }
}

impl ShellExecutor for ShellChannel {
    async fn execute(&mut self, commands: &str) -> Result<ShellTranscript> {
        self.send(commands).await?;
        let output = match self.read_deadline {
            None => self.drain().await?,
            Some(limit) => tokio::time::timeout(limit, self.drain())
                .await
                .map_err(|_| {
                    AgentError::timeout(format!(
                        "command produced no end-of-output sentinel within {limit:?}"
                    ))
                })??,
        };
        Ok(ShellTranscript {
            commands: commands.to_string(),
            output,
        })
    }
}

impl Drop for ShellChannel {
    fn drop(&mut self) {
        self.stderr_task.abort();
        let _ = self.process.start_kill();
    }
}
