//! Preprompt resources
//!
//! The agent is seeded from two text resources: the main system preamble
//! (`pre_prompt_shell.txt`) and the router's classification preamble
//! (`pre_prompt_forwarder.txt`). Both are loaded as opaque strings at
//! construction and re-read on every reset. Paths are explicit; nothing
//! here touches the process working directory.

use std::path::{Path, PathBuf};

use crate::error::{AgentError, Result};

/// File name of the main system preamble
pub const MAIN_PREPROMPT_FILE: &str = "pre_prompt_shell.txt";

/// File name of the router classification preamble
pub const ROUTER_PREPROMPT_FILE: &str = "pre_prompt_forwarder.txt";

/// Loader for the preprompt text resources
#[derive(Debug, Clone)]
pub struct PrepromptStore {
    dir: PathBuf,
}

impl PrepromptStore {
    /// Create a store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the resources are read from
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the main system preamble
    ///
    /// # Errors
    /// Returns [`AgentError::Preamble`] if the file cannot be read. This is
    /// fatal at startup; there is no conversation without a system prompt.
    pub fn load_main(&self) -> Result<String> {
        self.load(MAIN_PREPROMPT_FILE)
    }

    /// Load the router classification preamble
    ///
    /// # Errors
    /// Returns [`AgentError::Preamble`] if the file cannot be read.
    pub fn load_router(&self) -> Result<String> {
        self.load(ROUTER_PREPROMPT_FILE)
    }

    fn load(&self, file: &str) -> Result<String> {
        let path = self.dir.join(file);
        std::fs::read_to_string(&path).map_err(|e| AgentError::preamble(path, e))
    }
}
