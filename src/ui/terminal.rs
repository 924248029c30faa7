//! Colored terminal frontend

use colored::Colorize;

use super::{OutputCategory, Ui};

/// Line-oriented terminal implementation of [`Ui`]
///
/// Keeps the classic scheme: user speech plain, proposed commands green,
/// shell output red, notices bright blue.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalUi;

impl TerminalUi {
    /// Create a terminal frontend
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Ui for TerminalUi {
    fn display(&self, category: OutputCategory, text: &str) {
        match category {
            OutputCategory::User => println!("{}\n{text}\n", "AI TO USER:".bold()),
            OutputCategory::ShellProposal => {
                println!("{}\n{}\n", "AI PROPOSAL:".green().bold(), text.green());
            }
            OutputCategory::ShellOutput => {
                println!("{}\n{}\n", "SHELL:".red().bold(), text.red());
            }
            OutputCategory::Notice => {
                println!(
                    "{}\n{}\n",
                    "SYSTEM INFO:".bright_blue().bold(),
                    text.bright_blue()
                );
            }
        }
    }
}
