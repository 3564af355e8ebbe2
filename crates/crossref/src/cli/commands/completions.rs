//! Completions command

use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use tracing::info;

use crate::cli::{output, Cli};

/// Binary name used in generated scripts
const BIN_NAME: &str = "crossref";

/// Print a completion script for crossref's commands and flags
#[derive(Debug, Args)]
pub struct CompletionsCommand {
    /// Target shell (default: detected from $SHELL)
    #[arg(value_enum)]
    pub shell: Option<Shell>,

    /// Write the script to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Completion script for the full crossref command tree
pub fn completion_script(shell: Shell) -> anyhow::Result<String> {
    let mut buffer = Vec::new();
    generate(shell, &mut Cli::command(), BIN_NAME, &mut buffer);
    String::from_utf8(buffer).context("completion script is not UTF-8")
}

impl CompletionsCommand {
    /// Execute the completions command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let shell = self
            .shell
            .or_else(Shell::from_env)
            .ok_or_else(|| anyhow!("cannot detect the shell from $SHELL; pass one explicitly"))?;
        info!(%shell, "executing completions command");

        let script = completion_script(shell)?;
        match &self.output {
            Some(path) => {
                std::fs::write(path, &script)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                if !cli.quiet {
                    output::success(&format!("{} completions written to {}", shell, path.display()));
                }
            }
            None => std::io::stdout().write_all(script.as_bytes())?,
        }

        Ok(())
    }
}
