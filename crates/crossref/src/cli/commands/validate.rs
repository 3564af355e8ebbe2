//! Validate command

use clap::Args;
use crossref_changelog::RepoLocator;
use tracing::info;

use crate::cli::{output, Cli, OutputFormat};

/// Validate configuration
#[derive(Debug, Args)]
pub struct ValidateCommand {}

impl ValidateCommand {
    /// Execute the validate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing validate command");
        let config = cli.resolve_config()?;
        let locator = RepoLocator::from_config(&config.repository);

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    output::success("Configuration is valid");
                    println!("{}", output::key_value("repository", &locator.to_string()));
                    println!("{}", output::key_value("url", &locator.url()));
                    println!(
                        "{}",
                        output::key_value("changelog", &config.changelog.file.display().to_string())
                    );
                }
            }
        }

        Ok(())
    }
}
