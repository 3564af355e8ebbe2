//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crossref_changelog::RepoLocator;
use crossref_core::config::{
    find_config, load_config, load_config_from_dir, load_config_or_default, read_config,
    validate_changelog, validate_config,
};
use crossref_core::Config;
use tracing::debug;

use commands::{
    CompletionsCommand, InitCommand, LinkCommand, MessageCommand, RenderCommand, ValidateCommand,
};

/// Crossref - Cross-reference links for generated changelogs
#[derive(Debug, Parser)]
#[command(name = "crossref")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Configuration file (default: search from the working directory upwards)
    #[arg(long, global = true, env = "CROSSREF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Repository as owner/name, overriding the configured one
    #[arg(long, global = true, value_name = "OWNER/NAME")]
    pub repo: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a release history into a linked changelog
    Render(RenderCommand),

    /// Add release comparison links to an existing changelog
    Link(LinkCommand),

    /// Link a single commit message
    Message(MessageCommand),

    /// Validate configuration
    Validate(ValidateCommand),

    /// Write a starter configuration file
    Init(InitCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Render(ref cmd) => cmd.execute(&self),
            Commands::Link(ref cmd) => cmd.execute(&self),
            Commands::Message(ref cmd) => cmd.execute(&self),
            Commands::Validate(ref cmd) => cmd.execute(&self),
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Completions(ref cmd) => cmd.execute(&self),
        }
    }

    /// Load configuration, apply `--repo`, and validate the result.
    ///
    /// A missing repository owner or name is reported here, before any
    /// commit or document is touched.
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let cwd = std::env::current_dir()?;

        let mut config = match (&self.config, &self.repo) {
            (Some(path), _) => load_config(path)?,
            (None, None) => load_config_from_dir(&cwd)?.0,
            (None, Some(_)) => load_config_or_default(&cwd).0,
        };

        if let Some(repo) = &self.repo {
            let locator: RepoLocator = repo.parse()?;
            debug!(repository = %locator, "repository overridden from command line");
            config.repository.owner = locator.owner().to_string();
            config.repository.name = locator.name().to_string();
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration for commands that only need the changelog layout.
    ///
    /// The explicit `--config` file wins over discovery; without either the
    /// defaults apply. The repository identity is not checked.
    pub fn resolve_changelog_config(&self) -> anyhow::Result<Config> {
        let path = match &self.config {
            Some(path) => Some(path.clone()),
            None => find_config(&std::env::current_dir()?),
        };

        let config = match path {
            Some(path) => read_config(&path)?,
            None => Config::default(),
        };
        validate_changelog(&config)?;
        Ok(config)
    }
}
