//! Init command

use std::path::Path;

use anyhow::bail;
use clap::Args;
use crossref_core::config::{
    commitizen_file_names, config_template, parse_commitizen_config, DEFAULT_CONFIG_TOML,
};
use tracing::info;

use crate::cli::{output, Cli};

/// Write a starter configuration file
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Repository owner (default: taken from commitizen settings if present)
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name (default: taken from commitizen settings if present)
    #[arg(long)]
    pub name: Option<String>,

    /// Overwrite an existing configuration
    #[arg(short, long)]
    pub force: bool,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let cwd = std::env::current_dir()?;
        let (owner, name) = self.identity(&cwd)?;
        info!(%owner, %name, force = self.force, "executing init command");

        let path = cwd.join(DEFAULT_CONFIG_TOML);
        write_config(&path, &owner, &name, self.force)?;

        if !cli.quiet {
            output::success(&format!("Created {}", path.display()));
        }
        Ok(())
    }

    /// Owner and name from flags, falling back to commitizen settings
    fn identity(&self, dir: &Path) -> anyhow::Result<(String, String)> {
        if let (Some(owner), Some(name)) = (&self.owner, &self.name) {
            return Ok((owner.clone(), name.clone()));
        }

        let from_commitizen = commitizen_file_names()
            .into_iter()
            .filter_map(|file| std::fs::read_to_string(dir.join(file)).ok())
            .find_map(|content| parse_commitizen_config(&content).ok());

        match from_commitizen {
            Some(config) => Ok((
                self.owner.clone().unwrap_or(config.repository.owner),
                self.name.clone().unwrap_or(config.repository.name),
            )),
            None => bail!("--owner and --name are required when no commitizen settings exist"),
        }
    }
}

/// Write the starter configuration, refusing to clobber unless forced
pub fn write_config(path: &Path, owner: &str, name: &str, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    std::fs::write(path, config_template(owner, name))?;
    Ok(())
}
