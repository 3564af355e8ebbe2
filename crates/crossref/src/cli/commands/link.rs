//! Link command

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use crossref_changelog::document::pending_tag_links;
use crossref_changelog::{ChangelogHooks, LinkAugmentation};
use crossref_core::Config;
use tracing::info;

use crate::cli::{output, Cli, OutputFormat};

/// Add release comparison links to an existing changelog
#[derive(Debug, Args)]
pub struct LinkCommand {
    /// Changelog file (defaults to the configured changelog file)
    pub file: Option<PathBuf>,

    /// Rewrite the file in place (default: print to stdout)
    #[arg(short, long)]
    pub write: bool,
}

/// Result of linking a changelog file in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Written,
    AlreadyLinked,
}

/// Apply the document passes to a changelog text
pub fn link_changelog(config: &Config, document: &str) -> anyhow::Result<String> {
    let mut hooks = LinkAugmentation::from_config(config)?;
    Ok(hooks.augment_document(document))
}

/// Link a changelog file and write it back when anything changed
pub fn link_file(config: &Config, path: &Path) -> anyhow::Result<LinkOutcome> {
    let document = read_changelog(path)?;
    let linked = link_changelog(config, &document)?;
    if linked == document {
        return Ok(LinkOutcome::AlreadyLinked);
    }

    std::fs::write(path, &linked).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(LinkOutcome::Written)
}

fn read_changelog(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

impl LinkCommand {
    /// Execute the link command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let config = cli.resolve_config()?;
        let path = self
            .file
            .clone()
            .unwrap_or_else(|| config.changelog.file.clone());
        info!(path = %path.display(), write = self.write, "executing link command");

        if self.write {
            let outcome = link_file(&config, &path)?;
            if !cli.quiet {
                match outcome {
                    LinkOutcome::Written => output::success(&format!("Linked {}", path.display())),
                    LinkOutcome::AlreadyLinked => {
                        output::success(&format!("{} is already linked", path.display()))
                    }
                }
            }
            return Ok(());
        }

        let document = read_changelog(&path)?;
        if pending_tag_links(&document) == 0 && !cli.quiet {
            output::warning(&format!(
                "no unlinked release headings with a predecessor in {}",
                path.display()
            ));
        }
        let linked = link_changelog(&config, &document)?;

        match cli.format {
            OutputFormat::Json => {
                let report = serde_json::json!({
                    "file": path.display().to_string(),
                    "changed": linked != document,
                    "document": linked,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => print!("{}", linked),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BASE: &str = "https://github.com/acme/widgets";

    #[test]
    fn test_link_file_writes_then_reports_linked() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("CHANGELOG.md");
        std::fs::write(
            &path,
            "# Changelog\n\n## v1.1.0 (2024-02-01)\n\n- b\n\n## v1.0.0 (2024-01-01)\n\n- a\n",
        )
        .unwrap();
        let config = Config::for_repository("acme", "widgets");

        assert_eq!(link_file(&config, &path).unwrap(), LinkOutcome::Written);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains(&format!(
            "## [v1.1.0]({BASE}/compare/v1.0.0...v1.1.0) (2024-02-01)\n"
        )));
        assert!(written.contains("## v1.0.0 (2024-01-01)\n"));

        assert_eq!(link_file(&config, &path).unwrap(), LinkOutcome::AlreadyLinked);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), written);
    }

    #[test]
    fn test_link_file_new_release_on_linked_changelog() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("CHANGELOG.md");
        std::fs::write(
            &path,
            format!(
                "## v1.2.0 (2024-03-01)\n\n## [v1.1.0]({BASE}/compare/v1.0.0...v1.1.0) (2024-02-01)\n\n## v1.0.0 (2024-01-01)\n"
            ),
        )
        .unwrap();
        let config = Config::for_repository("acme", "widgets");

        assert_eq!(link_file(&config, &path).unwrap(), LinkOutcome::Written);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with(&format!(
            "## [v1.2.0]({BASE}/compare/v1.1.0...v1.2.0) (2024-03-01)\n"
        )));
    }

    #[test]
    fn test_link_file_missing_file() {
        let temp = TempDir::new().unwrap();
        let config = Config::for_repository("acme", "widgets");
        let err = link_file(&config, &temp.path().join("CHANGELOG.md")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
