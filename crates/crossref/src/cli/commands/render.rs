//! Render command

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use crossref_changelog::{
    ChangelogPipeline, LinkAugmentation, ReleaseHistory, RepoLocator, ShortRevisionAugmentation,
};
use crossref_core::Config;
use serde::Serialize;
use tracing::info;

use crate::cli::{output, Cli, OutputFormat};

/// Render a release history into a linked changelog
#[derive(Debug, Args)]
pub struct RenderCommand {
    /// Release history JSON (releases newest first)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write the changelog to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only append short revisions; no repository links
    #[arg(long)]
    pub short_revisions: bool,
}

/// Links attached to one release heading
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ReleaseLinks {
    pub tag: String,
    pub tag_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct RenderReport<'a> {
    document: &'a str,
    releases: Vec<ReleaseLinks>,
}

/// Tag and comparison URLs for each release, newest first
pub fn release_links(locator: &RepoLocator, history: &ReleaseHistory) -> Vec<ReleaseLinks> {
    history
        .releases
        .iter()
        .enumerate()
        .map(|(i, release)| ReleaseLinks {
            tag: release.tag.clone(),
            tag_url: locator.tag_url(&release.tag),
            compare_url: history
                .releases
                .get(i + 1)
                .map(|older| locator.diff_url(&older.tag, &release.tag)),
        })
        .collect()
}

impl RenderCommand {
    /// Execute the render command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(input = %self.input.display(), short_revisions = self.short_revisions, "executing render command");

        let content = std::fs::read_to_string(&self.input)
            .with_context(|| format!("failed to read {}", self.input.display()))?;
        let history: ReleaseHistory = serde_json::from_str(&content)
            .with_context(|| format!("invalid release history in {}", self.input.display()))?;

        let (document, links) = if self.short_revisions {
            let config = cli.resolve_changelog_config()?;
            (render_short(&config, &history), Vec::new())
        } else {
            let config = cli.resolve_config()?;
            render_linked(&config, &history)?
        };

        if let Some(path) = &self.output {
            std::fs::write(path, &document)
                .with_context(|| format!("failed to write {}", path.display()))?;
            if !cli.quiet {
                output::success(&format!("Changelog written to {}", path.display()));
            }
            return Ok(());
        }

        match cli.format {
            OutputFormat::Json => {
                let report = RenderReport {
                    document: &document,
                    releases: links,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => print!("{}", document),
        }

        Ok(())
    }
}

/// Run the full linking pipeline for a release history
pub fn render_linked(
    config: &Config,
    history: &ReleaseHistory,
) -> anyhow::Result<(String, Vec<ReleaseLinks>)> {
    let hooks = LinkAugmentation::from_config(config)?;
    let links = release_links(hooks.locator(), history);
    let mut pipeline = ChangelogPipeline::new(hooks, config.changelog.clone());
    Ok((pipeline.run(history), links))
}

/// Render with short revisions only; no repository links
pub fn render_short(config: &Config, history: &ReleaseHistory) -> String {
    let mut pipeline =
        ChangelogPipeline::new(ShortRevisionAugmentation::new(), config.changelog.clone());
    pipeline.run(history)
}
