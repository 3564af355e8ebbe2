//! Changelog generation pipeline
//!
//! Drives one generation run: every commit goes through the hooks in
//! history order, the releases are rendered, and the rendered document goes
//! through the hooks exactly once.

use crossref_core::config::ChangelogConfig;
use tracing::{debug, info, instrument};

use crate::breaking::scan_breaking_changes;
use crate::formatter::{ChangelogFormatter, MarkdownFormatter, ReleaseEntry};
use crate::hooks::ChangelogHooks;
use crate::types::ReleaseHistory;

/// Changelog pipeline
pub struct ChangelogPipeline {
    hooks: Box<dyn ChangelogHooks>,
    formatter: Box<dyn ChangelogFormatter>,
    config: ChangelogConfig,
}

impl ChangelogPipeline {
    /// Create a pipeline with the markdown formatter
    pub fn new<H: ChangelogHooks + 'static>(hooks: H, config: ChangelogConfig) -> Self {
        Self {
            hooks: Box::new(hooks),
            formatter: Box::new(MarkdownFormatter::new()),
            config,
        }
    }

    /// Use a custom formatter
    pub fn with_formatter<F: ChangelogFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Augment every commit message and collect releases for rendering
    #[instrument(skip(self, history), fields(release_count = history.releases.len()))]
    pub fn prepare(&mut self, history: &ReleaseHistory) -> Vec<ReleaseEntry> {
        let mut entries = Vec::with_capacity(history.releases.len());

        for release in &history.releases {
            let mut entry = ReleaseEntry::new(&release.tag, release.date);

            for item in &release.commits {
                let parsed = self
                    .hooks
                    .augment_commit_message(item.parsed.clone(), &item.commit);
                entry.messages.push(parsed);
                entry.breaking_changes.extend(
                    scan_breaking_changes(&item.commit.body)
                        .into_iter()
                        .map(str::to_string),
                );
            }

            debug!(
                tag = %release.tag,
                commit_count = release.commits.len(),
                breaking_count = entry.breaking_changes.len(),
                "release prepared"
            );
            entries.push(entry);
        }

        entries
    }

    /// Render prepared releases without document augmentation
    pub fn render(&self, entries: &[ReleaseEntry]) -> String {
        self.formatter.format(entries, &self.config)
    }

    /// Run the whole pipeline and return the final document
    #[instrument(skip(self, history), fields(release_count = history.releases.len()))]
    pub fn run(&mut self, history: &ReleaseHistory) -> String {
        let entries = self.prepare(history);
        let rendered = self.render(&entries);
        let document = self.hooks.augment_document(&rendered);
        info!(
            release_count = entries.len(),
            output_len = document.len(),
            "changelog generated"
        );
        document
    }
}
