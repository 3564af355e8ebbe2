//! Changelog formatters

mod markdown;

pub use markdown::MarkdownFormatter;

use chrono::NaiveDate;
use crossref_core::config::ChangelogConfig;

use crate::types::ParsedMessage;

/// One release ready to be rendered
#[derive(Debug, Clone)]
pub struct ReleaseEntry {
    /// Release tag
    pub tag: String,
    /// Release date
    pub date: NaiveDate,
    /// Augmented commit messages in history order
    pub messages: Vec<ParsedMessage>,
    /// Breaking change texts announced by the release's commits
    pub breaking_changes: Vec<String>,
}

impl ReleaseEntry {
    /// Create an empty release entry
    pub fn new(tag: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            tag: tag.into(),
            date,
            messages: Vec::new(),
            breaking_changes: Vec::new(),
        }
    }
}

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Render releases (newest first) into a changelog document
    fn format(&self, releases: &[ReleaseEntry], config: &ChangelogConfig) -> String;

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;
}
