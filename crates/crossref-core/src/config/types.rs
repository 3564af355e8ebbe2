//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::defaults::{DEFAULT_CHANGELOG_FILE, DEFAULT_HOST};

/// Main configuration for Crossref
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository identity used to build links
    pub repository: RepositoryConfig,

    /// Which link passes run
    pub links: LinksConfig,

    /// Changelog rendering configuration
    pub changelog: ChangelogConfig,
}

impl Config {
    /// Create a configuration for a repository with every other setting defaulted
    pub fn for_repository(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            repository: RepositoryConfig {
                owner: owner.into(),
                name: name.into(),
                ..RepositoryConfig::default()
            },
            ..Self::default()
        }
    }
}

/// Repository identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Repository owner (user or organization)
    pub owner: String,

    /// Repository name
    pub name: String,

    /// Web host serving the repository
    pub host: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            name: String::new(),
            host: DEFAULT_HOST.to_string(),
        }
    }
}

/// Switches for the individual link passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Link `#123` issue references in commit messages
    pub issues: bool,

    /// Append a short revision link to each commit message
    pub commits: bool,

    /// Link release headings to the diff against the previous release
    pub compare: bool,

    /// Record breaking changes and link them back to their commits
    pub breaking_changes: bool,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            issues: true,
            commits: true,
            compare: true,
            breaking_changes: true,
        }
    }
}

/// Changelog rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path
    pub file: PathBuf,

    /// Header placed above the first release
    pub header: Option<String>,

    /// Section title and visibility per commit type
    pub types: HashMap<String, CommitTypeConfig>,

    /// Section titles in rendering order
    pub order: Vec<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_CHANGELOG_FILE),
            header: None,
            types: super::defaults::default_commit_types(),
            order: super::defaults::default_section_order(),
        }
    }
}

impl ChangelogConfig {
    /// Section title for a commit type, `None` when hidden or unknown
    pub fn section_for(&self, commit_type: &str) -> Option<&str> {
        self.types
            .get(commit_type)
            .filter(|t| !t.hidden)
            .map(|t| t.section.as_str())
    }

    /// Position of a section in the configured order
    pub fn section_rank(&self, section: &str) -> usize {
        self.order
            .iter()
            .position(|s| s == section)
            .unwrap_or(self.order.len())
    }
}

/// Configuration for a commit type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitTypeConfig {
    /// Section title in changelog
    pub section: String,

    /// Whether to hide this type from the changelog
    #[serde(default)]
    pub hidden: bool,
}

impl CommitTypeConfig {
    /// Create a visible commit type
    pub fn visible(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            hidden: false,
        }
    }

    /// Create a hidden commit type
    pub fn hidden(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            hidden: true,
        }
    }
}
