//! Repository locator
//!
//! Maps a repository identity to the URLs of its commits, releases, issues
//! and release comparisons. Identifiers are inserted verbatim; nothing is
//! validated or fetched.

use std::fmt;
use std::str::FromStr;

use crossref_core::config::{RepositoryConfig, DEFAULT_HOST};
use crossref_core::ConfigError;

/// Location of a hosted repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoLocator {
    owner: String,
    name: String,
    host: String,
}

impl RepoLocator {
    /// Create a locator on the default host
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            host: DEFAULT_HOST.to_string(),
        }
    }

    /// Use a different web host (e.g. a self-hosted instance)
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into().trim_end_matches('/').to_string();
        self
    }

    /// Build a locator from repository configuration
    pub fn from_config(config: &RepositoryConfig) -> Self {
        Self::new(&config.owner, &config.name).with_host(&config.host)
    }

    /// Repository owner
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base URL of the repository
    pub fn url(&self) -> String {
        format!("{}/{}/{}", self.host, self.owner, self.name)
    }

    /// URL of a single commit
    pub fn commit_url(&self, revision: &str) -> String {
        format!("{}/commit/{}", self.url(), revision)
    }

    /// URL of a release tag page
    pub fn tag_url(&self, tag: &str) -> String {
        format!("{}/releases/tag/{}", self.url(), tag)
    }

    /// URL comparing two tags, older first
    pub fn diff_url(&self, older_tag: &str, newer_tag: &str) -> String {
        format!("{}/compare/{}...{}", self.url(), older_tag, newer_tag)
    }

    /// URL of an issue, given its number without the leading `#`
    pub fn issue_url(&self, issue: &str) -> String {
        format!("{}/issues/{}", self.url(), issue)
    }
}

impl fmt::Display for RepoLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoLocator {
    type Err = ConfigError;

    /// Parse an `owner/name` slug
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(ConfigError::invalid(
                "repository",
                format!("expected 'owner/name', got '{}'", s),
            )),
        }
    }
}
