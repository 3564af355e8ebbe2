//! Changelog types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Number of revision characters shown in links
pub const SHORT_REVISION_LEN: usize = 7;

/// Abbreviate a revision to its display prefix
pub fn short_revision(revision: &str) -> &str {
    match revision.char_indices().nth(SHORT_REVISION_LEN) {
        Some((end, _)) => &revision[..end],
        None => revision,
    }
}

/// A commit as handed over by the history walker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Full revision identifier
    pub revision: String,
    /// Commit subject line
    #[serde(default)]
    pub title: String,
    /// Commit description below the subject
    #[serde(default)]
    pub body: String,
    /// Author name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Author email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
}

impl CommitRecord {
    /// Create a new commit record
    pub fn new(revision: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            revision: revision.into(),
            title: title.into(),
            body: String::new(),
            author: None,
            author_email: None,
        }
    }

    /// Set the commit body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the author
    pub fn with_author(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.author = Some(name.into());
        self.author_email = Some(email.into());
        self
    }

    /// First characters of the revision
    pub fn short_revision(&self) -> &str {
        short_revision(&self.revision)
    }
}

/// A commit message already parsed by the host.
///
/// Only `message` is rewritten; any other fields the host attached are
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedMessage {
    /// Human-readable changelog line
    pub message: String,
    /// Commit type (feat, fix, etc.)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_type: Option<String>,
    /// Scope (optional, in parentheses)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Remaining host fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ParsedMessage {
    /// Create a parsed message with just a changelog line
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            change_type: None,
            scope: None,
            extra: Map::new(),
        }
    }

    /// Set the commit type
    pub fn with_change_type(mut self, change_type: impl Into<String>) -> Self {
        self.change_type = Some(change_type.into());
        self
    }

    /// Set the scope
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }
}

/// A breaking change announced in a commit body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakingChange {
    /// Text following the `BREAKING CHANGE: ` marker
    pub text: String,
    /// Full revision of the commit that announced it
    pub revision: String,
}

impl BreakingChange {
    /// Create a new breaking change record
    pub fn new(text: impl Into<String>, revision: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            revision: revision.into(),
        }
    }

    /// First characters of the originating revision
    pub fn short_revision(&self) -> &str {
        short_revision(&self.revision)
    }
}

/// Release history fed to the pipeline, newest release first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReleaseHistory {
    /// Releases in document order
    #[serde(default)]
    pub releases: Vec<Release>,
}

/// One tagged release and its commits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    /// Release tag (e.g. `v1.2.0`)
    pub tag: String,
    /// Release date
    pub date: NaiveDate,
    /// Commits in the order the history walker produced them
    #[serde(default)]
    pub commits: Vec<ReleaseCommit>,
}

/// A commit paired with its parsed message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseCommit {
    /// Raw commit record
    pub commit: CommitRecord,
    /// Host-parsed message
    pub parsed: ParsedMessage,
}
