//! Commit message linking
//!
//! Rewrites a single changelog line: bare issue references become issue
//! links and the originating commit is appended as a short revision link.

use std::sync::LazyLock;

use crossref_core::LinksConfig;
use regex::{Captures, Regex};
use tracing::{debug, instrument};

use crate::locator::RepoLocator;
use crate::types::{short_revision, CommitRecord};

/// Matches either an existing markdown link or a bare `#123` reference.
///
/// Existing links are matched first and left alone, which keeps references
/// inside link text or URLs from being wrapped a second time.
static ISSUE_REF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[[^\]\n]*\]\([^)\n]*\)|#(?P<number>\d+)").expect("Invalid regex")
});

/// Markdown link to a commit: `([abcdef1](<base>/commit/<revision>))`
pub fn revision_link(locator: &RepoLocator, revision: &str) -> String {
    format!(
        "([{}]({}))",
        short_revision(revision),
        locator.commit_url(revision)
    )
}

/// Adds issue and commit links to commit messages
#[derive(Debug, Clone)]
pub struct CommitLinker {
    locator: RepoLocator,
    links: LinksConfig,
}

impl CommitLinker {
    /// Create a linker with every link pass enabled
    pub fn new(locator: RepoLocator) -> Self {
        Self {
            locator,
            links: LinksConfig::default(),
        }
    }

    /// Select which link passes run
    pub fn with_links(mut self, links: LinksConfig) -> Self {
        self.links = links;
        self
    }

    /// Repository the links point to
    pub fn locator(&self) -> &RepoLocator {
        &self.locator
    }

    /// Replace every bare `#<digits>` with a link to the issue
    pub fn link_issues(&self, message: &str) -> String {
        ISSUE_REF_REGEX
            .replace_all(message, |caps: &Captures<'_>| match caps.name("number") {
                Some(number) => format!(
                    "[#{}]({})",
                    number.as_str(),
                    self.locator.issue_url(number.as_str())
                ),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Append ` ([short](commit url))` unless the message already ends with it
    pub fn append_commit_link(&self, message: &str, revision: &str) -> String {
        let suffix = format!(" {}", revision_link(&self.locator, revision));
        if message.ends_with(&suffix) {
            debug!(revision, "commit link already present");
            return message.to_string();
        }
        format!("{}{}", message, suffix)
    }

    /// Run the enabled message passes for one commit
    #[instrument(skip(self, message, commit), fields(revision = %commit.short_revision(), message_len = message.len()))]
    pub fn link_message(&self, message: &str, commit: &CommitRecord) -> String {
        let mut linked = if self.links.issues {
            self.link_issues(message)
        } else {
            message.to_string()
        };

        if self.links.commits {
            linked = self.append_commit_link(&linked, &commit.revision);
        }

        debug!(linked_len = linked.len(), "commit message linked");
        linked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linker() -> CommitLinker {
        CommitLinker::new(RepoLocator::new("acme", "widgets"))
    }

    fn commit() -> CommitRecord {
        CommitRecord::new("abcdef1234567890", "fix: resolve #42")
    }

    #[test]
    fn test_link_message_end_to_end() {
        let message = linker().link_message("fix: resolve #42", &commit());
        assert_eq!(
            message,
            "fix: resolve [#42](https://github.com/acme/widgets/issues/42) ([abcdef1](https://github.com/acme/widgets/commit/abcdef1234567890))"
        );
    }

    #[test]
    fn test_link_issues_every_occurrence() {
        let linked = linker().link_issues("closes #1, #22 and #1 again");
        assert_eq!(
            linked,
            "closes [#1](https://github.com/acme/widgets/issues/1), \
             [#22](https://github.com/acme/widgets/issues/22) and \
             [#1](https://github.com/acme/widgets/issues/1) again"
        );
        assert_eq!(linked.matches("](https://github.com/acme/widgets/issues/").count(), 3);
    }

    #[test]
    fn test_link_issues_does_not_touch_prefix_numbers() {
        let linked = linker().link_issues("see #12 and #123");
        assert!(linked.contains("[#12](https://github.com/acme/widgets/issues/12)"));
        assert!(linked.contains("[#123](https://github.com/acme/widgets/issues/123)"));
    }

    #[test]
    fn test_link_issues_without_references() {
        assert_eq!(linker().link_issues("plain message"), "plain message");
        assert_eq!(linker().link_issues("issue # 5"), "issue # 5");
    }

    #[test]
    fn test_link_issues_is_idempotent() {
        let once = linker().link_issues("resolve #42 and #7");
        let twice = linker().link_issues(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_existing_link_with_issue_number_in_url_is_kept() {
        let message = "see [the thread](https://example.com/t#99) for #5";
        let linked = linker().link_issues(message);
        assert_eq!(
            linked,
            "see [the thread](https://example.com/t#99) for [#5](https://github.com/acme/widgets/issues/5)"
        );
    }

    #[test]
    fn test_link_message_is_idempotent() {
        let once = linker().link_message("fix: resolve #42", &commit());
        let twice = linker().link_message(&once, &commit());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_short_revision_shorter_than_prefix() {
        let commit = CommitRecord::new("abc", "x");
        let message = linker().link_message("x", &commit);
        assert_eq!(message, "x ([abc](https://github.com/acme/widgets/commit/abc))");
    }

    #[test]
    fn test_disabled_passes() {
        let links = LinksConfig {
            issues: false,
            commits: false,
            ..LinksConfig::default()
        };
        let message = linker().with_links(links).link_message("fix #42", &commit());
        assert_eq!(message, "fix #42");
    }
}
