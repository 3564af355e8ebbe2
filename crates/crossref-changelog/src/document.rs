//! Whole-document linking
//!
//! Runs once over the assembled changelog: release headings get a link to
//! the comparison with the previous release, and lines announcing a
//! recorded breaking change get a link back to their commit.

use std::sync::LazyLock;

use crossref_core::LinksConfig;
use regex::{Captures, NoExpand, Regex};
use tracing::{debug, info, instrument, warn};

use crate::commit::revision_link;
use crate::locator::RepoLocator;
use crate::types::BreakingChange;

/// Release heading, bare or already linked:
/// `## v1.2.3 (2024-01-31)` or `## [v1.2.3](https://...) (2024-01-31)`.
static TAG_HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^(?P<marker>#{1,2}) (?:\[(?P<linked>v?\d+\.\d+\.\d+[^\]\s]*)\]\([^)\r\n]*\)|(?P<tag>v?\d+\.\d+\.\d+\S*)) \((?P<date>[^)\r\n]*)\)",
    )
    .expect("Invalid regex")
});

/// One release heading found in a changelog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseHeading<'a> {
    pub tag: &'a str,
    /// Heading already carries a link
    pub linked: bool,
}

impl<'a> ReleaseHeading<'a> {
    fn from_captures(caps: &Captures<'a>) -> Option<Self> {
        match (caps.name("tag"), caps.name("linked")) {
            (Some(tag), _) => Some(Self {
                tag: tag.as_str(),
                linked: false,
            }),
            (None, Some(tag)) => Some(Self {
                tag: tag.as_str(),
                linked: true,
            }),
            (None, None) => None,
        }
    }
}

/// All release headings, linked or not, in document order (newest first)
pub fn release_headings(document: &str) -> Vec<ReleaseHeading<'_>> {
    TAG_HEADING_REGEX
        .captures_iter(document)
        .filter_map(|caps| ReleaseHeading::from_captures(&caps))
        .collect()
}

/// Tags of all release headings in document order (newest first)
pub fn release_tags(document: &str) -> Vec<&str> {
    release_headings(document).into_iter().map(|h| h.tag).collect()
}

/// Number of bare headings that have an older release below them
pub fn pending_tag_links(document: &str) -> usize {
    count_pending(&release_headings(document))
}

fn count_pending(headings: &[ReleaseHeading<'_>]) -> usize {
    headings
        .iter()
        .take(headings.len().saturating_sub(1))
        .filter(|h| !h.linked)
        .count()
}

/// Adds comparison and breaking change links to a changelog document
#[derive(Debug, Clone)]
pub struct DocumentLinker {
    locator: RepoLocator,
    links: LinksConfig,
}

impl DocumentLinker {
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

    /// Link each bare release heading to the diff against the release below it.
    ///
    /// Headings are paired by position with the next heading down, whether
    /// that one is already linked or not, so a release prepended to a linked
    /// changelog compares against its direct predecessor. The oldest release
    /// (the last heading) stays unlinked, and headings that already carry a
    /// link are left as they are. Marker and date are kept.
    pub fn link_tags(&self, document: &str) -> String {
        let headings = release_headings(document);
        let pending = count_pending(&headings);
        debug!(tag_count = headings.len(), pending, "found release headings");
        if pending == 0 {
            return document.to_string();
        }

        let mut position = 0;
        TAG_HEADING_REGEX
            .replace_all(document, |caps: &Captures<'_>| {
                let older = headings.get(position + 1);
                position += 1;
                match (caps.name("tag"), older) {
                    (Some(newer), Some(older)) => format!(
                        "{} [{}]({}) ({})",
                        &caps["marker"],
                        newer.as_str(),
                        self.locator.diff_url(older.tag, newer.as_str()),
                        &caps["date"]
                    ),
                    _ => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    /// Append a commit link to every line ending with a breaking change text.
    ///
    /// Texts are matched literally and only at the end of a line. A text
    /// that matches nothing is skipped.
    pub fn link_breaking_changes(&self, document: &str, changes: &[BreakingChange]) -> String {
        let mut document = document.to_string();

        for change in changes {
            let pattern = format!(r"(?mR){}$", regex::escape(&change.text));
            let line_end = match Regex::new(&pattern) {
                Ok(re) => re,
                Err(e) => {
                    warn!(text = %change.text, error = %e, "cannot match breaking change text");
                    continue;
                }
            };

            let matches = line_end.find_iter(&document).count();
            if matches == 0 {
                debug!(text = %change.text, revision = %change.revision, "breaking change not found in changelog");
                continue;
            }

            let replacement = format!(
                "{} {}",
                change.text,
                revision_link(&self.locator, &change.revision)
            );
            document = line_end
                .replace_all(&document, NoExpand(&replacement))
                .into_owned();
            debug!(text = %change.text, matches, "linked breaking change");
        }

        document
    }

    /// Run the enabled document passes
    #[instrument(skip(self, document, changes), fields(document_len = document.len(), breaking_count = changes.len()))]
    pub fn link_document(&self, document: &str, changes: &[BreakingChange]) -> String {
        let mut linked = if self.links.compare {
            self.link_tags(document)
        } else {
            document.to_string()
        };

        if self.links.breaking_changes {
            linked = self.link_breaking_changes(&linked, changes);
        }

        info!(
            input_len = document.len(),
            output_len = linked.len(),
            "changelog document linked"
        );
        linked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://github.com/acme/widgets";

    fn linker() -> DocumentLinker {
        DocumentLinker::new(RepoLocator::new("acme", "widgets"))
    }

    #[test]
    fn test_release_tags_in_document_order() {
        let doc = "# Changelog\n\n## v1.2.0 (2024-03-01)\n\n- a\n\n## v1.1.0 (2024-02-01)\n\n### Feat\n\n## v1.0.0 (2024-01-01)\n";
        assert_eq!(release_tags(doc), vec!["v1.2.0", "v1.1.0", "v1.0.0"]);
    }

    #[test]
    fn test_release_headings_include_linked() {
        let doc = format!(
            "## v1.2.0 (2024-03-01)\n\n## [v1.1.0]({BASE}/compare/v1.0.0...v1.1.0) (2024-02-01)\n\n## v1.0.0 (2024-01-01)\n"
        );
        let headings = release_headings(&doc);
        assert_eq!(release_tags(&doc), vec!["v1.2.0", "v1.1.0", "v1.0.0"]);
        assert_eq!(
            headings.iter().map(|h| h.linked).collect::<Vec<_>>(),
            vec![false, true, false]
        );
        assert_eq!(pending_tag_links(&doc), 1);
    }

    #[test]
    fn test_release_tags_ignores_deeper_headings_and_prose() {
        let doc = "### v1.0.0 (2024-01-01)\ntext ## v2.0.0 (2024-01-01)\n## Unreleased\n";
        assert!(release_tags(doc).is_empty());
    }

    #[test]
    fn test_link_tags_three_releases() {
        let doc = "## v3.0.0 (2024-03-01)\n\n- c\n\n## v2.0.0 (2024-02-01)\n\n- b\n\n## v1.0.0 (2024-01-01)\n\n- a\n";
        let linked = linker().link_tags(doc);
        assert_eq!(
            linked,
            format!(
                "## [v3.0.0]({BASE}/compare/v2.0.0...v3.0.0) (2024-03-01)\n\n- c\n\n\
                 ## [v2.0.0]({BASE}/compare/v1.0.0...v2.0.0) (2024-02-01)\n\n- b\n\n\
                 ## v1.0.0 (2024-01-01)\n\n- a\n"
            )
        );
    }

    #[test]
    fn test_link_tags_single_release_unchanged_and_idempotent() {
        let doc = "## v1.0.0 (2024-01-01)\n\n- a\n";
        let once = linker().link_tags(doc);
        assert_eq!(once, doc);
        assert_eq!(linker().link_tags(&once), doc);
    }

    #[test]
    fn test_link_tags_twice_is_noop() {
        let doc = "## v1.1.0 (2024-02-01)\n\n## v1.0.0 (2024-01-01)\n";
        let once = linker().link_tags(doc);
        assert_eq!(linker().link_tags(&once), once);
    }

    #[test]
    fn test_link_tags_new_release_above_linked_history() {
        let history = linker().link_tags("## v1.1.0 (2024-02-01)\n\n- b\n\n## v1.0.0 (2024-01-01)\n\n- a\n");
        let doc = format!("## v1.2.0 (2024-03-01)\n\n- c\n\n{history}");

        let linked = linker().link_tags(&doc);
        assert_eq!(
            linked,
            format!(
                "## [v1.2.0]({BASE}/compare/v1.1.0...v1.2.0) (2024-03-01)\n\n- c\n\n\
                 ## [v1.1.0]({BASE}/compare/v1.0.0...v1.1.0) (2024-02-01)\n\n- b\n\n\
                 ## v1.0.0 (2024-01-01)\n\n- a\n"
            )
        );
        assert_eq!(linker().link_tags(&linked), linked);
    }

    #[test]
    fn test_link_tags_keeps_single_hash_marker() {
        let doc = "# 1.1.0 (2024-02-01)\n# 1.0.0 (2024-01-01)\n";
        let linked = linker().link_tags(doc);
        assert!(linked.starts_with(&format!(
            "# [1.1.0]({BASE}/compare/1.0.0...1.1.0) (2024-02-01)\n"
        )));
    }

    #[test]
    fn test_link_tags_prefix_sharing_tags() {
        let doc = "## v1.0.0 (2024-02-01)\n\n## v1.0.0-rc.1 (2024-01-01)\n";
        let linked = linker().link_tags(doc);
        assert_eq!(
            linked,
            format!(
                "## [v1.0.0]({BASE}/compare/v1.0.0-rc.1...v1.0.0) (2024-02-01)\n\n\
                 ## v1.0.0-rc.1 (2024-01-01)\n"
            )
        );
    }

    #[test]
    fn test_link_breaking_changes() {
        let doc = "### BREAKING CHANGE\n\n- removes legacy flag\n- keeps removes legacy flag in prose here\n";
        let changes = vec![BreakingChange::new("removes legacy flag", "deadbee0000")];
        let linked = linker().link_breaking_changes(doc, &changes);
        assert_eq!(
            linked,
            format!(
                "### BREAKING CHANGE\n\n- removes legacy flag ([deadbee]({BASE}/commit/deadbee0000))\n\
                 - keeps removes legacy flag in prose here\n"
            )
        );
    }

    #[test]
    fn test_link_breaking_changes_literal_metacharacters() {
        let doc = "- config.path (*) is now required\n- configXpath (*) is now required\n";
        let changes = vec![BreakingChange::new("config.path (*) is now required", "abc1234999")];
        let linked = linker().link_breaking_changes(doc, &changes);
        assert!(linked.contains("- config.path (*) is now required ([abc1234]("));
        assert!(linked.contains("- configXpath (*) is now required\n"));
    }

    #[test]
    fn test_link_breaking_changes_dollar_in_text() {
        let doc = "- drops $HOME expansion\n";
        let changes = vec![BreakingChange::new("drops $HOME expansion", "abc1234999")];
        let linked = linker().link_breaking_changes(doc, &changes);
        assert_eq!(
            linked,
            format!("- drops $HOME expansion ([abc1234]({BASE}/commit/abc1234999))\n")
        );
    }

    #[test]
    fn test_link_breaking_changes_duplicates_and_misses() {
        let doc = "- same words\n\n- same words\n";
        let changes = vec![
            BreakingChange::new("same words", "1111111aaaa"),
            BreakingChange::new("never rendered", "2222222bbbb"),
        ];
        let linked = linker().link_breaking_changes(doc, &changes);
        assert_eq!(linked.matches("([1111111](").count(), 2);
        assert!(!linked.contains("2222222"));
    }

    #[test]
    fn test_link_breaking_changes_crlf() {
        let doc = "- removes legacy flag\r\n- other\r\n";
        let changes = vec![BreakingChange::new("removes legacy flag", "deadbee0000")];
        let linked = linker().link_breaking_changes(doc, &changes);
        assert!(linked.starts_with(&format!(
            "- removes legacy flag ([deadbee]({BASE}/commit/deadbee0000))\r\n"
        )));
    }

    #[test]
    fn test_link_document_respects_switches() {
        let doc = "## v1.1.0 (2024-02-01)\n\n- removes legacy flag\n\n## v1.0.0 (2024-01-01)\n";
        let changes = vec![BreakingChange::new("removes legacy flag", "deadbee0000")];
        let links = LinksConfig {
            compare: false,
            ..LinksConfig::default()
        };
        let linked = linker().with_links(links).link_document(doc, &changes);
        assert!(linked.starts_with("## v1.1.0 (2024-02-01)"));
        assert!(linked.contains("([deadbee]("));
    }
}
