//! Breaking change collection
//!
//! Breaking changes are announced in commit bodies and only linked once the
//! whole changelog exists, so they are collected in a log that lives for one
//! generation run and is drained exactly once.

use tracing::debug;

use crate::types::BreakingChange;

/// Marker introducing a breaking change line in a commit body
pub const BREAKING_CHANGE_MARKER: &str = "BREAKING CHANGE: ";

/// Extract breaking change texts from a commit body, in body order.
///
/// Only lines starting with the marker count. Trailing whitespace is dropped
/// and blank remainders are skipped, since an empty text would match the end
/// of every changelog line.
pub fn scan_breaking_changes(body: &str) -> Vec<&str> {
    body.lines()
        .filter_map(|line| line.strip_prefix(BREAKING_CHANGE_MARKER))
        .map(str::trim_end)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Ordered log of breaking changes found during one run
#[derive(Debug, Clone, Default)]
pub struct BreakingChangeLog {
    records: Vec<BreakingChange>,
}

impl BreakingChangeLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record
    pub fn record(&mut self, change: BreakingChange) {
        self.records.push(change);
    }

    /// Record every breaking change announced in a commit body.
    ///
    /// Returns the number of records added.
    pub fn extend_from_body(&mut self, body: &str, revision: &str) -> usize {
        let before = self.records.len();
        self.records.extend(
            scan_breaking_changes(body)
                .into_iter()
                .map(|text| BreakingChange::new(text, revision)),
        );
        let added = self.records.len() - before;
        if added > 0 {
            debug!(revision, added, total = self.records.len(), "recorded breaking changes");
        }
        added
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in encounter order
    pub fn iter(&self) -> impl Iterator<Item = &BreakingChange> {
        self.records.iter()
    }

    /// Take every record, leaving the log empty
    pub fn drain(&mut self) -> Vec<BreakingChange> {
        std::mem::take(&mut self.records)
    }
}
