//! Plain short revision suffixes

use tracing::debug;

use super::ChangelogHooks;
use crate::types::{CommitRecord, ParsedMessage};

/// Appends ` (abcdef1)` to each message and leaves the document alone.
///
/// Useful when the changelog is not published next to a web host.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortRevisionAugmentation;

impl ShortRevisionAugmentation {
    /// Create the augmentation
    pub fn new() -> Self {
        Self
    }
}

impl ChangelogHooks for ShortRevisionAugmentation {
    fn augment_commit_message(
        &mut self,
        mut parsed: ParsedMessage,
        commit: &CommitRecord,
    ) -> ParsedMessage {
        parsed.message = format!("{} ({})", parsed.message, commit.short_revision());
        debug!(revision = commit.short_revision(), "appended short revision");
        parsed
    }

    fn augment_document(&mut self, document: &str) -> String {
        document.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_short_revision() {
        let mut hooks = ShortRevisionAugmentation::new();
        let parsed = hooks.augment_commit_message(
            ParsedMessage::new("add login").with_change_type("feat"),
            &CommitRecord::new("abcdef1234567890", "feat: add login"),
        );
        assert_eq!(parsed.message, "add login (abcdef1)");
        assert_eq!(parsed.change_type.as_deref(), Some("feat"));
    }

    #[test]
    fn test_document_untouched() {
        let doc = "## v1.1.0 (2024-02-01)\n\n## v1.0.0 (2024-01-01)\n";
        assert_eq!(ShortRevisionAugmentation::new().augment_document(doc), doc);
    }
}
