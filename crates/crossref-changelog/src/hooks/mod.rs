//! Changelog generation hooks
//!
//! A changelog generator calls [`ChangelogHooks::augment_commit_message`]
//! once per commit while it walks history, then
//! [`ChangelogHooks::augment_document`] once on the assembled changelog.

mod link;
mod short_revision;

pub use link::{LinkAugmentation, Phase};
pub use short_revision::ShortRevisionAugmentation;

use crate::types::{CommitRecord, ParsedMessage};

/// Capabilities a changelog generator invokes while building a changelog
pub trait ChangelogHooks {
    /// Rewrite the message of one parsed commit
    fn augment_commit_message(
        &mut self,
        parsed: ParsedMessage,
        commit: &CommitRecord,
    ) -> ParsedMessage;

    /// Rewrite the complete changelog document
    fn augment_document(&mut self, document: &str) -> String;
}
