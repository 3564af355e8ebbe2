//! Full cross-reference linking

use crossref_core::config::{validate_repository, Config};
use crossref_core::{LinksConfig, Result};
use tracing::{debug, info, instrument, warn};

use super::ChangelogHooks;
use crate::breaking::BreakingChangeLog;
use crate::commit::CommitLinker;
use crate::document::DocumentLinker;
use crate::locator::RepoLocator;
use crate::types::{BreakingChange, CommitRecord, ParsedMessage};

/// Where a generation run stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Commits are being augmented and breaking changes collected
    Accumulating,
    /// The document has been augmented and the collected changes consumed
    Finalized,
}

/// Links issues, commits, release comparisons and breaking changes.
///
/// One instance serves one generation run: commits first, then a single
/// document pass that drains the breaking change log.
#[derive(Debug, Clone)]
pub struct LinkAugmentation {
    commits: CommitLinker,
    document: DocumentLinker,
    links: LinksConfig,
    breaking: BreakingChangeLog,
    phase: Phase,
}

impl LinkAugmentation {
    /// Create an augmentation with every link pass enabled
    pub fn new(locator: RepoLocator) -> Self {
        Self::with_links(locator, LinksConfig::default())
    }

    /// Create an augmentation running only the selected passes
    pub fn with_links(locator: RepoLocator, links: LinksConfig) -> Self {
        Self {
            commits: CommitLinker::new(locator.clone()).with_links(links),
            document: DocumentLinker::new(locator).with_links(links),
            links,
            breaking: BreakingChangeLog::new(),
            phase: Phase::Accumulating,
        }
    }

    /// Create an augmentation from configuration.
    ///
    /// Fails when the repository owner or name is missing, before anything
    /// has been augmented.
    pub fn from_config(config: &Config) -> Result<Self> {
        validate_repository(&config.repository)?;
        let locator = RepoLocator::from_config(&config.repository);
        info!(repository = %locator, "link augmentation ready");
        Ok(Self::with_links(locator, config.links))
    }

    /// Repository the links point to
    pub fn locator(&self) -> &RepoLocator {
        self.commits.locator()
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Breaking changes collected so far
    pub fn breaking_changes(&self) -> &BreakingChangeLog {
        &self.breaking
    }

    /// Augment the document with an explicit set of breaking changes
    pub fn link_document(&self, document: &str, changes: &[BreakingChange]) -> String {
        self.document.link_document(document, changes)
    }
}

impl ChangelogHooks for LinkAugmentation {
    #[instrument(skip(self, parsed, commit), fields(revision = %commit.short_revision()))]
    fn augment_commit_message(
        &mut self,
        mut parsed: ParsedMessage,
        commit: &CommitRecord,
    ) -> ParsedMessage {
        if self.phase == Phase::Finalized {
            warn!("commit augmented after the changelog was finalized");
        }

        parsed.message = self.commits.link_message(&parsed.message, commit);

        if self.links.breaking_changes {
            self.breaking.extend_from_body(&commit.body, &commit.revision);
        }

        parsed
    }

    #[instrument(skip(self, document), fields(document_len = document.len()))]
    fn augment_document(&mut self, document: &str) -> String {
        let changes = self.breaking.drain();
        if self.phase == Phase::Finalized && changes.is_empty() {
            debug!("changelog already finalized");
        }
        self.phase = Phase::Finalized;
        self.document.link_document(document, &changes)
    }
}
