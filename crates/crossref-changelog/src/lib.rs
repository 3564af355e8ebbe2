//! Crossref Changelog - Cross-reference links for generated release notes
//!
//! This crate rewrites machine-generated changelogs so that issue
//! references, commits, releases and breaking changes link to the hosting
//! repository. Commit messages are augmented one at a time while breaking
//! changes are collected; the assembled document is then augmented once.

pub mod breaking;
pub mod commit;
pub mod document;
pub mod formatter;
pub mod hooks;
pub mod locator;
pub mod pipeline;
pub mod types;

pub use breaking::{scan_breaking_changes, BreakingChangeLog};
pub use commit::CommitLinker;
pub use document::DocumentLinker;
pub use formatter::{ChangelogFormatter, MarkdownFormatter, ReleaseEntry};
pub use hooks::{ChangelogHooks, LinkAugmentation, Phase, ShortRevisionAugmentation};
pub use locator::RepoLocator;
pub use pipeline::ChangelogPipeline;
pub use types::{BreakingChange, CommitRecord, ParsedMessage, Release, ReleaseCommit, ReleaseHistory};
