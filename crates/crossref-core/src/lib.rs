//! Crossref Core - Shared foundations for changelog link augmentation
//!
//! This crate provides the error taxonomy and the configuration system
//! (discovery, loading, validation, defaults) used by the augmentation
//! pipeline and the `crossref` CLI.

pub mod config;
pub mod error;

pub use config::{Config, LinksConfig, RepositoryConfig};
pub use error::{ConfigError, CrossrefError, Result};
