//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

use super::defaults::{commitizen_file_names, config_file_names};
use super::types::Config;
use super::validation::validate_config;

/// Table holding commitizen settings
const COMMITIZEN_TABLE: &str = "tool.commitizen";

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<Config> {
    let config = read_config(path)?;
    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Parse a configuration file without validating it.
///
/// Used where the repository identity is not needed, e.g. when only the
/// changelog layout matters.
pub fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

    let config: Config = if is_commitizen_file(path) {
        info!(path = %path.display(), format = "commitizen", "loading config");
        parse_commitizen_config(&content)?
    } else if path.extension().is_some_and(|e| e == "toml") {
        info!(path = %path.display(), format = "TOML", "loading config");
        toml::from_str(&content).map_err(ConfigError::TomlError)?
    } else {
        info!(path = %path.display(), format = "YAML", "loading config");
        serde_yaml::from_str(&content).map_err(ConfigError::YamlError)?
    };

    Ok(config)
}

/// Build a configuration from a commitizen settings file.
///
/// Only `github_repo_owner` and `github_repo_name` are read from the
/// `[tool.commitizen]` table; everything else keeps its default.
pub fn parse_commitizen_config(content: &str) -> Result<Config> {
    let document: toml::Table = toml::from_str(content).map_err(ConfigError::TomlError)?;

    let settings = document
        .get("tool")
        .and_then(|tool| tool.get("commitizen"))
        .and_then(|cz| cz.as_table())
        .ok_or_else(|| ConfigError::MissingField(COMMITIZEN_TABLE.to_string()))?;

    let setting = |key: &str| -> Result<String> {
        settings
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| ConfigError::MissingField(format!("{}.{}", COMMITIZEN_TABLE, key)).into())
    };

    Ok(Config::for_repository(
        setting("github_repo_owner")?,
        setting("github_repo_name")?,
    ))
}

fn is_commitizen_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| commitizen_file_names().contains(&n))
}

/// A commitizen file only counts when it actually carries commitizen settings.
fn has_commitizen_table(path: &Path) -> bool {
    std::fs::read_to_string(path)
        .map(|content| content.contains("[tool.commitizen]"))
        .unwrap_or(false)
}

/// Find configuration file in directory or parent directories.
///
/// At each directory level the search checks:
///   1. `<dir>/<name>`          (e.g. `crossref.toml`)
///   2. `<dir>/.github/<name>`  (e.g. `.github/crossref.toml`)
///   3. `<dir>/<commitizen file>` carrying a `[tool.commitizen]` table
///
/// The first match wins. Parents are walked until the filesystem root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let config_path = current.join(name);
            if config_path.exists() {
                info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }

            let github_path = current.join(".github").join(name);
            if github_path.exists() {
                info!(path = %github_path.display(), "found config file in .github/");
                return Some(github_path);
            }
        }

        for name in commitizen_file_names() {
            let cz_path = current.join(name);
            if cz_path.exists() && has_commitizen_table(&cz_path) {
                info!(path = %cz_path.display(), "found commitizen settings");
                return Some(cz_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration from directory (searching parent directories)
pub fn load_config_from_dir(dir: &Path) -> Result<(Config, PathBuf)> {
    let config_path = find_config(dir).ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))?;

    let config = load_config(&config_path)?;
    Ok((config, config_path))
}

/// Load configuration or use defaults.
///
/// The defaults carry no repository identity, so callers still need to
/// supply one before any links can be built.
pub fn load_config_or_default(dir: &Path) -> (Config, Option<PathBuf>) {
    match load_config_from_dir(dir) {
        Ok((config, path)) => (config, Some(path)),
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "no usable config found, using defaults");
            (Config::default(), None)
        }
    }
}
