//! Default configuration values

use std::collections::HashMap;

use super::types::CommitTypeConfig;

/// Default web host for repository links
pub const DEFAULT_HOST: &str = "https://github.com";

/// Default changelog file
pub const DEFAULT_CHANGELOG_FILE: &str = "CHANGELOG.md";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "crossref.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "crossref.yaml";

/// Section title for breaking changes
pub const BREAKING_CHANGE_SECTION: &str = "BREAKING CHANGE";

/// Get list of native config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".crossref.toml",
        ".crossref.yaml",
    ]
}

/// Commitizen config files that may carry `github_repo_owner` / `github_repo_name`
pub fn commitizen_file_names() -> Vec<&'static str> {
    vec![".cz.toml", "cz.toml", "pyproject.toml"]
}

/// Conventional commit types and their changelog sections
pub fn default_commit_types() -> HashMap<String, CommitTypeConfig> {
    let visible = [
        ("feat", "Feat"),
        ("fix", "Fix"),
        ("perf", "Perf"),
        ("refactor", "Refactor"),
    ];
    let hidden = [
        ("style", "Style"),
        ("build", "Build"),
        ("test", "Test"),
        ("docs", "Docs"),
        ("ci", "CI"),
        ("chore", "Chore"),
    ];

    let mut types = HashMap::new();
    types.insert(
        BREAKING_CHANGE_SECTION.to_string(),
        CommitTypeConfig::visible(BREAKING_CHANGE_SECTION),
    );
    for (name, section) in visible {
        types.insert(name.to_string(), CommitTypeConfig::visible(section));
    }
    for (name, section) in hidden {
        types.insert(name.to_string(), CommitTypeConfig::hidden(section));
    }
    types
}

/// Section titles in rendering order
pub fn default_section_order() -> Vec<String> {
    [
        BREAKING_CHANGE_SECTION,
        "Feat",
        "Fix",
        "Perf",
        "Refactor",
        "Style",
        "Build",
        "Test",
        "Docs",
        "CI",
        "Chore",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Render a starter configuration file
pub fn config_template(owner: &str, name: &str) -> String {
    format!(
        r##"# Crossref Configuration

[repository]
owner = "{owner}"
name = "{name}"
host = "{DEFAULT_HOST}"

[links]
issues = true
commits = true
compare = true
breaking_changes = true

[changelog]
file = "{DEFAULT_CHANGELOG_FILE}"
header = "# Changelog"
"##
    )
}
