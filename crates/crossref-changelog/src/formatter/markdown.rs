//! Markdown changelog formatter

use crossref_core::config::{ChangelogConfig, BREAKING_CHANGE_SECTION};
use tracing::{debug, instrument};

use super::{ChangelogFormatter, ReleaseEntry};
use crate::types::ParsedMessage;

/// Renders `## <tag> (<date>)` headings with one `###` block per section
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self
    }

    fn entry_line(parsed: &ParsedMessage) -> String {
        match &parsed.scope {
            Some(scope) => format!("- **{}**: {}", scope, parsed.message),
            None => format!("- {}", parsed.message),
        }
    }

    /// Group a release's lines by section title, in configured order
    fn sections(release: &ReleaseEntry, config: &ChangelogConfig) -> Vec<(String, Vec<String>)> {
        let mut sections: Vec<(String, Vec<String>)> = Vec::new();
        let mut push = |title: &str, line: String| {
            match sections.iter_mut().find(|(t, _)| t == title) {
                Some((_, lines)) => lines.push(line),
                None => sections.push((title.to_string(), vec![line])),
            }
        };

        if let Some(title) = config.section_for(BREAKING_CHANGE_SECTION) {
            for text in &release.breaking_changes {
                push(title, format!("- {}", text));
            }
        }

        for parsed in &release.messages {
            let Some(change_type) = parsed.change_type.as_deref() else {
                continue;
            };
            if let Some(title) = config.section_for(change_type) {
                push(title, Self::entry_line(parsed));
            }
        }

        sections.sort_by_key(|(title, _)| config.section_rank(title));
        sections
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip(self, releases, config), fields(release_count = releases.len()))]
    fn format(&self, releases: &[ReleaseEntry], config: &ChangelogConfig) -> String {
        let mut output = String::new();

        if let Some(header) = &config.header {
            output.push_str(header);
            output.push_str("\n\n");
        }

        for release in releases {
            output.push_str(&format!(
                "## {} ({})\n\n",
                release.tag,
                release.date.format("%Y-%m-%d")
            ));

            for (title, lines) in Self::sections(release, config) {
                output.push_str(&format!("### {}\n\n", title));
                for line in lines {
                    output.push_str(&line);
                    output.push('\n');
                }
                output.push('\n');
            }
        }

        debug!(output_len = output.len(), "markdown changelog formatted");
        output
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}
