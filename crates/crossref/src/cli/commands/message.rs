//! Message command

use clap::Args;
use crossref_changelog::{ChangelogHooks, CommitRecord, LinkAugmentation, ParsedMessage};
use crossref_core::Config;
use serde::Serialize;
use tracing::info;

use crate::cli::{output, Cli, OutputFormat};

/// Link a single commit message
#[derive(Debug, Args)]
pub struct MessageCommand {
    /// Full revision of the commit
    #[arg(long)]
    pub revision: String,

    /// Changelog line to link
    #[arg(short, long)]
    pub message: String,

    /// Commit body, scanned for breaking changes
    #[arg(long, default_value = "")]
    pub body: String,
}

/// Linked message plus the breaking changes found in the body
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MessageReport {
    pub message: String,
    pub breaking_changes: Vec<String>,
}

impl MessageCommand {
    /// Execute the message command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(revision = %self.revision, "executing message command");
        let config = cli.resolve_config()?;
        let report = self.report(&config)?;

        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => {
                println!("{}", report.message);
                if !cli.quiet {
                    for text in &report.breaking_changes {
                        eprintln!("{}", output::key_value("breaking change", text));
                    }
                }
            }
        }

        Ok(())
    }

    /// Run the commit hook over this message
    pub fn report(&self, config: &Config) -> anyhow::Result<MessageReport> {
        let mut hooks = LinkAugmentation::from_config(config)?;

        let commit = CommitRecord::new(&self.revision, &self.message).with_body(&self.body);
        let parsed = hooks.augment_commit_message(ParsedMessage::new(&self.message), &commit);

        Ok(MessageReport {
            message: parsed.message,
            breaking_changes: hooks
                .breaking_changes()
                .iter()
                .map(|c| c.text.clone())
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Commands;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_json_report_with_breaking_change() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("crossref.toml");
        std::fs::write(&path, "[repository]\nowner = \"acme\"\nname = \"widgets\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "crossref",
            "message",
            "--config",
            path.to_str().unwrap(),
            "--format",
            "json",
            "--revision",
            "deadbee0000",
            "--message",
            "drop legacy mode (#7)",
            "--body",
            "details\nBREAKING CHANGE: removes legacy flag\n",
        ])
        .unwrap();
        let Commands::Message(cmd) = &cli.command else {
            panic!("expected message command");
        };

        let report = cmd.report(&cli.resolve_config().unwrap()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json["message"],
            "drop legacy mode ([#7](https://github.com/acme/widgets/issues/7)) \
             ([deadbee](https://github.com/acme/widgets/commit/deadbee0000))"
        );
        assert_eq!(json["breaking_changes"], serde_json::json!(["removes legacy flag"]));
    }

    #[test]
    fn test_report_without_breaking_change() {
        let cmd = MessageCommand {
            revision: "abc1234999".to_string(),
            message: "fix typo".to_string(),
            body: String::new(),
        };
        let report = cmd.report(&Config::for_repository("acme", "widgets")).unwrap();
        assert!(report.breaking_changes.is_empty());
        assert!(report.message.starts_with("fix typo ([abc1234]("));
    }
}
