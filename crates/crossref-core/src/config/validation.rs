//! Configuration validation

use tracing::debug;
use url::Url;

use crate::error::{ConfigError, Result};

use super::types::{Config, RepositoryConfig};

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_repository(&config.repository)?;
    validate_changelog(config)?;
    debug!("configuration validation passed");
    Ok(())
}

/// Validate the repository identity.
///
/// Owner and name are required; an absent value is reported as a missing
/// field rather than an invalid one.
pub fn validate_repository(repository: &RepositoryConfig) -> Result<()> {
    validate_identity_part("repository.owner", &repository.owner)?;
    validate_identity_part("repository.name", &repository.name)?;
    validate_host(&repository.host)?;
    Ok(())
}

fn validate_identity_part(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingField(field.to_string()).into());
    }

    if value.contains('/') || value.chars().any(char::is_whitespace) {
        return Err(ConfigError::invalid(field, "must not contain '/' or whitespace").into());
    }

    Ok(())
}

fn validate_host(host: &str) -> Result<()> {
    let url = Url::parse(host)
        .map_err(|e| ConfigError::invalid("repository.host", format!("not a URL: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::invalid(
            "repository.host",
            "must be an absolute http or https URL",
        )
        .into());
    }

    Ok(())
}

/// Validate the changelog layout settings
pub fn validate_changelog(config: &Config) -> Result<()> {
    if let Some(i) = config.changelog.order.iter().position(|s| s.trim().is_empty()) {
        return Err(ConfigError::invalid(
            format!("changelog.order[{}]", i),
            "section title cannot be empty",
        )
        .into());
    }

    for (name, type_config) in &config.changelog.types {
        if type_config.section.trim().is_empty() {
            return Err(ConfigError::invalid(
                format!("changelog.types.{}.section", name),
                "section title cannot be empty",
            )
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CrossrefError;

    #[test]
    fn test_validate_complete_config() {
        let config = Config::for_repository("acme", "widgets");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_default_config_is_missing_owner() {
        let err = validate_config(&Config::default()).unwrap_err();
        assert!(matches!(
            err,
            CrossrefError::Config(ConfigError::MissingField(ref f)) if f == "repository.owner"
        ));
    }

    #[test]
    fn test_missing_name() {
        let config = Config::for_repository("acme", "  ");
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(
            err,
            CrossrefError::Config(ConfigError::MissingField(ref f)) if f == "repository.name"
        ));
    }

    #[test]
    fn test_owner_with_slash_is_invalid() {
        let config = Config::for_repository("acme/widgets", "widgets");
        assert!(matches!(
            validate_config(&config),
            Err(CrossrefError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_invalid_host() {
        let mut config = Config::for_repository("acme", "widgets");
        config.repository.host = "github.com".to_string();
        assert!(validate_config(&config).is_err());

        config.repository.host = "ftp://example.com".to_string();
        assert!(validate_config(&config).is_err());

        config.repository.host = "https://git.example.com/".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_section_order_entry() {
        let mut config = Config::for_repository("acme", "widgets");
        config.changelog.order.push(String::new());
        assert!(validate_config(&config).is_err());
    }
}
