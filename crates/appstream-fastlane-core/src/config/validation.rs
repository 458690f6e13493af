//! Configuration validation

use tracing::debug;
use url::Url;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_store(config)?;
    validate_languages(config)?;
    validate_assets(config)?;
    validate_git(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_store(config: &Config) -> Result<()> {
    for (field, value) in [
        ("store.donation_url", &config.store.donation_url),
        ("store.translation_url", &config.store.translation_url),
    ] {
        Url::parse(value).map_err(|e| ConfigError::InvalidValue {
            field: field.to_string(),
            message: format!("'{}' is not a valid URL: {}", value, e),
        })?;
    }

    Ok(())
}

fn validate_languages(config: &Config) -> Result<()> {
    for (code, target) in &config.languages.mappings {
        if target.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("languages.mappings.{}", code),
                message: "target locale cannot be empty, list the code under languages.unsupported to drop it".to_string(),
            }
            .into());
        }
    }

    Ok(())
}

fn validate_assets(config: &Config) -> Result<()> {
    if config.assets.icon_suffix.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "assets.icon_suffix".to_string(),
            message: "icon suffix cannot be empty".to_string(),
        }
        .into());
    }

    if config.assets.screenshot_dir.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "assets.screenshot_dir".to_string(),
            message: "screenshot directory cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_git(config: &Config) -> Result<()> {
    if config.git.remote.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "git.remote".to_string(),
            message: "remote cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}
