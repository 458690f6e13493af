//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

use super::defaults::config_file_names;
use super::types::Config;
use super::validation::validate_config;

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<Config> {
    let format = if path.extension().is_some_and(|e| e == "toml") {
        "TOML"
    } else {
        "YAML"
    };
    info!(path = %path.display(), format, "loading config");

    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound(path.to_path_buf())
        } else {
            ConfigError::Io(e)
        }
    })?;

    let config: Config = if format == "TOML" {
        toml::from_str(&content).map_err(ConfigError::TomlError)?
    } else {
        serde_yaml::from_str(&content).map_err(ConfigError::YamlError)?
    };

    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Find configuration file in directory or parent directories.
///
/// The first match wins. Parents are walked until the filesystem root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let config_path = current.join(name);
            if config_path.is_file() {
                info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration from an explicit path, a discovered file, or defaults.
///
/// An explicit path must exist and parse. Discovery errors fall back to the
/// defaults with a warning.
pub fn load_config_or_default(explicit: Option<&Path>, search_dir: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let Some(found) = search_dir.and_then(find_config) else {
        debug!("using default configuration");
        return Ok(Config::default());
    };

    match load_config(&found) {
        Ok(config) => Ok(config),
        Err(e) => {
            warn!(path = %found.display(), error = %e, "ignoring unusable config, using defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("appstream-fastlane.toml");
        std::fs::write(&config_path, "[git]\nremote = \"upstream\"").unwrap();

        let found = find_config(temp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_prefers_toml_over_yaml() {
        let temp = TempDir::new().unwrap();
        let toml_path = temp.path().join("appstream-fastlane.toml");
        let yaml_path = temp.path().join("appstream-fastlane.yaml");
        std::fs::write(&toml_path, "[git]\nremote = \"upstream\"").unwrap();
        std::fs::write(&yaml_path, "git:\n  remote: other").unwrap();

        let found = find_config(temp.path()).unwrap();
        assert_eq!(found, toml_path);
    }

    #[test]
    fn test_find_config_in_parent() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(".appstream-fastlane.yaml");
        std::fs::write(&config_path, "git:\n  remote: upstream").unwrap();
        let nested = temp.path().join("src").join("android");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config(&nested), Some(config_path));
    }

    #[test]
    fn test_load_config_yaml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("appstream-fastlane.yaml");
        std::fs::write(&config_path, "store:\n  extra_category: Education\n").unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.store.extra_category, "Education");
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");

        let err = load_config_or_default(Some(&missing), None).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_invalid_discovered_config_falls_back() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("appstream-fastlane.toml"),
            "[store]\ndonation_url = \"nope\"",
        )
        .unwrap();

        let config = load_config_or_default(None, Some(temp.path())).unwrap();
        assert_eq!(config.store.donation_url, Config::default().store.donation_url);
    }
}
