//! appstream-fastlane core
//!
//! This crate provides the configuration system and the error taxonomy shared
//! by the metadata converter and the command line tool.

pub mod config;
pub mod error;

pub use config::{
    find_config, load_config, load_config_or_default, validate_config, AssetsConfig, Config,
    GitConfig, LanguagesConfig, ScanConfig, StoreConfig,
};
pub use error::{ConfigError, CoreError, GitError, Result};
