//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::defaults::*;

/// Main configuration for appstream-fastlane
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Store summary configuration
    pub store: StoreConfig,

    /// Language mapping configuration
    pub languages: LanguagesConfig,

    /// Source tree scan configuration
    pub scan: ScanConfig,

    /// Image asset configuration
    pub assets: AssetsConfig,

    /// Git configuration
    pub git: GitConfig,
}

/// Values written into the per-application summary descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Category always appended to the category list
    pub extra_category: String,

    /// Donation URL used when the document has none
    pub donation_url: String,

    /// Translation portal URL
    pub translation_url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            extra_category: DEFAULT_EXTRA_CATEGORY.to_string(),
            donation_url: DEFAULT_DONATION_URL.to_string(),
            translation_url: DEFAULT_TRANSLATION_URL.to_string(),
        }
    }
}

/// Additions to the built-in language table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguagesConfig {
    /// Extra or overriding mappings from document language to store locale
    pub mappings: BTreeMap<String, String>,

    /// Document languages the store does not support; dropped from output
    pub unsupported: Vec<String>,
}

/// Source tree scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Manifests whose path contains any of these fragments are ignored
    pub exclude: Vec<String>,

    /// Activity meta-data name that marks a manifest as an application
    pub lib_name_marker: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude: vec![DEFAULT_VENDOR_MARKER.to_string()],
            lib_name_marker: DEFAULT_LIB_NAME_MARKER.to_string(),
        }
    }
}

/// Image asset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Suffix appended to the manifest icon name when searching the store icon
    pub icon_suffix: String,

    /// Directory name of phone screenshots
    pub screenshot_dir: String,

    /// Platform-neutral application directory of single-app layouts
    pub generic_platform_dir: String,

    /// Whether screenshots referenced by the document are downloaded
    pub download_screenshots: bool,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            icon_suffix: DEFAULT_ICON_SUFFIX.to_string(),
            screenshot_dir: DEFAULT_SCREENSHOT_DIR.to_string(),
            generic_platform_dir: DEFAULT_GENERIC_PLATFORM_DIR.to_string(),
            download_screenshots: true,
        }
    }
}

/// Git configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Remote whose URL is published as the source repository
    pub remote: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: DEFAULT_GIT_REMOTE.to_string(),
        }
    }
}
