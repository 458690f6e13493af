//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "appstream-fastlane.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "appstream-fastlane.yaml";

/// Tag appended to every category list
pub const DEFAULT_EXTRA_CATEGORY: &str = "KDE";

/// Donation address used when the document declares none
pub const DEFAULT_DONATION_URL: &str = "https://kde.org/community/donations/";

/// Translation portal advertised in every summary
pub const DEFAULT_TRANSLATION_URL: &str = "https://l10n.kde.org/";

/// Path fragment marking vendored third-party code
pub const DEFAULT_VENDOR_MARKER: &str = "3rdparty";

/// Manifest meta-data name that marks an application rather than a library
pub const DEFAULT_LIB_NAME_MARKER: &str = "android.app.lib_name";

/// Suffix of the store icon searched for in the source tree
pub const DEFAULT_ICON_SUFFIX: &str = "-playstore.png";

/// Directory holding phone screenshots in the fastlane layout
pub const DEFAULT_SCREENSHOT_DIR: &str = "phoneScreenshots";

/// Platform-neutral directory used by single-app fastlane layouts
pub const DEFAULT_GENERIC_PLATFORM_DIR: &str = "android";

/// Remote queried for the source repository URL
pub const DEFAULT_GIT_REMOTE: &str = "origin";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".appstream-fastlane.toml",
        ".appstream-fastlane.yaml",
    ]
}
