//! Fastlane-compatible output layout.
//!
//! ## Directory Structure
//!
//! ```text
//! metadata/
//! ├── {app_id}.yml
//! ├── fastlane-{app_id}.zip
//! └── {app_id}/
//!     └── {locale}/
//!         ├── title.txt
//!         ├── short_description.txt
//!         ├── full_description.txt
//!         └── images/
//!             ├── icon.png
//!             └── phoneScreenshots/
//!                 └── {n}-{name}.png
//! ```
//!
//! See <https://docs.fastlane.tools/actions/supply/> for the layout and
//! <https://f-droid.org/en/docs/All_About_Descriptions_Graphics_and_Screenshots/>
//! for how F-Droid consumes it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::types::language::LanguageTable;
use crate::types::translations::Translations;
use crate::Result;

/// File holding the application name.
pub const TITLE_FILE: &str = "title.txt";
/// File holding the summary.
pub const SHORT_DESCRIPTION_FILE: &str = "short_description.txt";
/// File holding the description.
pub const FULL_DESCRIPTION_FILE: &str = "full_description.txt";
/// Image directory inside a locale directory.
pub const IMAGES_DIR: &str = "images";
/// Store icon inside the image directory.
pub const ICON_FILE: &str = "icon.png";

/// The `metadata/` directory of an output tree.
#[derive(Debug, Clone)]
pub struct FastlaneLayout {
    /// Base path for all metadata (`<output>/metadata`).
    metadata_root: PathBuf,
    table: LanguageTable,
}

impl FastlaneLayout {
    /// Layout below `output`, resolving languages through `table`.
    pub fn new(output: impl AsRef<Path>, table: LanguageTable) -> Self {
        Self {
            metadata_root: output.as_ref().join("metadata"),
            table,
        }
    }

    /// The `metadata/` directory.
    pub fn metadata_root(&self) -> &Path {
        &self.metadata_root
    }

    /// Language table used for locale directories.
    pub fn table(&self) -> &LanguageTable {
        &self.table
    }

    /// Per-application directory.
    pub fn app_path(&self, app_id: &str) -> PathBuf {
        self.metadata_root.join(app_id)
    }

    /// Directory of one locale.
    pub fn locale_path(&self, app_id: &str, locale: &str) -> PathBuf {
        self.app_path(app_id).join(locale)
    }

    /// Image directory of the default locale.
    pub fn images_path(&self, app_id: &str) -> PathBuf {
        self.locale_path(app_id, self.table.default_locale())
            .join(IMAGES_DIR)
    }

    /// Canonical icon path.
    pub fn icon_path(&self, app_id: &str) -> PathBuf {
        self.images_path(app_id).join(ICON_FILE)
    }

    /// Summary descriptor path.
    pub fn summary_path(&self, app_id: &str) -> PathBuf {
        self.metadata_root.join(format!("{}.yml", app_id))
    }

    /// Archive path.
    pub fn archive_path(&self, app_id: &str) -> PathBuf {
        self.metadata_root.join(format!("fastlane-{}.zip", app_id))
    }

    /// Write one file per locale, returning the locales written.
    ///
    /// Languages without a store locale are skipped. Existing files are
    /// overwritten.
    pub fn write_translations(
        &self,
        app_id: &str,
        file_name: &str,
        translations: &Translations,
    ) -> Result<Vec<String>> {
        let mut written = Vec::new();

        for (language, text) in translations.iter() {
            let Some(locale) = self.table.resolve(language) else {
                debug!(%language, file_name, "language not supported by the store, dropping");
                continue;
            };

            let path = self.locale_path(app_id, &locale);
            fs::create_dir_all(&path)?;
            fs::write(path.join(file_name), text)?;
            written.push(locale);
        }

        Ok(written)
    }

    /// Write a YAML document next to the application directory.
    pub fn write_yaml<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(value)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Remove the default locale's images so stale files never persist.
    pub fn reset_images(&self, app_id: &str) -> Result<()> {
        let images = self.images_path(app_id);
        match fs::remove_dir_all(&images) {
            Ok(()) => {
                debug!(path = %images.display(), "removed previous images");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
