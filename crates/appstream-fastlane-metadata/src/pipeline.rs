//! Conversion of one application into its fastlane tree.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use appstream_fastlane_core::Config;

use crate::appstream::{application_id, load_bundle};
use crate::assets::{AssetCollector, ScreenshotFetcher};
use crate::desktop::desktop_categories;
use crate::storage::fastlane::{FULL_DESCRIPTION_FILE, SHORT_DESCRIPTION_FILE, TITLE_FILE};
use crate::storage::{create_archive, FastlaneLayout, StoreSummary};
use crate::types::bundle::ApplicationSource;
use crate::types::language::LanguageTable;
use crate::{MetadataError, Result};

/// What one conversion produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    /// Application identifier.
    pub app_id: String,
    /// Document the metadata was read from.
    pub appstream: PathBuf,
    /// Store locales that received text files.
    pub locales: Vec<String>,
    /// Summary descriptor.
    pub summary: PathBuf,
    /// Source repository published in the summary.
    pub source_repo: Option<String>,
    /// Images copied from the source tree.
    pub local_images: usize,
    /// Screenshots downloaded from the document's URLs.
    pub screenshots_downloaded: usize,
    /// Screenshot URLs that could not be retrieved.
    pub screenshots_skipped: Vec<String>,
    /// Store icon, if one was found.
    pub icon: Option<PathBuf>,
    /// Transfer archive.
    pub archive: PathBuf,
}

/// Converts applications into one output tree.
pub struct Converter {
    layout: FastlaneLayout,
    source: Option<PathBuf>,
    config: Config,
    fetcher: Option<Box<dyn ScreenshotFetcher>>,
}

impl Converter {
    /// Converter writing below `output`. Screenshots are only downloaded
    /// once a fetcher is set.
    pub fn new(output: impl AsRef<Path>, config: Config) -> Self {
        let table = LanguageTable::from_config(&config.languages);
        Self {
            layout: FastlaneLayout::new(output, table),
            source: None,
            config,
            fetcher: None,
        }
    }

    /// Source tree used for local images, the icon and the repository URL.
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Fetcher used for screenshot downloads.
    pub fn with_fetcher(mut self, fetcher: Box<dyn ScreenshotFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Output layout.
    pub fn layout(&self) -> &FastlaneLayout {
        &self.layout
    }

    /// Convert every application in order, stopping at the first failure.
    pub fn convert_all(&self, applications: &[ApplicationSource]) -> Result<Vec<ConversionReport>> {
        applications.iter().map(|app| self.convert(app)).collect()
    }

    /// Convert one application.
    #[instrument(skip(self, application), fields(appstream = %application.appstream.display()))]
    pub fn convert(&self, application: &ApplicationSource) -> Result<ConversionReport> {
        let app_id = application_id(&application.appstream).ok_or_else(|| {
            MetadataError::InvalidFormat(format!(
                "cannot derive an application id from {}",
                application.appstream.display()
            ))
        })?;
        info!(app = %app_id, "converting application");

        let mut bundle = load_bundle(&application.appstream)?;

        if bundle.categories.is_none() {
            if let Some(desktop) = &application.desktop {
                let categories = desktop_categories(desktop)?;
                debug!(count = categories.len(), "using desktop entry categories");
                bundle.categories = Some(categories);
            }
        }

        if let Some(source) = &self.source {
            bundle.source_repo = appstream_fastlane_git::source_fetch_url(source, &self.config.git.remote);
        }

        let mut locales = self.layout.write_translations(&app_id, TITLE_FILE, &bundle.name)?;
        merge_locales(
            &mut locales,
            self.layout
                .write_translations(&app_id, SHORT_DESCRIPTION_FILE, &bundle.summary)?,
        );
        if let Some(description) = &bundle.description {
            merge_locales(
                &mut locales,
                self.layout
                    .write_translations(&app_id, FULL_DESCRIPTION_FILE, description)?,
            );
        }
        info!(app = %app_id, locales = locales.len(), "wrote text files");

        let summary_path = self.layout.summary_path(&app_id);
        let summary = StoreSummary::from_bundle(&bundle, &self.config.store);
        self.layout.write_yaml(&summary_path, &summary)?;

        self.layout.reset_images(&app_id)?;
        let assets = AssetCollector::new(&self.layout, self.source.as_deref(), &self.config.assets);

        let local = assets.collect_local_images(&app_id)?;
        if local.has_screenshots {
            debug!("source tree provides screenshots, ignoring document screenshots");
            bundle.screenshots.clear();
        }

        let downloads = match &self.fetcher {
            Some(fetcher) if self.config.assets.download_screenshots => {
                assets.download_screenshots(&app_id, &bundle.screenshots, fetcher.as_ref())?
            }
            _ => {
                if !bundle.screenshots.is_empty() {
                    debug!(count = bundle.screenshots.len(), "screenshot downloads disabled");
                }
                Default::default()
            }
        };

        let icon = assets.find_icon(&app_id, application.icon_base_name.as_deref())?;

        let archive = create_archive(self.layout.metadata_root(), &app_id)?;
        info!(app = %app_id, archive = %archive.display(), "application converted");

        Ok(ConversionReport {
            app_id,
            appstream: application.appstream.clone(),
            locales,
            summary: summary_path,
            source_repo: bundle.source_repo,
            local_images: local.copied.len(),
            screenshots_downloaded: downloads.downloaded.len(),
            screenshots_skipped: downloads.skipped,
            icon,
            archive,
        })
    }
}

fn merge_locales(locales: &mut Vec<String>, more: Vec<String>) {
    for locale in more {
        if !locales.contains(&locale) {
            locales.push(locale);
        }
    }
}
