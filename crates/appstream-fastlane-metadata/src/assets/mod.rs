//! Image assets: images shipped in the source tree, screenshots referenced
//! by the AppStream document, and the store icon.

pub mod fetch;

use std::fs;
use std::path::{Component, Path, PathBuf};

use glob::Pattern;
use serde::Serialize;
use tracing::{debug, info, warn};

use appstream_fastlane_core::AssetsConfig;

use crate::search::{find_files, find_first};
use crate::storage::FastlaneLayout;
use crate::Result;

#[cfg(feature = "http")]
pub use fetch::HttpFetcher;
pub use fetch::{FetchError, ScreenshotFetcher};

/// Result of copying the source tree's own images.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocalImages {
    /// Destination of every copied image.
    pub copied: Vec<PathBuf>,
    /// Whether any copied image is a phone screenshot.
    pub has_screenshots: bool,
}

/// Result of downloading the document's screenshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DownloadedScreenshots {
    /// Files written, in document order.
    pub downloaded: Vec<PathBuf>,
    /// URLs that could not be retrieved.
    pub skipped: Vec<String>,
}

/// Collects image assets for one output layout.
pub struct AssetCollector<'a> {
    layout: &'a FastlaneLayout,
    source: Option<&'a Path>,
    config: &'a AssetsConfig,
}

impl<'a> AssetCollector<'a> {
    /// Collector for a layout; without a source tree only downloads happen.
    pub fn new(layout: &'a FastlaneLayout, source: Option<&'a Path>, config: &'a AssetsConfig) -> Self {
        Self {
            layout,
            source,
            config,
        }
    }

    /// Screenshot directory of the default locale.
    pub fn screenshots_path(&self, app_id: &str) -> PathBuf {
        self.layout
            .images_path(app_id)
            .join(&self.config.screenshot_dir)
    }

    /// Copy `<source>/fastlane/metadata/**/*.{png,jpg}` into the output.
    ///
    /// Single-app trees keep their images below the platform directory
    /// (`metadata/android/...`); those land in the application's directory.
    pub fn collect_local_images(&self, app_id: &str) -> Result<LocalImages> {
        let Some(source) = self.source else {
            return Ok(LocalImages::default());
        };
        let fastlane = source.join("fastlane");
        if !fastlane.is_dir() {
            debug!("source has no fastlane directory");
            return Ok(LocalImages::default());
        }

        let mut images = find_files(&fastlane, "metadata/**/*.png")?;
        images.extend(find_files(&fastlane, "metadata/**/*.jpg")?);

        let mut result = LocalImages::default();
        for image in images {
            let Ok(relative) = image.strip_prefix(fastlane.join("metadata")) else {
                continue;
            };
            let destination = self.layout.metadata_root().join(self.remap(relative, app_id));

            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(&image, &destination)?;
            debug!(from = %image.display(), to = %destination.display(), "copied image");

            if relative
                .to_string_lossy()
                .contains(self.config.screenshot_dir.as_str())
            {
                result.has_screenshots = true;
            }
            result.copied.push(destination);
        }

        info!(
            count = result.copied.len(),
            screenshots = result.has_screenshots,
            "collected local images"
        );
        Ok(result)
    }

    fn remap(&self, relative: &Path, app_id: &str) -> PathBuf {
        let mut components = relative.components();
        match components.next() {
            Some(Component::Normal(first)) if first == self.config.generic_platform_dir.as_str() => {
                Path::new(app_id).join(components.as_path())
            }
            _ => relative.to_path_buf(),
        }
    }

    /// Download every URL into the screenshot directory as `<n>-<name>`.
    ///
    /// `n` counts successful downloads only, so a failure reuses its number.
    pub fn download_screenshots(
        &self,
        app_id: &str,
        urls: &[String],
        fetcher: &dyn ScreenshotFetcher,
    ) -> Result<DownloadedScreenshots> {
        let mut result = DownloadedScreenshots::default();
        if urls.is_empty() {
            return Ok(result);
        }

        let directory = self.screenshots_path(app_id);
        fs::create_dir_all(&directory)?;

        for url in urls {
            let name = url.rsplit('/').next().unwrap_or(url.as_str());
            let file_name = format!("{}-{}", result.downloaded.len(), name);

            match fetcher.fetch(url) {
                Ok(content) => {
                    let path = directory.join(file_name);
                    fs::write(&path, content)?;
                    debug!(url = %url, path = %path.display(), "downloaded screenshot");
                    result.downloaded.push(path);
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "skipping screenshot");
                    result.skipped.push(url.clone());
                }
            }
        }

        info!(
            downloaded = result.downloaded.len(),
            skipped = result.skipped.len(),
            "downloaded screenshots"
        );
        Ok(result)
    }

    /// Make sure the store icon exists, copying `<icon_base><suffix>` from
    /// the source tree when it is missing. Returns the icon path if present.
    pub fn find_icon(&self, app_id: &str, icon_base_name: Option<&str>) -> Result<Option<PathBuf>> {
        let icon = self.layout.icon_path(app_id);
        if icon.exists() {
            return Ok(Some(icon));
        }

        let (Some(source), Some(base)) = (self.source, icon_base_name) else {
            return Ok(None);
        };

        let pattern = format!("**/{}{}", Pattern::escape(base), Pattern::escape(&self.config.icon_suffix));
        let Some(found) = find_first(source, &pattern)? else {
            debug!(icon = base, "no store icon in source tree");
            return Ok(None);
        };

        if let Some(parent) = icon.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&found, &icon)?;
        debug!(from = %found.display(), "copied store icon");
        Ok(Some(icon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::language::LanguageTable;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use tempfile::TempDir;

    /// Serves canned responses and records every request.
    #[derive(Default)]
    struct FakeFetcher {
        responses: HashMap<String, std::result::Result<Vec<u8>, FetchError>>,
        requests: RefCell<Vec<String>>,
    }

    impl FakeFetcher {
        fn serve(mut self, url: &str, response: std::result::Result<Vec<u8>, FetchError>) -> Self {
            self.responses.insert(url.to_string(), response);
            self
        }
    }

    impl ScreenshotFetcher for FakeFetcher {
        fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError> {
            self.requests.borrow_mut().push(url.to_string());
            self.responses
                .get(url)
                .cloned()
                .unwrap_or(Err(FetchError::Status(404)))
        }
    }

    fn write(path: &Path, content: &[u8]) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    struct Fixture {
        output: TempDir,
        source: TempDir,
        layout: FastlaneLayout,
        config: AssetsConfig,
    }

    fn fixture() -> Fixture {
        let output = TempDir::new().unwrap();
        let source = TempDir::new().unwrap();
        let layout = FastlaneLayout::new(output.path(), LanguageTable::builtin());
        Fixture {
            output,
            source,
            layout,
            config: AssetsConfig::default(),
        }
    }

    #[test]
    fn test_collect_local_images_remaps_platform_dir() {
        let f = fixture();
        let fastlane = f.source.path().join("fastlane/metadata");
        write(&fastlane.join("android/en-US/images/icon.png"), b"icon");
        write(&fastlane.join("android/en-US/images/phoneScreenshots/main.jpg"), b"shot");
        write(&fastlane.join("org.kde.other/en-US/images/icon.png"), b"other");
        write(&fastlane.join("android/en-US/title.txt"), b"ignored");

        let collector = AssetCollector::new(&f.layout, Some(f.source.path()), &f.config);
        let images = collector.collect_local_images("org.kde.app").unwrap();

        let metadata = f.output.path().join("metadata");
        assert!(images.has_screenshots);
        assert_eq!(images.copied.len(), 3);
        assert_eq!(
            fs::read(metadata.join("org.kde.app/en-US/images/icon.png")).unwrap(),
            b"icon"
        );
        assert!(metadata
            .join("org.kde.app/en-US/images/phoneScreenshots/main.jpg")
            .exists());
        assert!(metadata.join("org.kde.other/en-US/images/icon.png").exists());
        assert!(!metadata.join("org.kde.app/en-US/title.txt").exists());
    }

    #[test]
    fn test_collect_without_fastlane_dir() {
        let f = fixture();
        let collector = AssetCollector::new(&f.layout, Some(f.source.path()), &f.config);
        assert_eq!(
            collector.collect_local_images("org.kde.app").unwrap(),
            LocalImages::default()
        );

        let collector = AssetCollector::new(&f.layout, None, &f.config);
        assert!(collector.collect_local_images("org.kde.app").unwrap().copied.is_empty());
    }

    #[test]
    fn test_failed_download_keeps_numbering() {
        let f = fixture();
        let fetcher = FakeFetcher::default()
            .serve("https://cdn.kde.org/a.png", Err(FetchError::Status(404)))
            .serve("https://cdn.kde.org/b.png", Ok(b"b".to_vec()))
            .serve(
                "https://cdn.kde.org/c.png",
                Err(FetchError::Transport("connection reset".to_string())),
            )
            .serve("https://cdn.kde.org/d.png", Ok(b"d".to_vec()));
        let urls: Vec<String> = ["a", "b", "c", "d"]
            .iter()
            .map(|n| format!("https://cdn.kde.org/{}.png", n))
            .collect();

        let collector = AssetCollector::new(&f.layout, None, &f.config);
        let result = collector
            .download_screenshots("org.kde.app", &urls, &fetcher)
            .unwrap();

        let dir = collector.screenshots_path("org.kde.app");
        assert_eq!(result.downloaded, vec![dir.join("0-b.png"), dir.join("1-d.png")]);
        assert_eq!(
            result.skipped,
            vec!["https://cdn.kde.org/a.png", "https://cdn.kde.org/c.png"]
        );
        assert_eq!(fs::read(dir.join("0-b.png")).unwrap(), b"b");
        assert!(!dir.join("0-a.png").exists());
        assert_eq!(fetcher.requests.borrow().len(), 4);
    }

    #[test]
    fn test_no_urls_no_directory() {
        let f = fixture();
        let collector = AssetCollector::new(&f.layout, None, &f.config);
        let result = collector
            .download_screenshots("org.kde.app", &[], &FakeFetcher::default())
            .unwrap();

        assert_eq!(result, DownloadedScreenshots::default());
        assert!(!collector.screenshots_path("org.kde.app").exists());
    }

    #[test]
    fn test_find_icon_copies_first_match() {
        let f = fixture();
        write(&f.source.path().join("android/res/kate_icon-playstore.png"), b"store");
        write(&f.source.path().join("z/kate_icon-playstore.png"), b"later");
        write(&f.source.path().join("android/res/kate_icon.png"), b"plain");

        let collector = AssetCollector::new(&f.layout, Some(f.source.path()), &f.config);
        let icon = collector.find_icon("org.kde.kate", Some("kate_icon")).unwrap();

        assert_eq!(icon, Some(f.layout.icon_path("org.kde.kate")));
        assert_eq!(fs::read(f.layout.icon_path("org.kde.kate")).unwrap(), b"store");
    }

    #[test]
    fn test_find_icon_keeps_existing() {
        let f = fixture();
        write(&f.layout.icon_path("org.kde.kate"), b"local");
        write(&f.source.path().join("kate_icon-playstore.png"), b"store");

        let collector = AssetCollector::new(&f.layout, Some(f.source.path()), &f.config);
        collector.find_icon("org.kde.kate", Some("kate_icon")).unwrap();

        assert_eq!(fs::read(f.layout.icon_path("org.kde.kate")).unwrap(), b"local");
    }

    #[test]
    fn test_find_icon_without_name() {
        let f = fixture();
        let collector = AssetCollector::new(&f.layout, Some(f.source.path()), &f.config);
        assert_eq!(collector.find_icon("org.kde.kate", None).unwrap(), None);
    }
}
