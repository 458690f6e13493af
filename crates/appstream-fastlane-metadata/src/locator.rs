//! Source tree scan.
//!
//! Android applications are discovered through their `AndroidManifest.xml`
//! (or a configure-time `AndroidManifest.xml.in` template). A manifest
//! describes an application, rather than a library, when one of its
//! activities carries the `android.app.lib_name` meta-data entry. The
//! manifest's package name then selects the AppStream document and desktop
//! entry of the application.

use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, info, instrument};

use appstream_fastlane_core::ScanConfig;

use crate::search::{find_files, find_first};
use crate::types::bundle::ApplicationSource;
use crate::xml;
use crate::Result;

const ANDROID_NAME: &str = "android:name";
const ANDROID_ICON: &str = "android:icon";

/// Application declared by an Android manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestApplication {
    /// Package name (the application identifier).
    pub package: String,
    /// Icon resource name without its resource directory.
    pub icon_base_name: Option<String>,
}

/// Inspect one manifest; `None` when it does not declare an application.
pub fn inspect_manifest(path: &Path, config: &ScanConfig) -> Result<Option<ManifestApplication>> {
    let root = xml::load_document(path)?;

    let Some(package) = root.attr("package").filter(|p| !p.is_empty()) else {
        debug!(manifest = %path.display(), "manifest has no package name");
        return Ok(None);
    };

    let is_app = root
        .find_all("application/activity/meta-data")
        .into_iter()
        .any(|meta| meta.attr(ANDROID_NAME) == Some(config.lib_name_marker.as_str()));
    if !is_app {
        debug!(manifest = %path.display(), package, "manifest is not an application");
        return Ok(None);
    }

    let icon_base_name = root
        .find_all("application")
        .into_iter()
        .filter_map(|application| application.attr(ANDROID_ICON))
        .last()
        .and_then(|icon| icon.rsplit('/').next())
        .map(str::to_string);

    Ok(Some(ManifestApplication {
        package: package.to_string(),
        icon_base_name,
    }))
}

/// Find every application of a source tree.
#[instrument(skip(config), fields(source = %source.display()))]
pub fn locate_applications(source: &Path, config: &ScanConfig) -> Result<Vec<ApplicationSource>> {
    let mut applications = Vec::new();

    for manifest in find_files(source, "**/AndroidManifest.xml*")? {
        if is_excluded(source, &manifest, config) {
            debug!(manifest = %manifest.display(), "skipping third-party manifest");
            continue;
        }

        let Some(app) = inspect_manifest(&manifest, config)? else {
            continue;
        };

        let Some(appstream) = find_appstream(source, &app.package)? else {
            debug!(package = %app.package, "no AppStream document, skipping");
            continue;
        };

        let desktop = find_first(
            source,
            &format!("**/{}.desktop", Pattern::escape(&app.package)),
        )?;

        info!(
            package = %app.package,
            appstream = %appstream.display(),
            desktop = desktop.is_some(),
            "found application"
        );
        applications.push(ApplicationSource {
            appstream,
            desktop,
            icon_base_name: app.icon_base_name,
        });
    }

    Ok(applications)
}

/// First `<package>.metainfo.xml`, else first `<package>.appdata.xml`.
pub fn find_appstream(source: &Path, package: &str) -> Result<Option<PathBuf>> {
    let package = Pattern::escape(package);
    if let Some(found) = find_first(source, &format!("**/{}.metainfo.xml", package))? {
        return Ok(Some(found));
    }
    find_first(source, &format!("**/{}.appdata.xml", package))
}

fn is_excluded(source: &Path, manifest: &Path, config: &ScanConfig) -> bool {
    let relative = manifest.strip_prefix(source).unwrap_or(manifest);
    let relative = relative.to_string_lossy();
    config
        .exclude
        .iter()
        .any(|marker| !marker.is_empty() && relative.contains(marker.as_str()))
}
