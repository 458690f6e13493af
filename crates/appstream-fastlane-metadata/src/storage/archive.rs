//! Metadata archive for transfer to the signing machine.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::{MetadataError, Result};

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
}

/// Name of an entry relative to the metadata root, `/`-separated.
fn entry_name(metadata_root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(metadata_root).map_err(|_| {
        MetadataError::Archive(format!(
            "{} is outside {}",
            path.display(),
            metadata_root.display()
        ))
    })?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

/// Write `fastlane-<app_id>.zip` holding `<app_id>.yml` and the `<app_id>/`
/// tree, replacing any previous archive.
#[instrument(skip(metadata_root), fields(root = %metadata_root.display()))]
pub fn create_archive(metadata_root: &Path, app_id: &str) -> Result<PathBuf> {
    let archive_path = metadata_root.join(format!("fastlane-{}.zip", app_id));
    if archive_path.exists() {
        fs::remove_file(&archive_path)?;
    }

    let mut zip = ZipWriter::new(File::create(&archive_path)?);
    let options = entry_options();

    let summary_name = format!("{}.yml", app_id);
    zip.start_file(summary_name.as_str(), options)?;
    zip.write_all(&fs::read(metadata_root.join(&summary_name))?)?;

    let app_root = metadata_root.join(app_id);
    let mut entries = 1usize;
    if app_root.is_dir() {
        for entry in WalkDir::new(&app_root).sort_by_file_name() {
            let entry = entry?;
            let name = entry_name(metadata_root, entry.path())?;

            if entry.file_type().is_dir() {
                zip.add_directory(name.as_str(), options)?;
            } else {
                zip.start_file(name.as_str(), options)?;
                zip.write_all(&fs::read(entry.path())?)?;
            }
            entries += 1;
        }
    }

    zip.finish()?;
    debug!(entries, archive = %archive_path.display(), "wrote metadata archive");
    Ok(archive_path)
}
