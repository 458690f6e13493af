//! Recursive file search below a base directory.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::debug;

use crate::Result;

/// Paths below `base` matching `pattern` (`/`-separated, `**` allowed),
/// in sorted order. Hidden directories such as `.git` are not entered.
pub(crate) fn find_files(base: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full = format!("{}/{}", Pattern::escape(&base.to_string_lossy()), pattern);
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    let mut paths: Vec<PathBuf> = glob::glob_with(&full, options)?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                debug!(error = %e, "skipping unreadable path");
                None
            }
        })
        .filter(|path| path.is_file() && !is_hidden(base, path))
        .collect();
    paths.sort();
    Ok(paths)
}

fn is_hidden(base: &Path, path: &Path) -> bool {
    path.strip_prefix(base)
        .map(|relative| {
            relative
                .components()
                .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
        })
        .unwrap_or(false)
}

/// First match of [`find_files`].
pub(crate) fn find_first(base: &Path, pattern: &str) -> Result<Option<PathBuf>> {
    Ok(find_files(base, pattern)?.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_recursive_sorted() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("b/icon.png"));
        touch(&temp.path().join("a/deep/icon.png"));
        touch(&temp.path().join("icon.png"));
        touch(&temp.path().join("c/icon.jpg"));

        let found = find_files(temp.path(), "**/icon.png").unwrap();
        let relative: Vec<_> = found
            .iter()
            .map(|p| p.strip_prefix(temp.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            relative,
            vec![
                PathBuf::from("a/deep/icon.png"),
                PathBuf::from("b/icon.png"),
                PathBuf::from("icon.png"),
            ]
        );
    }

    #[test]
    fn test_hidden_directories_skipped() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join(".git/icon.png"));

        assert_eq!(find_first(temp.path(), "**/icon.png").unwrap(), None);
    }

    #[test]
    fn test_base_with_glob_characters() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("src [copy]");
        touch(&base.join("x/icon.png"));

        assert_eq!(find_files(&base, "**/icon.png").unwrap().len(), 1);
    }
}
