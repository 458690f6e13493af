//! Remote operations

use std::path::Path;

use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use appstream_fastlane_core::error::GitError;

impl GitRepo {
    /// Get list of remote names
    pub fn remotes(&self) -> Result<Vec<String>> {
        let remotes = self.repo.remotes()?;
        Ok(remotes
            .iter()
            .filter_map(|r| r.map(|s| s.to_string()))
            .collect())
    }

    /// Check if a remote exists
    pub fn has_remote(&self, name: &str) -> Result<bool> {
        Ok(self.remotes()?.contains(&name.to_string()))
    }

    /// Get the configured fetch URL for a remote
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(|s| s.to_string())),
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                Err(GitError::RemoteNotFound(name.to_string()))
            }
            Err(e) => Err(GitError::Git2(e)),
        }
    }
}

/// Fetch URL of `remote` for the repository rooted at `source`.
///
/// Only a repository whose `.git` lives directly in `source` is considered.
/// Every failure is logged and reported as `None`.
#[instrument(fields(source = %source.display()))]
pub fn source_fetch_url(source: &Path, remote: &str) -> Option<String> {
    if !source.join(".git").exists() {
        debug!("source is not a git checkout, omitting source repository");
        return None;
    }

    let repo = match GitRepo::open(source) {
        Ok(repo) => repo,
        Err(e) => {
            debug!(error = %e, "could not open repository");
            return None;
        }
    };

    match repo.remote_url(remote) {
        Ok(url) => {
            debug!(url = url.as_deref().unwrap_or(""), "resolved source repository");
            url
        }
        Err(e) => {
            debug!(error = %e, "could not resolve remote url");
            None
        }
    }
}
