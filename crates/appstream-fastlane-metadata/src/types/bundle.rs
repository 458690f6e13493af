//! Metadata gathered for one application.

use std::path::PathBuf;

use serde::Serialize;

use super::language::LanguageSet;
use super::translations::Translations;

/// Everything extracted from one AppStream document.
///
/// Lives for one conversion and is discarded once written.
#[derive(Debug, Clone, Default)]
pub struct TranslationBundle {
    /// Every language found in the document.
    pub languages: LanguageSet,
    /// Application name (`<name>`).
    pub name: Translations,
    /// One-line summary (`<summary>`).
    pub summary: Translations,
    /// Long description (`<description>`), rich text.
    pub description: Option<Translations>,
    /// Categories declared by the document.
    pub categories: Option<Vec<String>>,
    /// Screenshot image URLs.
    pub screenshots: Vec<String>,
    /// `<url type="homepage">`.
    pub homepage: Option<String>,
    /// `<url type="bugtracker">`.
    pub bug_tracker: Option<String>,
    /// `<project_license>`.
    pub license: Option<String>,
    /// `<url type="donation">`.
    pub donation: Option<String>,
    /// Source repository fetch URL, inferred from version control.
    pub source_repo: Option<String>,
}

/// Input files of one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationSource {
    /// The AppStream document (`*.metainfo.xml` or `*.appdata.xml`).
    pub appstream: PathBuf,
    /// Companion desktop entry.
    pub desktop: Option<PathBuf>,
    /// Icon name taken from the Android manifest (e.g. `ic_launcher`).
    pub icon_base_name: Option<String>,
}

impl ApplicationSource {
    /// A document given directly on the command line.
    pub fn explicit(appstream: impl Into<PathBuf>, desktop: Option<PathBuf>) -> Self {
        Self {
            appstream: appstream.into(),
            desktop,
            icon_base_name: None,
        }
    }
}
