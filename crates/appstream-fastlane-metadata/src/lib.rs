//! AppStream to fastlane metadata conversion.
//!
//! This crate reads AppStream documents and desktop entries and writes the
//! fastlane directory layout consumed by F-Droid: per-locale text files, a
//! store summary, image assets and a transfer archive.

pub mod appstream;
pub mod assets;
pub mod desktop;
pub mod error;
pub mod locator;
pub mod pipeline;
mod search;
pub mod storage;
pub mod types;
pub mod xml;

#[cfg(feature = "http")]
pub use assets::HttpFetcher;
pub use assets::{FetchError, ScreenshotFetcher};
pub use error::MetadataError;
pub use locator::locate_applications;
pub use pipeline::{ConversionReport, Converter};
pub use storage::{FastlaneLayout, StoreSummary};
pub use types::bundle::{ApplicationSource, TranslationBundle};
pub use types::language::{Language, LanguageSet, LanguageTable};
pub use types::translations::Translations;

/// Result type alias for metadata operations.
pub type Result<T> = std::result::Result<T, MetadataError>;
