//! Error types for metadata operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during metadata conversion.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML document could not be parsed.
    #[error("XML error in {path}: {message}")]
    Xml { path: PathBuf, message: String },

    /// Desktop entry could not be parsed.
    #[error("Desktop entry error in {path}: {message}")]
    Desktop { path: PathBuf, message: String },

    /// A required AppStream element is missing.
    #[error("Missing required element <{0}>")]
    MissingField(&'static str),

    /// Invalid format encountered.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Archive could not be written.
    #[error("Archive error: {0}")]
    Archive(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl MetadataError {
    /// Attach a path to an XML parse failure.
    pub(crate) fn xml(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        MetadataError::Xml {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for MetadataError {
    fn from(err: serde_yaml::Error) -> Self {
        MetadataError::SerializationError(err.to_string())
    }
}

impl From<zip::result::ZipError> for MetadataError {
    fn from(err: zip::result::ZipError) -> Self {
        MetadataError::Archive(err.to_string())
    }
}

impl From<glob::PatternError> for MetadataError {
    fn from(err: glob::PatternError) -> Self {
        MetadataError::InvalidFormat(format!("invalid search pattern: {}", err))
    }
}

impl From<walkdir::Error> for MetadataError {
    fn from(err: walkdir::Error) -> Self {
        MetadataError::Io(err.into())
    }
}
