//! Error types for the catalog crate.
//!
//! Only the store can fail: reading files and decoding the top level of a
//! JSON document. Malformed optional fields inside a record never surface
//! here, they degrade while decoding (see `parser`).

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing catalog files
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found or opened
    #[error("Failed to open file: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// I/O error occurred while reading or writing a file
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or has the wrong top-level shape
    #[error("Malformed JSON in {file}: {reason}")]
    MalformedJson { file: String, reason: String },

    /// A season key could not be parsed
    #[error("Invalid season key: {0}")]
    InvalidSeasonKey(String),

    /// A season name could not be parsed
    #[error("Unknown season: {0}")]
    UnknownSeason(String),

    /// Encoding a document for writing failed
    #[error("Failed to encode {file}: {reason}")]
    Encode { file: String, reason: String },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            CatalogError::FileNotFound { path }
        } else {
            CatalogError::Io { path, source }
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
