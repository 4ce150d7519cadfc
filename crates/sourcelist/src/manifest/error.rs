//! Error types for manifest generation

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Manifest error type
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Cannot open manifest '{}' for writing: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid pattern for {variable}: {source}")]
    Pattern {
        variable: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid rule {variable}: {reason}")]
    InvalidRule { variable: String, reason: String },

    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ManifestError>;
