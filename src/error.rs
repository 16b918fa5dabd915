//! Error types for junit-journal

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for junit-journal operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for junit-journal
#[derive(Error, Debug)]
pub enum Error {
    /// An external report could not be read, or has no usable root.
    #[error("Unable to read report {path}: {reason}")]
    MergeRead { path: PathBuf, reason: String },

    /// The final report could not be written.
    #[error("Unable to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration file error or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The XML input is not well formed.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Other error with custom message.
    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}
