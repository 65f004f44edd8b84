//! Error types for ROI processing and export.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by roiflex operations.
///
/// All errors are raised at the call that violates a precondition; no
/// operation returns partial results.
#[derive(Debug, Error)]
pub enum Error {
    /// A draw or slice step was invoked before any geometry was available.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The correlator was invoked without polygons.
    #[error("Invalid state: {0}")]
    State(String),

    /// Invalid partition count, mixed ROI variants or other bad parameters.
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Index value {grid_value} is missing from the key table")]
    KeyMiss { grid_value: u32 },

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error(transparent)]
    Settings(#[from] common::SerdeFormatError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
