//! Error types for comic download operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching a single comic.
///
/// These are per-item failures: they terminate the workflow for one comic id
/// and are logged, but never abort the run. The one exception is index
/// resolution, where the orchestrator promotes a `FetchError` to
/// [`RunError::Index`] because no fan-out is possible without an upper bound.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network-level failure (DNS, timeout, connection reset).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success HTTP status.
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    /// The metadata body was not the expected JSON shape.
    #[error("invalid metadata payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// The asset endpoint declared a non-image content type.
    #[error("expected an image content type, got {0:?}")]
    NotAnImage(String),
}

/// Filesystem failure while probing for or writing a comic image file.
///
/// Carries the path so the log line identifies which file was affected.
#[derive(Error, Debug)]
#[error("storage error ({kind:?}) at {path:?}")]
pub struct StoreError {
    /// The I/O error category (permission denied, not a directory, ...).
    pub kind: io::ErrorKind,
    /// The target file path.
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl StoreError {
    pub(crate) fn new(source: io::Error, path: PathBuf) -> Self {
        Self {
            kind: source.kind(),
            path,
            source,
        }
    }
}

/// Fatal errors that abort the run before any comic workflow is spawned.
#[derive(Error, Debug)]
pub enum RunError {
    /// The output directory could not be created.
    #[error("failed to create output directory {path:?}")]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The latest-comic index could not be resolved.
    #[error("failed to resolve the latest comic index")]
    Index(#[source] FetchError),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
}
