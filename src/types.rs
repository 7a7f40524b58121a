//! Data structures for comic download operations.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Metadata for a single comic, parsed from the xkcd JSON API.
///
/// The API returns more fields (alt text, transcript, publication date);
/// only the ones the pipeline consumes are deserialized.
#[derive(Deserialize, Debug, Clone)]
pub(crate) struct ComicMetadata {
    /// The comic number. Only meaningful on the latest-comic endpoint,
    /// where it doubles as the upper bound of valid ids.
    pub num: u32,
    /// URL of the comic image.
    pub img: String,
    /// Comic title, logged for observability.
    pub title: String,
}

/// An image retrieved from the comic's asset URL, ready to be stored.
#[derive(Debug, Clone)]
pub(crate) struct ImagePayload {
    /// Raw image bytes.
    pub content: Vec<u8>,
    /// Media subtype from the `Content-Type` header (e.g. `"png"`),
    /// used as the file extension.
    pub subtype: String,
}

/// Configuration for downloading comics.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use xkcdsync::DownloadConfig;
///
/// let config = DownloadConfig {
///     api_base_url: "https://xkcd.com".to_string(),
///     output_dir: "comics-xkcd".into(),
///     max_concurrent_downloads: 16,
///     request_timeout: Duration::from_secs(10),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// Base URL of the xkcd API (e.g. `<https://xkcd.com>`).
    pub api_base_url: String,
    /// Directory the image files are written to (e.g. `"comics-xkcd"`).
    pub output_dir: PathBuf,
    /// Maximum number of comics fetched concurrently (default: 16).
    ///
    /// Note: This is not limited by CPU cores. Since downloads are I/O-bound,
    /// even low-core CPUs can handle 16+ concurrent downloads efficiently.
    /// The limiting factor is network bandwidth, not CPU.
    pub max_concurrent_downloads: usize,
    /// Per-request timeout applied to the shared HTTP client (default: 10s).
    pub request_timeout: Duration,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://xkcd.com".to_string(),
            output_dir: PathBuf::from("comics-xkcd"),
            max_concurrent_downloads: 16,
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Outcome of one comic workflow, folded into the [`RunSummary`] after the
/// join barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ItemOutcome {
    /// A new image file was written.
    Written,
    /// The image was byte-identical to one already on disk.
    Duplicate,
    /// The workflow failed at some stage; details went to the log.
    Failed,
}

/// Aggregate result of a completed run.
///
/// Individual comic failures never fail the run; they are only visible here
/// as counts and in the log.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of new image files written.
    pub files_written: usize,
    /// Number of comics whose image already existed on disk.
    pub duplicates: usize,
    /// Number of workflows that failed at any stage.
    pub failures: usize,
    /// Total number of comic ids attempted (the resolved index bound).
    pub total_items: usize,
    /// Wall-clock time for the whole run.
    pub elapsed: Duration,
}
