//! XkcdSync - Concurrent xkcd comic downloader with content-addressed storage
//!
//! This library downloads the complete numbered xkcd collection through its
//! JSON metadata API and saves each comic image exactly once, named by the
//! MD5 of its bytes.
//!
//! # Features
//!
//! - **Concurrent Fan-Out**: One workflow per comic, bounded by a semaphore
//! - **Content-Addressed Storage**: Identical images are stored only once
//! - **Partial-Failure Isolation**: One failed comic never aborts the run
//! - **Explicit Failure Taxonomy**: Transport, status, content-type and
//!   storage failures are distinct, logged values
//!
//! # Example
//!
//! ```no_run
//! use xkcdsync::{download_comics, DownloadConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let summary = download_comics(&DownloadConfig::default()).await?;
//! println!("{} new comic images", summary.files_written);
//! # Ok(())
//! # }
//! ```

mod download;
mod error;
mod metadata;
mod orchestrator;
mod store;
mod types;

pub use error::{FetchError, RunError, StoreError};
pub use orchestrator::download_comics;
pub use store::SaveOutcome;
pub use types::{DownloadConfig, RunSummary};
