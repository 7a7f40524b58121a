//! Main orchestration logic for downloading comics.

use crate::download::fetch_comic;
use crate::error::RunError;
use crate::metadata::resolve_last_index;
use crate::store::{save, SaveOutcome};
use crate::types::{DownloadConfig, ItemOutcome, RunSummary};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// Downloads every comic in the collection into the output directory.
///
/// This is the main entry point. It performs the following steps:
///
/// 1. Ensures the output directory exists (an existing directory is fine)
/// 2. Resolves the highest comic id from the latest-comic endpoint
/// 3. Fans out one workflow per id, bounded by a semaphore
/// 4. Waits for every workflow and folds their outcomes into a summary
///
/// Directory or index failure aborts the run before any comic is attempted.
/// Per-comic failures are logged and counted but never abort the run.
///
/// # Example
///
/// ```no_run
/// use xkcdsync::{download_comics, DownloadConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = download_comics(&DownloadConfig::default()).await?;
/// println!("{} new files", summary.files_written);
/// # Ok(())
/// # }
/// ```
pub async fn download_comics(config: &DownloadConfig) -> Result<RunSummary, RunError> {
    let started = Instant::now();

    ensure_output_dir(&config.output_dir)?;

    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .map_err(RunError::Client)?;

    let last_index = resolve_last_index(&client, config)
        .await
        .map_err(RunError::Index)?;
    info!("Latest comic index: {}", last_index);

    let pb = progress_bar(last_index as u64);
    pb.set_message(format!("📦 Downloading {} comics", last_index));

    // Create semaphore to limit concurrent downloads
    let semaphore = Arc::new(Semaphore::new(config.max_concurrent_downloads));

    let mut tasks = Vec::with_capacity(last_index as usize);
    for id in 1..=last_index {
        let semaphore = Arc::clone(&semaphore);
        let client = client.clone();
        let config = config.clone();
        let pb_clone = pb.clone();

        tasks.push(tokio::spawn(async move {
            // Acquire semaphore permit
            let _permit = semaphore.acquire().await.unwrap();
            let outcome = run_item(&client, &config, id).await;
            pb_clone.inc(1);
            outcome
        }));
    }

    // Wait for all workflows to settle; individual failures are folded,
    // never propagated
    let mut summary = RunSummary {
        files_written: 0,
        duplicates: 0,
        failures: 0,
        total_items: last_index as usize,
        elapsed: Default::default(),
    };
    for task in tasks {
        match task.await {
            Ok(ItemOutcome::Written) => summary.files_written += 1,
            Ok(ItemOutcome::Duplicate) => summary.duplicates += 1,
            Ok(ItemOutcome::Failed) => summary.failures += 1,
            Err(e) => {
                error!("Task join error: {}", e);
                summary.failures += 1;
            }
        }
    }
    summary.elapsed = started.elapsed();

    pb.finish_with_message(format!(
        "✅ {} new, {} duplicate, {} failed of {} comics",
        summary.files_written, summary.duplicates, summary.failures, summary.total_items
    ));

    Ok(summary)
}

/// Runs the fetch-then-save workflow for a single comic id.
///
/// Every failure path is logged here with the id and stage so the run-level
/// fold only has to count outcomes.
async fn run_item(client: &reqwest::Client, config: &DownloadConfig, id: u32) -> ItemOutcome {
    let payload = match fetch_comic(client, config, id).await {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Failed to fetch comic id {}: {}", id, e);
            return ItemOutcome::Failed;
        }
    };

    match save(&config.output_dir, id, &payload.content, &payload.subtype).await {
        Ok(SaveOutcome::Written(_)) => ItemOutcome::Written,
        Ok(SaveOutcome::AlreadyExists(_)) => ItemOutcome::Duplicate,
        Err(e) => {
            warn!("Failed to save image for comic id {}: {}", id, e);
            ItemOutcome::Failed
        }
    }
}

/// Creates the output directory if it does not exist yet.
///
/// An already-existing directory is success; any other OS error aborts the
/// run before a single network call is made.
fn ensure_output_dir(dir: &Path) -> Result<(), RunError> {
    match std::fs::create_dir(dir) {
        Ok(()) => {
            info!("The directory {:?} has been created", dir);
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            info!("The directory {:?} already exists", dir);
            Ok(())
        }
        Err(e) => Err(RunError::Directory {
            path: dir.to_path_buf(),
            source: e,
        }),
    }
}

/// Builds the run progress bar, hidden when stderr is not a terminal.
fn progress_bar(len: u64) -> indicatif::ProgressBar {
    if !atty::is(atty::Stream::Stderr) {
        return indicatif::ProgressBar::hidden();
    }
    let pb = indicatif::ProgressBar::new(len);
    pb.set_style(
        indicatif::ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg} | {elapsed_precise} elapsed, ETA {eta_precise}")
            .unwrap()
            .progress_chars("█▓▒░ "),
    );
    pb
}
