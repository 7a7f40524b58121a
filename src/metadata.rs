//! Comic metadata fetching and index resolution.

use crate::error::FetchError;
use crate::types::{ComicMetadata, DownloadConfig};
use tracing::info;

/// Constructs the metadata URL for a given comic id.
pub(crate) fn comic_info_url(base: &str, id: u32) -> String {
    format!("{}/{}/info.0.json", base.trim_end_matches('/'), id)
}

/// Constructs the metadata URL of the most recent comic (id omitted).
pub(crate) fn latest_info_url(base: &str) -> String {
    format!("{}/info.0.json", base.trim_end_matches('/'))
}

/// Fetches and parses the metadata document at `url`.
///
/// The body is read fully and decoded with `serde_json` so that a transport
/// failure, a bad status, and an undecodable payload each map to their own
/// [`FetchError`] variant.
async fn fetch_info(client: &reqwest::Client, url: &str) -> Result<ComicMetadata, FetchError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let body = response.bytes().await?;
    let metadata = serde_json::from_slice::<ComicMetadata>(&body)?;
    Ok(metadata)
}

/// Fetches the metadata for one comic id.
pub(crate) async fn fetch_metadata(
    client: &reqwest::Client,
    config: &DownloadConfig,
    id: u32,
) -> Result<ComicMetadata, FetchError> {
    fetch_info(client, &comic_info_url(&config.api_base_url, id)).await
}

/// Resolves the highest valid comic id from the latest-comic endpoint.
///
/// This is the one network call whose failure is fatal for the run: without
/// an upper bound there is nothing to fan out over.
pub(crate) async fn resolve_last_index(
    client: &reqwest::Client,
    config: &DownloadConfig,
) -> Result<u32, FetchError> {
    let url = latest_info_url(&config.api_base_url);
    info!("Resolving latest comic index from {}", url);

    let metadata = fetch_info(client, &url).await?;
    Ok(metadata.num)
}
