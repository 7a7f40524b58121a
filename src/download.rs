//! Comic image fetching.

use crate::error::FetchError;
use crate::metadata::fetch_metadata;
use crate::types::{DownloadConfig, ImagePayload};
use futures_util::StreamExt;
use tracing::info;

/// Extracts the media subtype from a `Content-Type` header value, if the
/// declared category is `image`.
///
/// Parameters after `;` are ignored, so `image/png; charset=binary` yields
/// `"png"`. Anything outside the image category returns `None`.
pub(crate) fn image_subtype(content_type: &str) -> Option<String> {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    let (category, subtype) = essence.split_once('/')?;
    if category.eq_ignore_ascii_case("image") && !subtype.is_empty() {
        Some(subtype.to_ascii_lowercase())
    } else {
        None
    }
}

/// Fetches the image for one comic id.
///
/// Two sequential round trips: the metadata document for `id`, then the image
/// it points at. Each step classifies its own failure; any failure aborts
/// only this comic's workflow.
pub(crate) async fn fetch_comic(
    client: &reqwest::Client,
    config: &DownloadConfig,
    id: u32,
) -> Result<ImagePayload, FetchError> {
    let metadata = fetch_metadata(client, config, id).await?;
    info!("Comic id: {} is \"{}\"", id, metadata.title);

    let response = client.get(&metadata.img).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    let subtype = match image_subtype(&content_type) {
        Some(subtype) => subtype,
        None => return Err(FetchError::NotAnImage(content_type)),
    };

    // Stream the body into memory; comic images are small (tens of KB)
    let mut content = Vec::with_capacity(response.content_length().unwrap_or(0) as usize);
    let mut byte_stream = response.bytes_stream();
    while let Some(piece) = byte_stream.next().await {
        content.extend_from_slice(&piece?);
    }

    Ok(ImagePayload { content, subtype })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base: &str) -> DownloadConfig {
        DownloadConfig {
            api_base_url: base.to_string(),
            ..DownloadConfig::default()
        }
    }

    async fn mount_metadata(server: &MockServer, id: u32, img_path: &str, title: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/{}/info.0.json", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "num": id,
                "img": format!("{}{}", server.uri(), img_path),
                "title": title
            })))
            .mount(server)
            .await;
    }

    #[test]
    fn test_image_subtype() {
        assert_eq!(image_subtype("image/png"), Some("png".to_string()));
        assert_eq!(image_subtype("image/svg+xml"), Some("svg+xml".to_string()));
        assert_eq!(
            image_subtype("image/jpeg; charset=binary"),
            Some("jpeg".to_string())
        );
        assert_eq!(image_subtype("IMAGE/PNG"), Some("png".to_string()));
        assert_eq!(image_subtype("text/html"), None);
        assert_eq!(image_subtype("image/"), None);
        assert_eq!(image_subtype(""), None);
    }

    #[tokio::test]
    async fn test_fetch_comic_returns_bytes_and_subtype() {
        let server = MockServer::start().await;
        mount_metadata(&server, 1, "/comics/barrel.png", "Barrel - Part 1").await;
        Mock::given(method("GET"))
            .and(path("/comics/barrel.png"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(b"fake png bytes".to_vec(), "image/png"),
            )
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let payload = fetch_comic(&client, &test_config(&server.uri()), 1)
            .await
            .unwrap();
        assert_eq!(payload.content, b"fake png bytes");
        assert_eq!(payload.subtype, "png");
    }

    #[tokio::test]
    async fn test_fetch_comic_rejects_non_image_content_type() {
        let server = MockServer::start().await;
        mount_metadata(&server, 2, "/comics/petit_trees.png", "Petit Trees").await;
        Mock::given(method("GET"))
            .and(path("/comics/petit_trees.png"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(b"<html></html>".to_vec(), "text/html"),
            )
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let err = fetch_comic(&client, &test_config(&server.uri()), 2)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::NotAnImage(ct) if ct == "text/html"));
    }

    #[tokio::test]
    async fn test_fetch_comic_image_endpoint_error_status() {
        let server = MockServer::start().await;
        mount_metadata(&server, 3, "/comics/island.png", "Island (sketch)").await;
        Mock::given(method("GET"))
            .and(path("/comics/island.png"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let err = fetch_comic(&client, &test_config(&server.uri()), 3)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status(s) if s.as_u16() == 500));
    }

    #[tokio::test]
    async fn test_fetch_comic_metadata_failure_skips_image_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/4/info.0.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let err = fetch_comic(&client, &test_config(&server.uri()), 4)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status(s) if s.as_u16() == 404));
    }
}
