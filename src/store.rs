//! Content-addressed local storage for comic images.

use crate::error::StoreError;
use md5::{Digest, Md5};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Outcome of a [`save`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new file was written at the given path.
    Written(PathBuf),
    /// A file with the same content-derived name already exists; nothing
    /// was written.
    AlreadyExists(PathBuf),
}

/// Derives the file name for an image: lowercase hex MD5 of the content
/// plus the media subtype as extension.
///
/// Deterministic by construction, so byte-identical images from different
/// comic ids collapse onto the same name.
pub(crate) fn content_name(content: &[u8], subtype: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(content);
    format!("{:x}.{}", hasher.finalize(), subtype)
}

/// Saves an image under its content-derived name, writing at most once.
///
/// The existence probe and the write are not atomic across concurrent
/// workflows; two workflows carrying byte-identical content may both write.
/// The bytes are identical either way, so the race is harmless.
pub(crate) async fn save(
    dir: &Path,
    id: u32,
    content: &[u8],
    subtype: &str,
) -> Result<SaveOutcome, StoreError> {
    let name = content_name(content, subtype);
    let path = dir.join(&name);

    match tokio::fs::metadata(&path).await {
        Ok(_) => {
            info!("File {} already exists (comic id: {})", name, id);
            return Ok(SaveOutcome::AlreadyExists(path));
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(StoreError::new(e, path)),
    }

    let mut file = tokio::fs::File::create(&path)
        .await
        .map_err(|e| StoreError::new(e, path.clone()))?;
    file.write_all(content)
        .await
        .map_err(|e| StoreError::new(e, path.clone()))?;
    file.flush()
        .await
        .map_err(|e| StoreError::new(e, path.clone()))?;

    info!("Comic id: {} has been saved with name: {}", id, name);
    Ok(SaveOutcome::Written(path))
}
