//! Helpers shared by the command handlers.

use std::str::FromStr;

use crate::domain::account::{asset_public_id, DEFAULT_AVATAR_URL};
use crate::domain::foundation::DomainError;
use crate::ports::{BlobStorage, BlobUpload, StorageError, StoredBlob};

/// Raw image bytes received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }
}

/// Parses a principal id or path segment into a typed id.
pub(crate) fn parse_id<T: FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

pub(crate) async fn store_image(
    storage: &dyn BlobStorage,
    folder: &str,
    image: ImageUpload,
) -> Result<StoredBlob, DomainError> {
    let stored = storage
        .upload(BlobUpload::new(folder, image.bytes, image.content_type))
        .await?;
    Ok(stored)
}

/// Deletes the blob behind `url`.
///
/// The default avatar and URLs without a recognizable public id are skipped.
/// A blob that is already gone is not an error.
pub(crate) async fn discard_image(
    storage: &dyn BlobStorage,
    folder: &str,
    url: &str,
) -> Result<(), DomainError> {
    if url == DEFAULT_AVATAR_URL {
        return Ok(());
    }
    let Some(public_id) = asset_public_id(url) else {
        tracing::warn!(%url, "Cannot derive public id from image URL");
        return Ok(());
    };
    match storage.delete(folder, &public_id).await {
        Ok(()) => Ok(()),
        Err(StorageError::NotFound { .. }) => {
            tracing::warn!(%folder, %public_id, "Image already removed from storage");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
