//! Local filesystem blob storage.
//!
//! Writes uploads beneath a base directory and serves them from a public
//! base URL (typically a static file route or CDN in front of the same
//! directory).
//!
//! # Layout
//!
//! ```text
//! {base_path}/
//! └── dynasty/
//!     ├── admin/avatar/{public_id}.png
//!     └── product/{public_id}.jpg
//! ```
//!
//! Writes go to `{public_id}.{ext}.tmp`, are synced, then renamed into place
//! so a crash never leaves a truncated image behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::ports::{image_extension, BlobStorage, BlobUpload, StorageError, StoredBlob};

/// Maximum accepted upload (5 MB).
pub const MAX_BLOB_BYTES: u64 = 5 * 1024 * 1024;

const KNOWN_EXTENSIONS: [&str; 4] = ["png", "jpg", "webp", "gif"];

#[derive(Debug, Clone)]
pub struct LocalBlobStorage {
    base_path: PathBuf,
    public_base_url: String,
}

impl LocalBlobStorage {
    pub fn new(base_path: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn folder_dir(&self, folder: &str) -> Result<PathBuf, StorageError> {
        if !is_safe_folder(folder) {
            return Err(StorageError::io(format!("Invalid folder: {}", folder)));
        }
        Ok(self.base_path.join(folder))
    }

    /// Content-derived id with a random suffix so identical files uploaded
    /// twice do not share a blob.
    fn public_id_for(bytes: &[u8]) -> String {
        let digest = Sha256::digest(bytes);
        let checksum = format!("{:x}", digest);
        let suffix = Uuid::new_v4().simple().to_string();
        format!("{}{}", &checksum[..16], &suffix[..8])
    }

    fn url_for(&self, folder: &str, file_name: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, folder, file_name)
    }
}

#[async_trait]
impl BlobStorage for LocalBlobStorage {
    async fn upload(&self, upload: BlobUpload) -> Result<StoredBlob, StorageError> {
        let extension = image_extension(&upload.content_type).ok_or_else(|| {
            StorageError::UnsupportedContentType {
                content_type: upload.content_type.clone(),
            }
        })?;
        let size = upload.bytes.len() as u64;
        if size == 0 {
            return Err(StorageError::Empty);
        }
        if size > MAX_BLOB_BYTES {
            return Err(StorageError::TooLarge {
                size_bytes: size,
                max_bytes: MAX_BLOB_BYTES,
            });
        }

        let dir = self.folder_dir(&upload.folder)?;
        fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::io(format!("Failed to create directory {}: {}", dir.display(), e))
        })?;

        let public_id = Self::public_id_for(&upload.bytes);
        let file_name = format!("{}.{}", public_id, extension);
        let final_path = dir.join(&file_name);
        let temp_path = dir.join(format!("{}.tmp", file_name));

        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            StorageError::io(format!("Failed to create {}: {}", temp_path.display(), e))
        })?;
        file.write_all(&upload.bytes).await.map_err(|e| {
            StorageError::io(format!("Failed to write {}: {}", temp_path.display(), e))
        })?;
        file.sync_all().await.map_err(|e| {
            StorageError::io(format!("Failed to sync {}: {}", temp_path.display(), e))
        })?;
        fs::rename(&temp_path, &final_path).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })?;

        tracing::debug!(folder = %upload.folder, %public_id, size, "Stored blob");

        Ok(StoredBlob {
            url: self.url_for(&upload.folder, &file_name),
            public_id,
        })
    }

    async fn delete(&self, folder: &str, public_id: &str) -> Result<(), StorageError> {
        if !is_safe_segment(public_id) {
            return Err(StorageError::not_found(public_id));
        }
        let dir = self.folder_dir(folder)?;

        for extension in KNOWN_EXTENSIONS {
            let path = dir.join(format!("{}.{}", public_id, extension));
            match fs::remove_file(&path).await {
                Ok(()) => return Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(StorageError::io(format!(
                        "Failed to delete {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        }
        Err(StorageError::not_found(public_id))
    }
}

fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn is_safe_folder(folder: &str) -> bool {
    folder.split('/').all(is_safe_segment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PRODUCT_IMAGE_FOLDER;
    use tempfile::TempDir;

    fn create_storage() -> (LocalBlobStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalBlobStorage::new(temp_dir.path(), "http://localhost:8080/media/");
        (storage, temp_dir)
    }

    fn png(bytes: &[u8]) -> BlobUpload {
        BlobUpload::new(PRODUCT_IMAGE_FOLDER, bytes.to_vec(), "image/png")
    }

    #[tokio::test]
    async fn upload_writes_file_and_builds_url() {
        let (storage, temp) = create_storage();

        let stored = storage.upload(png(b"\x89PNG fake")).await.unwrap();

        let expected = temp
            .path()
            .join(PRODUCT_IMAGE_FOLDER)
            .join(format!("{}.png", stored.public_id));
        assert!(expected.exists());
        assert_eq!(
            stored.url,
            format!(
                "http://localhost:8080/media/{}/{}.png",
                PRODUCT_IMAGE_FOLDER, stored.public_id
            )
        );
    }

    #[tokio::test]
    async fn upload_leaves_no_temp_file() {
        let (storage, temp) = create_storage();
        storage.upload(png(b"data")).await.unwrap();

        let mut entries = fs::read_dir(temp.path().join(PRODUCT_IMAGE_FOLDER)).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            assert!(!entry.file_name().to_string_lossy().ends_with(".tmp"));
        }
    }

    #[tokio::test]
    async fn identical_uploads_get_distinct_ids() {
        let (storage, _temp) = create_storage();
        let a = storage.upload(png(b"same")).await.unwrap();
        let b = storage.upload(png(b"same")).await.unwrap();
        assert_ne!(a.public_id, b.public_id);
    }

    #[tokio::test]
    async fn rejects_non_images_and_empty_files() {
        let (storage, _temp) = create_storage();

        let pdf = BlobUpload::new(PRODUCT_IMAGE_FOLDER, b"%PDF".to_vec(), "application/pdf");
        assert!(matches!(
            storage.upload(pdf).await,
            Err(StorageError::UnsupportedContentType { .. })
        ));
        assert_eq!(storage.upload(png(b"")).await, Err(StorageError::Empty));
    }

    #[tokio::test]
    async fn rejects_oversized_upload() {
        let (storage, _temp) = create_storage();
        let big = vec![0u8; (MAX_BLOB_BYTES + 1) as usize];
        assert!(matches!(
            storage.upload(png(&big)).await,
            Err(StorageError::TooLarge { .. })
        ));
    }

    #[tokio::test]
    async fn delete_removes_blob_then_reports_not_found() {
        let (storage, temp) = create_storage();
        let stored = storage.upload(png(b"bytes")).await.unwrap();

        storage
            .delete(PRODUCT_IMAGE_FOLDER, &stored.public_id)
            .await
            .unwrap();
        assert!(!temp
            .path()
            .join(PRODUCT_IMAGE_FOLDER)
            .join(format!("{}.png", stored.public_id))
            .exists());

        let again = storage.delete(PRODUCT_IMAGE_FOLDER, &stored.public_id).await;
        assert!(matches!(again, Err(StorageError::NotFound { .. })));
    }

    #[tokio::test]
    async fn refuses_path_traversal() {
        let (storage, _temp) = create_storage();
        let upload = BlobUpload::new("../outside", b"x".to_vec(), "image/png");
        assert!(matches!(storage.upload(upload).await, Err(StorageError::Io { .. })));
        assert!(matches!(
            storage.delete(PRODUCT_IMAGE_FOLDER, "../../etc/passwd").await,
            Err(StorageError::NotFound { .. })
        ));
    }
}
