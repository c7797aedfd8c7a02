//! In-memory blob storage for tests and local runs without a media directory.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::ports::{image_extension, BlobStorage, BlobUpload, StorageError, StoredBlob};

#[derive(Debug, Clone)]
pub struct InMemoryBlobStorage {
    blobs: Arc<RwLock<HashMap<(String, String), Vec<u8>>>>,
    base_url: String,
}

impl InMemoryBlobStorage {
    pub fn new() -> Self {
        Self {
            blobs: Arc::default(),
            base_url: "memory://blobs".to_string(),
        }
    }

    pub async fn contains(&self, folder: &str, public_id: &str) -> bool {
        self.blobs
            .read()
            .await
            .contains_key(&(folder.to_string(), public_id.to_string()))
    }

    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryBlobStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStorage for InMemoryBlobStorage {
    async fn upload(&self, upload: BlobUpload) -> Result<StoredBlob, StorageError> {
        let extension = image_extension(&upload.content_type).ok_or_else(|| {
            StorageError::UnsupportedContentType {
                content_type: upload.content_type.clone(),
            }
        })?;
        if upload.bytes.is_empty() {
            return Err(StorageError::Empty);
        }

        let public_id = Uuid::new_v4().simple().to_string();
        let url = format!("{}/{}/{}.{}", self.base_url, upload.folder, public_id, extension);
        self.blobs
            .write()
            .await
            .insert((upload.folder, public_id.clone()), upload.bytes);
        Ok(StoredBlob { public_id, url })
    }

    async fn delete(&self, folder: &str, public_id: &str) -> Result<(), StorageError> {
        match self
            .blobs
            .write()
            .await
            .remove(&(folder.to_string(), public_id.to_string()))
        {
            Some(_) => Ok(()),
            None => Err(StorageError::not_found(public_id)),
        }
    }
}
