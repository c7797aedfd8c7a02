//! Blob storage port for avatars and product images.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Folder for admin avatars.
pub const ADMIN_AVATAR_FOLDER: &str = "dynasty/admin/avatar";
/// Folder for customer avatars.
pub const CUSTOMER_AVATAR_FOLDER: &str = "dynasty/customer/avatar";
/// Folder for employee avatars.
pub const EMPLOYEE_AVATAR_FOLDER: &str = "dynasty/employee/avatar";
/// Folder for product images.
pub const PRODUCT_IMAGE_FOLDER: &str = "dynasty/product";

/// An upload request.
#[derive(Debug, Clone)]
pub struct BlobUpload {
    pub folder: String,
    pub bytes: Vec<u8>,
    /// MIME type, e.g. `image/png`.
    pub content_type: String,
}

impl BlobUpload {
    pub fn new(folder: impl Into<String>, bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            bytes,
            content_type: content_type.into(),
        }
    }
}

/// Where an uploaded blob ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// Identifier unique within the folder; the last URL segment without extension.
    pub public_id: String,
    pub url: String,
}

#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Stores the bytes under a freshly generated public id.
    ///
    /// # Errors
    ///
    /// - `UnsupportedContentType` for anything but images
    /// - `TooLarge` past the adapter's size limit
    async fn upload(&self, upload: BlobUpload) -> Result<StoredBlob, StorageError>;

    /// # Errors
    ///
    /// - `NotFound` if nothing is stored under that id
    async fn delete(&self, folder: &str, public_id: &str) -> Result<(), StorageError>;
}

/// Errors that can occur during blob storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Blob not found: {public_id}")]
    NotFound { public_id: String },

    #[error("Unsupported content type: {content_type}")]
    UnsupportedContentType { content_type: String },

    #[error("Blob too large: {size_bytes} bytes (max: {max_bytes})")]
    TooLarge { size_bytes: u64, max_bytes: u64 },

    #[error("Empty upload")]
    Empty,

    #[error("IO error: {message}")]
    Io { message: String },
}

impl StorageError {
    pub fn not_found(public_id: impl Into<String>) -> Self {
        Self::NotFound {
            public_id: public_id.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// True when the caller sent something the storage refuses.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StorageError::UnsupportedContentType { .. }
                | StorageError::TooLarge { .. }
                | StorageError::Empty
        )
    }
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        match &err {
            StorageError::NotFound { .. } => DomainError::new(ErrorCode::BlobNotFound, err.to_string()),
            e if e.is_client_error() => DomainError::validation("file", err.to_string()),
            _ => DomainError::new(ErrorCode::StorageError, err.to_string()),
        }
    }
}

/// File extension for an image MIME type, `None` if not an accepted image.
pub fn image_extension(content_type: &str) -> Option<&'static str> {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    match essence.to_ascii_lowercase().as_str() {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}
