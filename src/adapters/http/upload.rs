//! Multipart image uploads.

use axum::extract::Multipart;

use crate::application::ImageUpload;

use super::error::ApiError;

/// Form field carrying the image.
pub const IMAGE_FIELD: &str = "image";

/// Reads the `image` field of a multipart form.
pub async fn read_image(mut multipart: Multipart) -> Result<ImageUpload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(IMAGE_FIELD, e.body_text()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(IMAGE_FIELD, e.body_text()))?;
        return Ok(ImageUpload::new(bytes.to_vec(), content_type));
    }
    Err(ApiError::bad_request(IMAGE_FIELD, "no image field in form"))
}
