//! Product image upload and removal.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::application::handlers::support::{discard_image, store_image, ImageUpload};
use crate::application::operations::{DELETE_PRODUCT_IMAGE, UPLOAD_PRODUCT_IMAGE};
use crate::domain::authorization::{SubjectRef, SubjectType};
use crate::domain::catalog::{Product, ProductError};
use crate::domain::foundation::{Principal, ProductId};
use crate::ports::{BlobStorage, ProductRepository, PRODUCT_IMAGE_FOLDER};

#[derive(Debug, Clone)]
pub struct UploadProductImageCommand {
    pub product_id: ProductId,
    pub image: ImageUpload,
}

#[derive(Debug, Clone)]
pub struct DeleteProductImageCommand {
    pub product_id: ProductId,
    pub image_url: String,
}

pub struct ProductImageHandler {
    products: Arc<dyn ProductRepository>,
    storage: Arc<dyn BlobStorage>,
    gate: AuthorizationGate,
}

impl ProductImageHandler {
    pub fn new(products: Arc<dyn ProductRepository>, storage: Arc<dyn BlobStorage>) -> Self {
        Self {
            products,
            storage,
            gate: AuthorizationGate::new(),
        }
    }

    /// Appends the uploaded image to the product's gallery.
    pub async fn upload(
        &self,
        cmd: UploadProductImageCommand,
        principal: Option<&Principal>,
    ) -> Result<Product, ProductError> {
        let target = SubjectRef::instance(SubjectType::Product, cmd.product_id);
        self.gate
            .authorize(principal, &UPLOAD_PRODUCT_IMAGE, Some(&target))?;

        let mut product = self.load(cmd.product_id).await?;
        let stored = store_image(self.storage.as_ref(), PRODUCT_IMAGE_FOLDER, cmd.image).await?;
        product.add_image(stored.url);
        self.products.update(&product).await?;
        Ok(product)
    }

    /// Detaches `image_url` and deletes its blob.
    pub async fn delete(
        &self,
        cmd: DeleteProductImageCommand,
        principal: Option<&Principal>,
    ) -> Result<Product, ProductError> {
        let target = SubjectRef::instance(SubjectType::Product, cmd.product_id);
        self.gate
            .authorize(principal, &DELETE_PRODUCT_IMAGE, Some(&target))?;

        let mut product = self.load(cmd.product_id).await?;
        if !product.remove_image(&cmd.image_url) {
            return Err(ProductError::ImageNotFound(cmd.image_url));
        }
        discard_image(self.storage.as_ref(), PRODUCT_IMAGE_FOLDER, &cmd.image_url).await?;
        self.products.update(&product).await?;
        Ok(product)
    }

    async fn load(&self, id: ProductId) -> Result<Product, ProductError> {
        self.products
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ProductError::not_found(id))
    }
}
