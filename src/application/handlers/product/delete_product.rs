//! Product removal.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::application::handlers::support::discard_image;
use crate::application::operations::DELETE_PRODUCT;
use crate::domain::authorization::{SubjectRef, SubjectType};
use crate::domain::catalog::ProductError;
use crate::domain::foundation::{Principal, ProductId};
use crate::ports::{BlobStorage, ProductRepository, PRODUCT_IMAGE_FOLDER};

#[derive(Debug, Clone)]
pub struct DeleteProductCommand {
    pub product_id: ProductId,
}

pub struct DeleteProductHandler {
    products: Arc<dyn ProductRepository>,
    storage: Arc<dyn BlobStorage>,
    gate: AuthorizationGate,
}

impl DeleteProductHandler {
    pub fn new(products: Arc<dyn ProductRepository>, storage: Arc<dyn BlobStorage>) -> Self {
        Self {
            products,
            storage,
            gate: AuthorizationGate::new(),
        }
    }

    /// Deletes every image blob, then the product itself.
    pub async fn handle(
        &self,
        cmd: DeleteProductCommand,
        principal: Option<&Principal>,
    ) -> Result<(), ProductError> {
        let target = SubjectRef::instance(SubjectType::Product, cmd.product_id);
        self.gate.authorize(principal, &DELETE_PRODUCT, Some(&target))?;

        let product = self
            .products
            .find_by_id(&cmd.product_id)
            .await?
            .ok_or_else(|| ProductError::not_found(cmd.product_id))?;

        for url in product.images() {
            discard_image(self.storage.as_ref(), PRODUCT_IMAGE_FOLDER, url).await?;
        }
        self.products.delete(&product.id()).await?;

        tracing::info!(product_id = %product.id(), images = product.images().len(), "Product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProductRepository;
    use crate::adapters::storage::InMemoryBlobStorage;
    use crate::application::handlers::product::{ProductImageHandler, UploadProductImageCommand};
    use crate::application::handlers::test_support::{admin_principal, png, user_principal};
    use crate::domain::catalog::{sample_details, Product};
    use crate::domain::foundation::{CustomerId, ErrorCode};

    #[tokio::test]
    async fn deletes_images_before_product() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let storage = Arc::new(InMemoryBlobStorage::new());
        let product = Product::new(ProductId::new(), sample_details("Fugu")).unwrap();
        repo.save(&product).await.unwrap();

        let images = ProductImageHandler::new(repo.clone(), storage.clone());
        for _ in 0..3 {
            images
                .upload(
                    UploadProductImageCommand {
                        product_id: product.id(),
                        image: png(),
                    },
                    Some(&admin_principal()),
                )
                .await
                .unwrap();
        }
        assert_eq!(storage.len().await, 3);

        DeleteProductHandler::new(repo.clone(), storage.clone())
            .handle(
                DeleteProductCommand {
                    product_id: product.id(),
                },
                Some(&admin_principal()),
            )
            .await
            .unwrap();

        assert!(storage.is_empty().await);
        assert!(!repo.exists(&product.id()).await.unwrap());
    }

    #[tokio::test]
    async fn customers_cannot_delete_products() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let err = DeleteProductHandler::new(repo, Arc::new(InMemoryBlobStorage::new()))
            .handle(
                DeleteProductCommand {
                    product_id: ProductId::new(),
                },
                Some(&user_principal(CustomerId::new())),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
