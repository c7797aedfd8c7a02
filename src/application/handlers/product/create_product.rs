//! Product creation.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::application::operations::CREATE_PRODUCT;
use crate::domain::catalog::{Product, ProductDetails, ProductError};
use crate::domain::foundation::{Principal, ProductId};
use crate::ports::ProductRepository;

#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub details: ProductDetails,
}

pub struct CreateProductHandler {
    products: Arc<dyn ProductRepository>,
    gate: AuthorizationGate,
}

impl CreateProductHandler {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self {
            products,
            gate: AuthorizationGate::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateProductCommand,
        principal: Option<&Principal>,
    ) -> Result<Product, ProductError> {
        self.gate.authorize(principal, &CREATE_PRODUCT, None)?;

        let product = Product::new(ProductId::new(), cmd.details)?;
        self.products.save(&product).await?;

        tracing::info!(product_id = %product.id(), name = %product.name(), "Product created");
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProductRepository;
    use crate::application::handlers::test_support::{admin_principal, user_principal};
    use crate::domain::catalog::sample_details;
    use crate::domain::foundation::{CustomerId, ErrorCode};

    #[tokio::test]
    async fn admin_creates_product() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let product = CreateProductHandler::new(repo.clone())
            .handle(
                CreateProductCommand {
                    details: sample_details("Dynasty Cap"),
                },
                Some(&admin_principal()),
            )
            .await
            .unwrap();

        assert!(product.images().is_empty());
        assert!(repo.exists(&product.id()).await.unwrap());
    }

    #[tokio::test]
    async fn customer_cannot_create_products() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let err = CreateProductHandler::new(repo)
            .handle(
                CreateProductCommand {
                    details: sample_details("Dynasty Cap"),
                },
                Some(&user_principal(CustomerId::new())),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn blank_name_fails_validation() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let err = CreateProductHandler::new(repo)
            .handle(
                CreateProductCommand {
                    details: sample_details("  "),
                },
                Some(&admin_principal()),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }
}
