//! Partial product updates.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::application::operations::UPDATE_PRODUCT;
use crate::domain::authorization::{SubjectRef, SubjectType};
use crate::domain::catalog::{Product, ProductChanges, ProductError};
use crate::domain::foundation::{Principal, ProductId};
use crate::ports::ProductRepository;

#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub product_id: ProductId,
    pub changes: ProductChanges,
}

pub struct UpdateProductHandler {
    products: Arc<dyn ProductRepository>,
    gate: AuthorizationGate,
}

impl UpdateProductHandler {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self {
            products,
            gate: AuthorizationGate::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateProductCommand,
        principal: Option<&Principal>,
    ) -> Result<Product, ProductError> {
        let target = SubjectRef::instance(SubjectType::Product, cmd.product_id);
        self.gate.authorize(principal, &UPDATE_PRODUCT, Some(&target))?;

        let mut product = self
            .products
            .find_by_id(&cmd.product_id)
            .await?
            .ok_or_else(|| ProductError::not_found(cmd.product_id))?;
        product.apply(cmd.changes)?;
        self.products.update(&product).await?;
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProductRepository;
    use crate::application::handlers::test_support::{admin_principal, guest_principal};
    use crate::domain::catalog::{sample_details, Price};
    use crate::domain::foundation::ErrorCode;

    async fn seeded() -> (Arc<InMemoryProductRepository>, Product) {
        let repo = Arc::new(InMemoryProductRepository::new());
        let product = Product::new(ProductId::new(), sample_details("Smock")).unwrap();
        repo.save(&product).await.unwrap();
        (repo, product)
    }

    #[tokio::test]
    async fn only_given_fields_change() {
        let (repo, product) = seeded().await;
        let updated = UpdateProductHandler::new(repo)
            .handle(
                UpdateProductCommand {
                    product_id: product.id(),
                    changes: ProductChanges {
                        price: Some(Price::new(300.0, "ghs").unwrap()),
                        num_in_stock: Some(4),
                        ..Default::default()
                    },
                },
                Some(&admin_principal()),
            )
            .await
            .unwrap();

        assert_eq!(updated.details().price.amount(), 300.0);
        assert_eq!(updated.details().num_in_stock, 4);
        assert_eq!(updated.name(), "Smock");
    }

    #[tokio::test]
    async fn guest_is_forbidden() {
        let (repo, product) = seeded().await;
        let err = UpdateProductHandler::new(repo)
            .handle(
                UpdateProductCommand {
                    product_id: product.id(),
                    changes: ProductChanges::default(),
                },
                Some(&guest_principal()),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
