//! Public catalog browsing. No authentication required.

use std::sync::Arc;

use crate::domain::catalog::{Product, ProductError};
use crate::domain::foundation::ProductId;
use crate::ports::ProductRepository;

pub struct ProductQueries {
    products: Arc<dyn ProductRepository>,
}

impl ProductQueries {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn list(&self) -> Result<Vec<Product>, ProductError> {
        Ok(self.products.list().await?)
    }

    pub async fn get(&self, id: ProductId) -> Result<Product, ProductError> {
        self.products
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ProductError::not_found(id))
    }

    /// Case-insensitive lookup by exact name.
    pub async fn get_by_name(&self, name: &str) -> Result<Product, ProductError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProductError::ValidationFailed {
                field: "name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        self.products
            .find_by_name(name)
            .await?
            .ok_or_else(|| ProductError::not_found(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProductRepository;
    use crate::domain::catalog::sample_details;
    use crate::domain::foundation::ErrorCode;

    async fn seeded() -> (ProductQueries, Product) {
        let repo = Arc::new(InMemoryProductRepository::new());
        let product = Product::new(ProductId::new(), sample_details("Kente Bomber")).unwrap();
        repo.save(&product).await.unwrap();
        (ProductQueries::new(repo), product)
    }

    #[tokio::test]
    async fn lookups() {
        let (queries, product) = seeded().await;
        assert_eq!(queries.list().await.unwrap().len(), 1);
        assert_eq!(queries.get(product.id()).await.unwrap().id(), product.id());
        assert_eq!(
            queries.get_by_name("kente bomber").await.unwrap().id(),
            product.id()
        );
    }

    #[tokio::test]
    async fn misses_are_not_found() {
        let (queries, _) = seeded().await;
        assert_eq!(
            queries.get(ProductId::new()).await.unwrap_err().code(),
            ErrorCode::ProductNotFound
        );
        assert_eq!(
            queries.get_by_name("Denim").await.unwrap_err().code(),
            ErrorCode::ProductNotFound
        );
        assert_eq!(
            queries.get_by_name(" ").await.unwrap_err().code(),
            ErrorCode::ValidationFailed
        );
    }
}
