//! In-memory product table.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::catalog::Product;
use crate::domain::foundation::{DomainError, ErrorCode, ProductId};
use crate::ports::ProductRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, product: &Product) -> Result<(), DomainError> {
        self.products
            .write()
            .await
            .insert(product.id(), product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        let mut products = self.products.write().await;
        match products.get_mut(&product.id()) {
            Some(existing) => {
                *existing = product.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ProductNotFound,
                product.id().to_string(),
            )),
        }
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        Ok(self.products.read().await.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, DomainError> {
        let name = name.trim();
        Ok(self
            .products
            .read()
            .await
            .values()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Product>, DomainError> {
        let mut products: Vec<Product> = self.products.read().await.values().cloned().collect();
        products.sort_by_key(|p| *p.created_at().as_datetime());
        Ok(products)
    }

    async fn exists(&self, id: &ProductId) -> Result<bool, DomainError> {
        Ok(self.products.read().await.contains_key(id))
    }

    async fn delete(&self, id: &ProductId) -> Result<(), DomainError> {
        match self.products.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::new(ErrorCode::ProductNotFound, id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::sample_details;

    #[tokio::test]
    async fn finds_by_name_ignoring_case() {
        let repo = InMemoryProductRepository::new();
        let product = Product::new(ProductId::new(), sample_details("Kente Hoodie")).unwrap();
        repo.save(&product).await.unwrap();

        let found = repo.find_by_name("kente hoodie").await.unwrap();
        assert_eq!(found.map(|p| p.id()), Some(product.id()));
        assert!(repo.find_by_name("Denim").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_and_reports_missing() {
        let repo = InMemoryProductRepository::new();
        let product = Product::new(ProductId::new(), sample_details("Cap")).unwrap();
        repo.save(&product).await.unwrap();

        repo.delete(&product.id()).await.unwrap();
        assert!(!repo.exists(&product.id()).await.unwrap());

        let err = repo.delete(&product.id()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductNotFound);
    }
}
