//! Product repository port.

use async_trait::async_trait;

use crate::domain::catalog::Product;
use crate::domain::foundation::{DomainError, ProductId};

/// Repository port for catalog products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn save(&self, product: &Product) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `ProductNotFound` if the product doesn't exist
    async fn update(&self, product: &Product) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError>;

    /// Case-insensitive exact name match.
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, DomainError>;

    /// All products, newest first.
    async fn list(&self) -> Result<Vec<Product>, DomainError>;

    async fn exists(&self, id: &ProductId) -> Result<bool, DomainError>;

    /// # Errors
    ///
    /// - `ProductNotFound` if the product doesn't exist
    async fn delete(&self, id: &ProductId) -> Result<(), DomainError>;
}
