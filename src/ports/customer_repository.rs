//! Customer and cart repository ports.

use async_trait::async_trait;

use crate::domain::account::{CartItem, Customer};
use crate::domain::foundation::{CartItemId, CustomerId, DomainError};

/// Repository port for customer accounts.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Save a new customer.
    ///
    /// # Errors
    ///
    /// - `EmailTaken` if another customer uses the same email
    /// - `DatabaseError` on persistence failure
    async fn save(&self, customer: &Customer) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `CustomerNotFound` if the customer doesn't exist
    async fn update(&self, customer: &Customer) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError>;

    /// Lookup by the identifier of a linked social account.
    async fn find_by_social_id(&self, social_id: &str) -> Result<Option<Customer>, DomainError>;

    /// All customers, newest first.
    async fn list(&self) -> Result<Vec<Customer>, DomainError>;

    /// Deletes the customer and their cart.
    ///
    /// # Errors
    ///
    /// - `CustomerNotFound` if the customer doesn't exist
    async fn delete(&self, id: &CustomerId) -> Result<(), DomainError>;
}

/// Repository port for cart lines.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Insert or replace a cart line.
    async fn save(&self, item: &CartItem) -> Result<(), DomainError>;

    /// A line of the given customer's cart.
    async fn find_item(
        &self,
        customer_id: &CustomerId,
        item_id: &CartItemId,
    ) -> Result<Option<CartItem>, DomainError>;

    /// Inserts `item`, or adds its quantity to the line already holding the
    /// same product. The merge is atomic. Returns the stored line.
    async fn add(&self, item: &CartItem) -> Result<CartItem, DomainError>;

    /// Lines of a customer's cart, oldest first.
    async fn list_for_customer(&self, customer_id: &CustomerId) -> Result<Vec<CartItem>, DomainError>;

    /// # Errors
    ///
    /// - `CartItemNotFound` if the line doesn't exist in that cart
    async fn delete(&self, customer_id: &CustomerId, item_id: &CartItemId) -> Result<(), DomainError>;
}
