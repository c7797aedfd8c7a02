//! In-memory admin, customer and cart tables.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::account::{Admin, CartItem, Customer};
use crate::domain::foundation::{
    AdminId, CartItemId, CustomerId, DomainError, ErrorCode,
};
use crate::ports::{AdminRepository, CartRepository, CustomerRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryAdminRepository {
    admins: Arc<RwLock<HashMap<AdminId, Admin>>>,
}

impl InMemoryAdminRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.admins.read().await.len()
    }
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepository {
    async fn save(&self, admin: &Admin) -> Result<(), DomainError> {
        let mut admins = self.admins.write().await;
        if admins
            .values()
            .any(|a| a.id() != admin.id() && a.email() == admin.email())
        {
            return Err(email_taken(admin.email()));
        }
        admins.insert(admin.id(), admin.clone());
        Ok(())
    }

    async fn update(&self, admin: &Admin) -> Result<(), DomainError> {
        let mut admins = self.admins.write().await;
        match admins.get_mut(&admin.id()) {
            Some(existing) => {
                *existing = admin.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::AdminNotFound, admin.id().to_string())),
        }
    }

    async fn find_by_id(&self, id: &AdminId) -> Result<Option<Admin>, DomainError> {
        Ok(self.admins.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, DomainError> {
        let email = email.trim().to_lowercase();
        Ok(self
            .admins
            .read()
            .await
            .values()
            .find(|a| a.email() == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Admin>, DomainError> {
        let mut admins: Vec<Admin> = self.admins.read().await.values().cloned().collect();
        admins.sort_by_key(|a| *a.created_at().as_datetime());
        Ok(admins)
    }

    async fn has_any(&self) -> Result<bool, DomainError> {
        Ok(!self.admins.read().await.is_empty())
    }

    async fn delete(&self, id: &AdminId) -> Result<(), DomainError> {
        match self.admins.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::new(ErrorCode::AdminNotFound, id.to_string())),
        }
    }
}

/// Customers and their cart items; deleting a customer drops the cart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerRepository {
    customers: Arc<RwLock<HashMap<CustomerId, Customer>>>,
    carts: Option<InMemoryCartRepository>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cascades customer deletion into `carts`.
    pub fn with_carts(carts: InMemoryCartRepository) -> Self {
        Self {
            customers: Arc::default(),
            carts: Some(carts),
        }
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn save(&self, customer: &Customer) -> Result<(), DomainError> {
        let mut customers = self.customers.write().await;
        if customers
            .values()
            .any(|c| c.id() != customer.id() && c.email() == customer.email())
        {
            return Err(email_taken(customer.email()));
        }
        customers.insert(customer.id(), customer.clone());
        Ok(())
    }

    async fn update(&self, customer: &Customer) -> Result<(), DomainError> {
        let mut customers = self.customers.write().await;
        match customers.get_mut(&customer.id()) {
            Some(existing) => {
                *existing = customer.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::CustomerNotFound,
                customer.id().to_string(),
            )),
        }
    }

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError> {
        Ok(self.customers.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        let email = email.trim().to_lowercase();
        Ok(self
            .customers
            .read()
            .await
            .values()
            .find(|c| c.email() == email)
            .cloned())
    }

    async fn find_by_social_id(&self, social_id: &str) -> Result<Option<Customer>, DomainError> {
        Ok(self
            .customers
            .read()
            .await
            .values()
            .find(|c| c.social_id() == Some(social_id))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Customer>, DomainError> {
        let mut customers: Vec<Customer> =
            self.customers.read().await.values().cloned().collect();
        customers.sort_by_key(|c| *c.created_at().as_datetime());
        Ok(customers)
    }

    async fn delete(&self, id: &CustomerId) -> Result<(), DomainError> {
        if self.customers.write().await.remove(id).is_none() {
            return Err(DomainError::new(ErrorCode::CustomerNotFound, id.to_string()));
        }
        if let Some(carts) = &self.carts {
            carts.items.write().await.retain(|_, item| item.customer_id() != *id);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCartRepository {
    items: Arc<RwLock<HashMap<CartItemId, CartItem>>>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn save(&self, item: &CartItem) -> Result<(), DomainError> {
        self.items.write().await.insert(item.id(), item.clone());
        Ok(())
    }

    async fn find_item(
        &self,
        customer_id: &CustomerId,
        item_id: &CartItemId,
    ) -> Result<Option<CartItem>, DomainError> {
        Ok(self
            .items
            .read()
            .await
            .get(item_id)
            .filter(|item| item.customer_id() == *customer_id)
            .cloned())
    }

    async fn add(&self, item: &CartItem) -> Result<CartItem, DomainError> {
        let mut items = self.items.write().await;
        let existing = items.values_mut().find(|line| {
            line.customer_id() == item.customer_id() && line.product_id() == item.product_id()
        });
        match existing {
            Some(line) => {
                line.increase(item.quantity())?;
                Ok(line.clone())
            }
            None => {
                items.insert(item.id(), item.clone());
                Ok(item.clone())
            }
        }
    }

    async fn list_for_customer(&self, customer_id: &CustomerId) -> Result<Vec<CartItem>, DomainError> {
        let mut items: Vec<CartItem> = self
            .items
            .read()
            .await
            .values()
            .filter(|item| item.customer_id() == *customer_id)
            .cloned()
            .collect();
        items.sort_by_key(|item| *item.created_at().as_datetime());
        Ok(items)
    }

    async fn delete(&self, customer_id: &CustomerId, item_id: &CartItemId) -> Result<(), DomainError> {
        let mut items = self.items.write().await;
        match items.get(item_id) {
            Some(item) if item.customer_id() == *customer_id => {
                items.remove(item_id);
                Ok(())
            }
            _ => Err(DomainError::new(ErrorCode::CartItemNotFound, item_id.to_string())),
        }
    }
}

fn email_taken(email: &str) -> DomainError {
    DomainError::new(ErrorCode::EmailTaken, email).with_detail("field", "email")
}
