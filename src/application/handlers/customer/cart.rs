//! Customer cart handlers.
//!
//! Every cart operation targets the owning customer, so a user can only
//! touch their own cart while admins can touch any.

use std::sync::Arc;

use crate::application::authorization::{AuthorizationGate, GuardedOperation};
use crate::application::operations::{ADD_TO_CART, REMOVE_FROM_CART, UPDATE_CART_ITEM, VIEW_CART};
use crate::domain::account::{AccountError, CartItem};
use crate::domain::authorization::{SubjectRef, SubjectType};
use crate::domain::foundation::{CartItemId, CustomerId, Principal, ProductId};
use crate::ports::{CartRepository, CustomerRepository, ProductRepository};

#[derive(Debug, Clone)]
pub struct ViewCartQuery {
    pub customer_id: CustomerId,
}

#[derive(Debug, Clone)]
pub struct AddToCartCommand {
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    /// Defaults to 1.
    pub quantity: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct UpdateCartItemCommand {
    pub customer_id: CustomerId,
    pub item_id: CartItemId,
    pub quantity: u32,
}

#[derive(Debug, Clone)]
pub struct RemoveFromCartCommand {
    pub customer_id: CustomerId,
    pub item_id: CartItemId,
}

/// Handles all cart operations for one set of repositories.
pub struct CartHandler {
    customers: Arc<dyn CustomerRepository>,
    products: Arc<dyn ProductRepository>,
    carts: Arc<dyn CartRepository>,
    gate: AuthorizationGate,
}

impl CartHandler {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        products: Arc<dyn ProductRepository>,
        carts: Arc<dyn CartRepository>,
    ) -> Self {
        Self {
            customers,
            products,
            carts,
            gate: AuthorizationGate::new(),
        }
    }

    pub async fn view(
        &self,
        query: ViewCartQuery,
        principal: Option<&Principal>,
    ) -> Result<Vec<CartItem>, AccountError> {
        self.guard(principal, &VIEW_CART, query.customer_id).await?;
        Ok(self.carts.list_for_customer(&query.customer_id).await?)
    }

    /// Adds a product line, or raises the quantity of the existing line for
    /// that product.
    pub async fn add(
        &self,
        cmd: AddToCartCommand,
        principal: Option<&Principal>,
    ) -> Result<CartItem, AccountError> {
        self.guard(principal, &ADD_TO_CART, cmd.customer_id).await?;
        if !self.products.exists(&cmd.product_id).await? {
            return Err(AccountError::ProductNotFound(cmd.product_id.to_string()));
        }

        let item = CartItem::new(cmd.customer_id, cmd.product_id, cmd.quantity)?;
        Ok(self.carts.add(&item).await?)
    }

    pub async fn update(
        &self,
        cmd: UpdateCartItemCommand,
        principal: Option<&Principal>,
    ) -> Result<CartItem, AccountError> {
        self.guard(principal, &UPDATE_CART_ITEM, cmd.customer_id).await?;

        let mut item = self
            .carts
            .find_item(&cmd.customer_id, &cmd.item_id)
            .await?
            .ok_or_else(|| AccountError::CartItemNotFound(cmd.item_id.to_string()))?;
        item.set_quantity(cmd.quantity)?;
        self.carts.save(&item).await?;
        Ok(item)
    }

    pub async fn remove(
        &self,
        cmd: RemoveFromCartCommand,
        principal: Option<&Principal>,
    ) -> Result<(), AccountError> {
        self.guard(principal, &REMOVE_FROM_CART, cmd.customer_id).await?;
        self.carts.delete(&cmd.customer_id, &cmd.item_id).await?;
        Ok(())
    }

    async fn guard(
        &self,
        principal: Option<&Principal>,
        operation: &GuardedOperation,
        customer_id: CustomerId,
    ) -> Result<(), AccountError> {
        let target = SubjectRef::instance(SubjectType::Customer, customer_id);
        self.gate.authorize(principal, operation, Some(&target))?;

        if self.customers.find_by_id(&customer_id).await?.is_none() {
            return Err(AccountError::CustomerNotFound(customer_id.to_string()));
        }
        Ok(())
    }
}
