//! Cart lines owned by a customer.

use crate::domain::authorization::{Subject, SubjectType};
use crate::domain::foundation::{CartItemId, CustomerId, ProductId, Timestamp, ValidationError};

/// One product line in a customer's cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    id: CartItemId,
    customer_id: CustomerId,
    product_id: ProductId,
    quantity: u32,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl CartItem {
    /// Creates a cart line. Quantity defaults to 1 and must be positive.
    pub fn new(
        customer_id: CustomerId,
        product_id: ProductId,
        quantity: Option<u32>,
    ) -> Result<Self, ValidationError> {
        let quantity = validate_quantity(quantity.unwrap_or(1))?;
        let now = Timestamp::now();
        Ok(Self {
            id: CartItemId::new(),
            customer_id,
            product_id,
            quantity,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn reconstitute(
        id: CartItemId,
        customer_id: CustomerId,
        product_id: ProductId,
        quantity: u32,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            customer_id,
            product_id,
            quantity,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> CartItemId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), ValidationError> {
        self.quantity = validate_quantity(quantity)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Adds to the quantity when the same product is added again.
    pub fn increase(&mut self, by: u32) -> Result<(), ValidationError> {
        let by = validate_quantity(by)?;
        self.set_quantity(self.quantity.saturating_add(by))
    }
}

impl Subject for CartItem {
    const SUBJECT_TYPE: SubjectType = SubjectType::Cart;

    fn subject_id(&self) -> String {
        self.id.to_string()
    }
}

fn validate_quantity(quantity: u32) -> Result<u32, ValidationError> {
    if quantity == 0 {
        return Err(ValidationError::too_small("quantity", 1, 0));
    }
    Ok(quantity)
}
