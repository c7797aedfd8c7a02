//! Sale records.

use crate::domain::authorization::{Subject, SubjectType};
use crate::domain::catalog::{normalize_currency, validate_amount};
use crate::domain::foundation::{EmployeeId, ProductId, SaleId, Timestamp, ValidationError};

/// A sale of a product made by an employee.
#[derive(Debug, Clone, PartialEq)]
pub struct Sale {
    id: SaleId,
    product_id: ProductId,
    employee_id: EmployeeId,
    currency: String,
    amount: f64,
    quantity: u32,
    created_at: Timestamp,
    updated_at: Timestamp,
}

/// Partial sale update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleChanges {
    pub product_id: Option<ProductId>,
    pub employee_id: Option<EmployeeId>,
    pub currency: Option<String>,
    pub amount: Option<f64>,
    pub quantity: Option<u32>,
}

impl Sale {
    pub fn new(
        id: SaleId,
        product_id: ProductId,
        employee_id: EmployeeId,
        currency: &str,
        amount: f64,
        quantity: u32,
    ) -> Result<Self, ValidationError> {
        validate_amount("amount", amount)?;
        let currency = normalize_currency(currency)?;
        validate_quantity(quantity)?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            product_id,
            employee_id,
            currency,
            amount,
            quantity,
            created_at: now,
            updated_at: now,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SaleId,
        product_id: ProductId,
        employee_id: EmployeeId,
        currency: String,
        amount: f64,
        quantity: u32,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            product_id,
            employee_id,
            currency,
            amount,
            quantity,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> SaleId {
        self.id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn amount(&self) -> f64 {
        self.amount
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

    /// Applies the changes atomically: nothing changes if any field is invalid.
    pub fn apply(&mut self, changes: SaleChanges) -> Result<(), ValidationError> {
        let currency = match changes.currency {
            Some(c) => normalize_currency(&c)?,
            None => self.currency.clone(),
        };
        let amount = changes.amount.unwrap_or(self.amount);
        validate_amount("amount", amount)?;
        let quantity = changes.quantity.unwrap_or(self.quantity);
        validate_quantity(quantity)?;

        if let Some(product_id) = changes.product_id {
            self.product_id = product_id;
        }
        if let Some(employee_id) = changes.employee_id {
            self.employee_id = employee_id;
        }
        self.currency = currency;
        self.amount = amount;
        self.quantity = quantity;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

impl Subject for Sale {
    const SUBJECT_TYPE: SubjectType = SubjectType::Sale;

    fn subject_id(&self) -> String {
        self.id.to_string()
    }
}

fn validate_quantity(quantity: u32) -> Result<(), ValidationError> {
    if quantity == 0 {
        return Err(ValidationError::too_small("quantity", 1, 0));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale() -> Sale {
        Sale::new(SaleId::new(), ProductId::new(), EmployeeId::new(), "ghs", 500.0, 2).unwrap()
    }

    #[test]
    fn new_sale_normalizes_currency() {
        assert_eq!(sale().currency(), "GHS");
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let result = Sale::new(SaleId::new(), ProductId::new(), EmployeeId::new(), "USD", 1.0, 0);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_change_leaves_sale_untouched() {
        let mut s = sale();
        let err = s.apply(SaleChanges {
            amount: Some(-5.0),
            quantity: Some(9),
            ..Default::default()
        });
        assert!(err.is_err());
        assert_eq!(s.quantity(), 2);
        assert_eq!(s.amount(), 500.0);
    }

    #[test]
    fn valid_change_is_applied() {
        let mut s = sale();
        s.apply(SaleChanges {
            quantity: Some(3),
            currency: Some("usd".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(s.quantity(), 3);
        assert_eq!(s.currency(), "USD");
    }
}
