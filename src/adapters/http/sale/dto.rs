//! Request and response bodies for sale endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::sale::RecordSaleCommand;
use crate::domain::foundation::{EmployeeId, ProductId, Timestamp};
use crate::domain::sales::{Sale, SaleChanges};

#[derive(Debug, Clone, Deserialize)]
pub struct RecordSaleRequest {
    pub product_id: ProductId,
    pub employee_id: EmployeeId,
    pub currency: String,
    pub amount: f64,
    pub quantity: u32,
}

impl From<RecordSaleRequest> for RecordSaleCommand {
    fn from(req: RecordSaleRequest) -> Self {
        Self {
            product_id: req.product_id,
            employee_id: req.employee_id,
            currency: req.currency,
            amount: req.amount,
            quantity: req.quantity,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSaleRequest {
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl From<UpdateSaleRequest> for SaleChanges {
    fn from(req: UpdateSaleRequest) -> Self {
        Self {
            product_id: req.product_id,
            employee_id: req.employee_id,
            currency: req.currency,
            amount: req.amount,
            quantity: req.quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleResponse {
    pub id: String,
    pub product_id: String,
    pub employee_id: String,
    pub currency: String,
    pub amount: f64,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Sale> for SaleResponse {
    fn from(sale: &Sale) -> Self {
        Self {
            id: sale.id().to_string(),
            product_id: sale.product_id().to_string(),
            employee_id: sale.employee_id().to_string(),
            currency: sale.currency().to_string(),
            amount: sale.amount(),
            quantity: sale.quantity(),
            created_at: *sale.created_at(),
            updated_at: *sale.updated_at(),
        }
    }
}
