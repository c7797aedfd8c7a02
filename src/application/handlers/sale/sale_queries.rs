//! Sales ledger reads.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::application::operations::{GET_SALE, LIST_EMPLOYEE_SALES, LIST_SALES};
use crate::domain::authorization::{SubjectRef, SubjectType};
use crate::domain::foundation::{EmployeeId, Principal, SaleId};
use crate::domain::sales::{Sale, SaleError};
use crate::ports::SaleRepository;

pub struct SaleQueries {
    sales: Arc<dyn SaleRepository>,
    gate: AuthorizationGate,
}

impl SaleQueries {
    pub fn new(sales: Arc<dyn SaleRepository>) -> Self {
        Self {
            sales,
            gate: AuthorizationGate::new(),
        }
    }

    pub async fn list(&self, principal: Option<&Principal>) -> Result<Vec<Sale>, SaleError> {
        self.gate.authorize(principal, &LIST_SALES, None)?;
        Ok(self.sales.list().await?)
    }

    pub async fn get(&self, id: SaleId, principal: Option<&Principal>) -> Result<Sale, SaleError> {
        let target = SubjectRef::instance(SubjectType::Sale, id);
        self.gate.authorize(principal, &GET_SALE, Some(&target))?;

        self.sales
            .find_by_id(&id)
            .await?
            .ok_or_else(|| SaleError::NotFound(id.to_string()))
    }

    pub async fn by_employee(
        &self,
        employee_id: EmployeeId,
        principal: Option<&Principal>,
    ) -> Result<Vec<Sale>, SaleError> {
        self.gate.authorize(principal, &LIST_EMPLOYEE_SALES, None)?;
        Ok(self.sales.list_by_employee(&employee_id).await?)
    }
}
