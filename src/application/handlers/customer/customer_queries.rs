//! Customer read operations.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::application::handlers::support::parse_id;
use crate::application::operations::{GET_CUSTOMER, GET_CUSTOMER_PROFILE, LIST_CUSTOMERS};
use crate::domain::account::{AccountError, Customer};
use crate::domain::authorization::{SubjectRef, SubjectType};
use crate::domain::foundation::{CustomerId, Principal};
use crate::ports::CustomerRepository;

pub struct ListCustomersHandler {
    customers: Arc<dyn CustomerRepository>,
    gate: AuthorizationGate,
}

impl ListCustomersHandler {
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        Self {
            customers,
            gate: AuthorizationGate::new(),
        }
    }

    pub async fn handle(&self, principal: Option<&Principal>) -> Result<Vec<Customer>, AccountError> {
        self.gate.authorize(principal, &LIST_CUSTOMERS, None)?;
        Ok(self.customers.list().await?)
    }
}

#[derive(Debug, Clone)]
pub struct GetCustomerQuery {
    pub customer_id: CustomerId,
}

pub struct GetCustomerHandler {
    customers: Arc<dyn CustomerRepository>,
    gate: AuthorizationGate,
}

impl GetCustomerHandler {
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        Self {
            customers,
            gate: AuthorizationGate::new(),
        }
    }

    pub async fn handle(
        &self,
        query: GetCustomerQuery,
        principal: Option<&Principal>,
    ) -> Result<Customer, AccountError> {
        let target = SubjectRef::instance(SubjectType::Customer, query.customer_id);
        self.gate.authorize(principal, &GET_CUSTOMER, Some(&target))?;

        self.customers
            .find_by_id(&query.customer_id)
            .await?
            .ok_or_else(|| AccountError::CustomerNotFound(query.customer_id.to_string()))
    }
}

/// Returns the calling customer's own record.
pub struct GetCustomerProfileHandler {
    customers: Arc<dyn CustomerRepository>,
    gate: AuthorizationGate,
}

impl GetCustomerProfileHandler {
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        Self {
            customers,
            gate: AuthorizationGate::new(),
        }
    }

    pub async fn handle(&self, principal: Option<&Principal>) -> Result<Customer, AccountError> {
        let target = principal.map(|p| SubjectRef::instance(SubjectType::Customer, &p.id));
        let ability = self
            .gate
            .authorize(principal, &GET_CUSTOMER_PROFILE, target.as_ref())?;

        let missing = || AccountError::CustomerNotFound(ability.principal_id().to_string());
        let customer_id: CustomerId = parse_id(ability.principal_id()).ok_or_else(missing)?;
        self.customers.find_by_id(&customer_id).await?.ok_or_else(missing)
    }
}
