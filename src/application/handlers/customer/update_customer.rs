//! Customer profile and password changes.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::application::operations::{RESET_CUSTOMER_PASSWORD, UPDATE_CUSTOMER};
use crate::domain::account::{validate_password, AccountError, Customer, ProfileChanges};
use crate::domain::authorization::{SubjectRef, SubjectType};
use crate::domain::foundation::{CustomerId, Principal};
use crate::ports::{CustomerRepository, PasswordHasher};

#[derive(Debug, Clone)]
pub struct UpdateCustomerCommand {
    pub customer_id: CustomerId,
    pub changes: ProfileChanges,
    pub password: Option<String>,
}

pub struct UpdateCustomerHandler {
    customers: Arc<dyn CustomerRepository>,
    hasher: Arc<dyn PasswordHasher>,
    gate: AuthorizationGate,
}

impl UpdateCustomerHandler {
    pub fn new(customers: Arc<dyn CustomerRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            customers,
            hasher,
            gate: AuthorizationGate::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateCustomerCommand,
        principal: Option<&Principal>,
    ) -> Result<Customer, AccountError> {
        let target = SubjectRef::instance(SubjectType::Customer, cmd.customer_id);
        self.gate.authorize(principal, &UPDATE_CUSTOMER, Some(&target))?;

        let mut customer = self
            .customers
            .find_by_id(&cmd.customer_id)
            .await?
            .ok_or_else(|| AccountError::CustomerNotFound(cmd.customer_id.to_string()))?;

        if let Some(password) = &cmd.password {
            validate_password(password)?;
        }
        customer.update_profile(cmd.changes)?;
        if let Some(password) = &cmd.password {
            customer.change_password_hash(self.hasher.hash(password)?);
        }

        self.customers.update(&customer).await?;
        Ok(customer)
    }
}

#[derive(Debug, Clone)]
pub struct ResetCustomerPasswordCommand {
    pub customer_id: CustomerId,
    pub password: String,
}

pub struct ResetCustomerPasswordHandler {
    customers: Arc<dyn CustomerRepository>,
    hasher: Arc<dyn PasswordHasher>,
    gate: AuthorizationGate,
}

impl ResetCustomerPasswordHandler {
    pub fn new(customers: Arc<dyn CustomerRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            customers,
            hasher,
            gate: AuthorizationGate::new(),
        }
    }

    /// Sets a password, which also lets a social-only customer log in with one.
    pub async fn handle(
        &self,
        cmd: ResetCustomerPasswordCommand,
        principal: Option<&Principal>,
    ) -> Result<(), AccountError> {
        let target = SubjectRef::instance(SubjectType::Customer, cmd.customer_id);
        self.gate
            .authorize(principal, &RESET_CUSTOMER_PASSWORD, Some(&target))?;
        validate_password(&cmd.password)?;

        let mut customer = self
            .customers
            .find_by_id(&cmd.customer_id)
            .await?
            .ok_or_else(|| AccountError::CustomerNotFound(cmd.customer_id.to_string()))?;
        customer.change_password_hash(self.hasher.hash(&cmd.password)?);
        self.customers.update(&customer).await?;

        tracing::info!(customer_id = %customer.id(), "Customer password reset");
        Ok(())
    }
}
