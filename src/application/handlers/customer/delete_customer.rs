//! Customer account removal.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::application::handlers::support::discard_image;
use crate::application::operations::DELETE_CUSTOMER;
use crate::domain::account::AccountError;
use crate::domain::authorization::{SubjectRef, SubjectType};
use crate::domain::foundation::{CustomerId, Principal};
use crate::ports::{BlobStorage, CustomerRepository, CUSTOMER_AVATAR_FOLDER};

#[derive(Debug, Clone)]
pub struct DeleteCustomerCommand {
    pub customer_id: CustomerId,
}

pub struct DeleteCustomerHandler {
    customers: Arc<dyn CustomerRepository>,
    storage: Arc<dyn BlobStorage>,
    gate: AuthorizationGate,
}

impl DeleteCustomerHandler {
    pub fn new(customers: Arc<dyn CustomerRepository>, storage: Arc<dyn BlobStorage>) -> Self {
        Self {
            customers,
            storage,
            gate: AuthorizationGate::new(),
        }
    }

    /// Deletes the customer; the repository removes their cart with them.
    pub async fn handle(
        &self,
        cmd: DeleteCustomerCommand,
        principal: Option<&Principal>,
    ) -> Result<(), AccountError> {
        let target = SubjectRef::instance(SubjectType::Customer, cmd.customer_id);
        self.gate.authorize(principal, &DELETE_CUSTOMER, Some(&target))?;

        let customer = self
            .customers
            .find_by_id(&cmd.customer_id)
            .await?
            .ok_or_else(|| AccountError::CustomerNotFound(cmd.customer_id.to_string()))?;

        self.customers.delete(&customer.id()).await?;
        discard_image(
            self.storage.as_ref(),
            CUSTOMER_AVATAR_FOLDER,
            &customer.profile().avatar,
        )
        .await?;

        tracing::info!(customer_id = %customer.id(), "Customer deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryCartRepository, InMemoryCustomerRepository};
    use crate::adapters::storage::InMemoryBlobStorage;
    use crate::application::handlers::test_support::user_principal;
    use crate::domain::account::{AccountProfile, CartItem, Customer};
    use crate::domain::foundation::{ErrorCode, ProductId};
    use crate::ports::CartRepository;

    #[tokio::test]
    async fn owner_deletes_account_and_cart() {
        let carts = InMemoryCartRepository::new();
        let customers = Arc::new(InMemoryCustomerRepository::with_carts(carts.clone()));
        let profile = AccountProfile::new("abena@mail.com", "Abena", "Osei", None, None).unwrap();
        let customer = Customer::new(CustomerId::new(), profile, "hash".into());
        customers.save(&customer).await.unwrap();
        carts
            .save(&CartItem::new(customer.id(), ProductId::new(), None).unwrap())
            .await
            .unwrap();

        DeleteCustomerHandler::new(customers.clone(), Arc::new(InMemoryBlobStorage::new()))
            .handle(
                DeleteCustomerCommand {
                    customer_id: customer.id(),
                },
                Some(&user_principal(customer.id())),
            )
            .await
            .unwrap();

        assert!(customers.find_by_id(&customer.id()).await.unwrap().is_none());
        assert!(carts.list_for_customer(&customer.id()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_customer_is_not_found() {
        let id = CustomerId::new();
        let err = DeleteCustomerHandler::new(
            Arc::new(InMemoryCustomerRepository::new()),
            Arc::new(InMemoryBlobStorage::new()),
        )
        .handle(DeleteCustomerCommand { customer_id: id }, Some(&user_principal(id)))
        .await
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::CustomerNotFound);
    }
}
