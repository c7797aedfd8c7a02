//! Customer avatar upload and removal.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::application::handlers::support::{discard_image, store_image, ImageUpload};
use crate::application::operations::{DELETE_CUSTOMER_AVATAR, UPDATE_CUSTOMER_AVATAR};
use crate::domain::account::{AccountError, Customer};
use crate::domain::authorization::{SubjectRef, SubjectType};
use crate::domain::foundation::{CustomerId, Principal};
use crate::ports::{BlobStorage, CustomerRepository, CUSTOMER_AVATAR_FOLDER};

#[derive(Debug, Clone)]
pub struct UpdateCustomerAvatarCommand {
    pub customer_id: CustomerId,
    pub image: ImageUpload,
}

pub struct UpdateCustomerAvatarHandler {
    customers: Arc<dyn CustomerRepository>,
    storage: Arc<dyn BlobStorage>,
    gate: AuthorizationGate,
}

impl UpdateCustomerAvatarHandler {
    pub fn new(customers: Arc<dyn CustomerRepository>, storage: Arc<dyn BlobStorage>) -> Self {
        Self {
            customers,
            storage,
            gate: AuthorizationGate::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateCustomerAvatarCommand,
        principal: Option<&Principal>,
    ) -> Result<Customer, AccountError> {
        let target = SubjectRef::instance(SubjectType::Customer, cmd.customer_id);
        self.gate
            .authorize(principal, &UPDATE_CUSTOMER_AVATAR, Some(&target))?;

        let mut customer = self
            .customers
            .find_by_id(&cmd.customer_id)
            .await?
            .ok_or_else(|| AccountError::CustomerNotFound(cmd.customer_id.to_string()))?;

        let stored = store_image(self.storage.as_ref(), CUSTOMER_AVATAR_FOLDER, cmd.image).await?;
        let previous = customer.profile().avatar.clone();
        customer.set_avatar(stored.url);
        self.customers.update(&customer).await?;

        discard_image(self.storage.as_ref(), CUSTOMER_AVATAR_FOLDER, &previous).await?;
        Ok(customer)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteCustomerAvatarCommand {
    pub customer_id: CustomerId,
}

pub struct DeleteCustomerAvatarHandler {
    customers: Arc<dyn CustomerRepository>,
    storage: Arc<dyn BlobStorage>,
    gate: AuthorizationGate,
}

impl DeleteCustomerAvatarHandler {
    pub fn new(customers: Arc<dyn CustomerRepository>, storage: Arc<dyn BlobStorage>) -> Self {
        Self {
            customers,
            storage,
            gate: AuthorizationGate::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: DeleteCustomerAvatarCommand,
        principal: Option<&Principal>,
    ) -> Result<Customer, AccountError> {
        let target = SubjectRef::instance(SubjectType::Customer, cmd.customer_id);
        self.gate
            .authorize(principal, &DELETE_CUSTOMER_AVATAR, Some(&target))?;

        let mut customer = self
            .customers
            .find_by_id(&cmd.customer_id)
            .await?
            .ok_or_else(|| AccountError::CustomerNotFound(cmd.customer_id.to_string()))?;
        if customer.profile().has_default_avatar() {
            return Ok(customer);
        }

        discard_image(
            self.storage.as_ref(),
            CUSTOMER_AVATAR_FOLDER,
            &customer.profile().avatar,
        )
        .await?;
        customer.reset_avatar();
        self.customers.update(&customer).await?;
        Ok(customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCustomerRepository;
    use crate::adapters::storage::InMemoryBlobStorage;
    use crate::application::handlers::test_support::{png, user_principal};
    use crate::domain::account::AccountProfile;
    use crate::domain::foundation::ErrorCode;

    async fn seeded() -> (Arc<InMemoryCustomerRepository>, Arc<InMemoryBlobStorage>, Customer) {
        let repo = Arc::new(InMemoryCustomerRepository::new());
        let profile = AccountProfile::new("ama@mail.com", "Ama", "Serwaa", None, None).unwrap();
        let customer = Customer::new(CustomerId::new(), profile, "hash".into());
        repo.save(&customer).await.unwrap();
        (repo, Arc::new(InMemoryBlobStorage::new()), customer)
    }

    #[tokio::test]
    async fn upload_then_remove() {
        let (repo, storage, customer) = seeded().await;
        let owner = user_principal(customer.id());

        let updated = UpdateCustomerAvatarHandler::new(repo.clone(), storage.clone())
            .handle(
                UpdateCustomerAvatarCommand {
                    customer_id: customer.id(),
                    image: png(),
                },
                Some(&owner),
            )
            .await
            .unwrap();
        assert!(!updated.profile().has_default_avatar());
        assert_eq!(storage.len().await, 1);

        let reset = DeleteCustomerAvatarHandler::new(repo, storage.clone())
            .handle(
                DeleteCustomerAvatarCommand {
                    customer_id: customer.id(),
                },
                Some(&owner),
            )
            .await
            .unwrap();
        assert!(reset.profile().has_default_avatar());
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn stranger_cannot_change_avatar() {
        let (repo, storage, customer) = seeded().await;
        let err = UpdateCustomerAvatarHandler::new(repo, storage.clone())
            .handle(
                UpdateCustomerAvatarCommand {
                    customer_id: customer.id(),
                    image: png(),
                },
                Some(&user_principal(CustomerId::new())),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert!(storage.is_empty().await);
    }
}
