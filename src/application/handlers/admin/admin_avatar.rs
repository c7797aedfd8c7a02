//! Admin avatar upload and removal.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::application::handlers::support::{discard_image, store_image, ImageUpload};
use crate::application::operations::{DELETE_ADMIN_AVATAR, UPDATE_ADMIN_AVATAR};
use crate::domain::account::{AccountError, Admin};
use crate::domain::authorization::{SubjectRef, SubjectType};
use crate::domain::foundation::{AdminId, Principal};
use crate::ports::{AdminRepository, BlobStorage, ADMIN_AVATAR_FOLDER};

#[derive(Debug, Clone)]
pub struct UpdateAdminAvatarCommand {
    pub admin_id: AdminId,
    pub image: ImageUpload,
}

pub struct UpdateAdminAvatarHandler {
    admins: Arc<dyn AdminRepository>,
    storage: Arc<dyn BlobStorage>,
    gate: AuthorizationGate,
}

impl UpdateAdminAvatarHandler {
    pub fn new(admins: Arc<dyn AdminRepository>, storage: Arc<dyn BlobStorage>) -> Self {
        Self {
            admins,
            storage,
            gate: AuthorizationGate::new(),
        }
    }

    /// Stores the new avatar, then drops the previous one from storage.
    pub async fn handle(
        &self,
        cmd: UpdateAdminAvatarCommand,
        principal: Option<&Principal>,
    ) -> Result<Admin, AccountError> {
        let target = SubjectRef::instance(SubjectType::Admin, cmd.admin_id);
        self.gate
            .authorize(principal, &UPDATE_ADMIN_AVATAR, Some(&target))?;

        let mut admin = self
            .admins
            .find_by_id(&cmd.admin_id)
            .await?
            .ok_or_else(|| AccountError::AdminNotFound(cmd.admin_id.to_string()))?;

        let stored = store_image(self.storage.as_ref(), ADMIN_AVATAR_FOLDER, cmd.image).await?;
        let previous = admin.profile().avatar.clone();
        admin.set_avatar(stored.url);
        self.admins.update(&admin).await?;

        discard_image(self.storage.as_ref(), ADMIN_AVATAR_FOLDER, &previous).await?;
        Ok(admin)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteAdminAvatarCommand {
    pub admin_id: AdminId,
}

pub struct DeleteAdminAvatarHandler {
    admins: Arc<dyn AdminRepository>,
    storage: Arc<dyn BlobStorage>,
    gate: AuthorizationGate,
}

impl DeleteAdminAvatarHandler {
    pub fn new(admins: Arc<dyn AdminRepository>, storage: Arc<dyn BlobStorage>) -> Self {
        Self {
            admins,
            storage,
            gate: AuthorizationGate::new(),
        }
    }

    /// Removes the uploaded avatar and restores the default one.
    pub async fn handle(
        &self,
        cmd: DeleteAdminAvatarCommand,
        principal: Option<&Principal>,
    ) -> Result<Admin, AccountError> {
        let target = SubjectRef::instance(SubjectType::Admin, cmd.admin_id);
        self.gate
            .authorize(principal, &DELETE_ADMIN_AVATAR, Some(&target))?;

        let mut admin = self
            .admins
            .find_by_id(&cmd.admin_id)
            .await?
            .ok_or_else(|| AccountError::AdminNotFound(cmd.admin_id.to_string()))?;
        if admin.profile().has_default_avatar() {
            return Ok(admin);
        }

        discard_image(self.storage.as_ref(), ADMIN_AVATAR_FOLDER, &admin.profile().avatar).await?;
        admin.reset_avatar();
        self.admins.update(&admin).await?;
        Ok(admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAdminRepository;
    use crate::adapters::storage::InMemoryBlobStorage;
    use crate::application::handlers::test_support::png;
    use crate::domain::account::{asset_public_id, AccountProfile};
    use crate::domain::foundation::{ErrorCode, Role};

    struct Fixture {
        admins: Arc<InMemoryAdminRepository>,
        storage: Arc<InMemoryBlobStorage>,
        admin: Admin,
        principal: Principal,
    }

    async fn fixture() -> Fixture {
        let admins = Arc::new(InMemoryAdminRepository::new());
        let profile = AccountProfile::new("efua@dynasty.com", "Efua", "Sarpong", None, None).unwrap();
        let admin = Admin::new(AdminId::new(), profile, "hash".into());
        admins.save(&admin).await.unwrap();
        Fixture {
            principal: Principal::new(admin.id().to_string(), Role::Admin),
            admins,
            storage: Arc::new(InMemoryBlobStorage::new()),
            admin,
        }
    }

    #[tokio::test]
    async fn replacing_avatar_removes_previous_blob() {
        let f = fixture().await;
        let update = UpdateAdminAvatarHandler::new(f.admins.clone(), f.storage.clone());
        let cmd = || UpdateAdminAvatarCommand {
            admin_id: f.admin.id(),
            image: png(),
        };

        let first = update.handle(cmd(), Some(&f.principal)).await.unwrap();
        let second = update.handle(cmd(), Some(&f.principal)).await.unwrap();

        assert_eq!(f.storage.len().await, 1);
        let first_id = asset_public_id(&first.profile().avatar).unwrap();
        let second_id = asset_public_id(&second.profile().avatar).unwrap();
        assert!(!f.storage.contains(ADMIN_AVATAR_FOLDER, &first_id).await);
        assert!(f.storage.contains(ADMIN_AVATAR_FOLDER, &second_id).await);
    }

    #[tokio::test]
    async fn deleting_avatar_restores_default() {
        let f = fixture().await;
        UpdateAdminAvatarHandler::new(f.admins.clone(), f.storage.clone())
            .handle(
                UpdateAdminAvatarCommand {
                    admin_id: f.admin.id(),
                    image: png(),
                },
                Some(&f.principal),
            )
            .await
            .unwrap();

        let admin = DeleteAdminAvatarHandler::new(f.admins.clone(), f.storage.clone())
            .handle(
                DeleteAdminAvatarCommand {
                    admin_id: f.admin.id(),
                },
                Some(&f.principal),
            )
            .await
            .unwrap();

        assert!(admin.profile().has_default_avatar());
        assert!(f.storage.is_empty().await);
    }

    #[tokio::test]
    async fn rejects_non_image_upload() {
        let f = fixture().await;
        let err = UpdateAdminAvatarHandler::new(f.admins.clone(), f.storage.clone())
            .handle(
                UpdateAdminAvatarCommand {
                    admin_id: f.admin.id(),
                    image: ImageUpload::new(b"%PDF".to_vec(), "application/pdf"),
                },
                Some(&f.principal),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }
}
