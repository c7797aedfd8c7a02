//! Admin account removal.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::application::handlers::support::discard_image;
use crate::application::operations::DELETE_ADMIN;
use crate::domain::account::AccountError;
use crate::domain::authorization::{SubjectRef, SubjectType};
use crate::domain::foundation::{AdminId, Principal};
use crate::ports::{AdminRepository, BlobStorage, ADMIN_AVATAR_FOLDER};

#[derive(Debug, Clone)]
pub struct DeleteAdminCommand {
    pub admin_id: AdminId,
}

pub struct DeleteAdminHandler {
    admins: Arc<dyn AdminRepository>,
    storage: Arc<dyn BlobStorage>,
    gate: AuthorizationGate,
}

impl DeleteAdminHandler {
    pub fn new(admins: Arc<dyn AdminRepository>, storage: Arc<dyn BlobStorage>) -> Self {
        Self {
            admins,
            storage,
            gate: AuthorizationGate::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: DeleteAdminCommand,
        principal: Option<&Principal>,
    ) -> Result<(), AccountError> {
        let target = SubjectRef::instance(SubjectType::Admin, cmd.admin_id);
        self.gate.authorize(principal, &DELETE_ADMIN, Some(&target))?;

        let admin = self
            .admins
            .find_by_id(&cmd.admin_id)
            .await?
            .ok_or_else(|| AccountError::AdminNotFound(cmd.admin_id.to_string()))?;

        self.admins.delete(&admin.id()).await?;
        discard_image(self.storage.as_ref(), ADMIN_AVATAR_FOLDER, &admin.profile().avatar).await?;

        tracing::info!(admin_id = %admin.id(), "Admin deleted");
        Ok(())
    }
}
