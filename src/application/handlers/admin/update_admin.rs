//! Admin profile and password changes.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::application::operations::{RESET_ADMIN_PASSWORD, UPDATE_ADMIN};
use crate::domain::account::{validate_password, AccountError, Admin, ProfileChanges};
use crate::domain::authorization::{SubjectRef, SubjectType};
use crate::domain::foundation::{AdminId, Principal};
use crate::ports::{AdminRepository, PasswordHasher};

/// Partial profile update, optionally with a new password.
#[derive(Debug, Clone)]
pub struct UpdateAdminCommand {
    pub admin_id: AdminId,
    pub changes: ProfileChanges,
    pub password: Option<String>,
}

pub struct UpdateAdminHandler {
    admins: Arc<dyn AdminRepository>,
    hasher: Arc<dyn PasswordHasher>,
    gate: AuthorizationGate,
}

impl UpdateAdminHandler {
    pub fn new(admins: Arc<dyn AdminRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            admins,
            hasher,
            gate: AuthorizationGate::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateAdminCommand,
        principal: Option<&Principal>,
    ) -> Result<Admin, AccountError> {
        let target = SubjectRef::instance(SubjectType::Admin, cmd.admin_id);
        self.gate.authorize(principal, &UPDATE_ADMIN, Some(&target))?;

        let mut admin = self
            .admins
            .find_by_id(&cmd.admin_id)
            .await?
            .ok_or_else(|| AccountError::AdminNotFound(cmd.admin_id.to_string()))?;

        if let Some(password) = &cmd.password {
            validate_password(password)?;
        }
        admin.update_profile(cmd.changes)?;
        if let Some(password) = &cmd.password {
            admin.change_password_hash(self.hasher.hash(password)?);
        }

        self.admins.update(&admin).await?;
        Ok(admin)
    }
}

#[derive(Debug, Clone)]
pub struct ResetAdminPasswordCommand {
    pub admin_id: AdminId,
    pub password: String,
}

pub struct ResetAdminPasswordHandler {
    admins: Arc<dyn AdminRepository>,
    hasher: Arc<dyn PasswordHasher>,
    gate: AuthorizationGate,
}

impl ResetAdminPasswordHandler {
    pub fn new(admins: Arc<dyn AdminRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            admins,
            hasher,
            gate: AuthorizationGate::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: ResetAdminPasswordCommand,
        principal: Option<&Principal>,
    ) -> Result<(), AccountError> {
        let target = SubjectRef::instance(SubjectType::Admin, cmd.admin_id);
        self.gate
            .authorize(principal, &RESET_ADMIN_PASSWORD, Some(&target))?;
        validate_password(&cmd.password)?;

        let mut admin = self
            .admins
            .find_by_id(&cmd.admin_id)
            .await?
            .ok_or_else(|| AccountError::AdminNotFound(cmd.admin_id.to_string()))?;
        admin.change_password_hash(self.hasher.hash(&cmd.password)?);
        self.admins.update(&admin).await?;

        tracing::info!(admin_id = %admin.id(), "Admin password reset");
        Ok(())
    }
}
