//! Admin read operations.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::application::handlers::support::parse_id;
use crate::application::operations::{GET_ADMIN, GET_ADMIN_PROFILE, LIST_ADMINS};
use crate::domain::account::{AccountError, Admin};
use crate::domain::authorization::{SubjectRef, SubjectType};
use crate::domain::foundation::{AdminId, Principal};
use crate::ports::AdminRepository;

pub struct ListAdminsHandler {
    admins: Arc<dyn AdminRepository>,
    gate: AuthorizationGate,
}

impl ListAdminsHandler {
    pub fn new(admins: Arc<dyn AdminRepository>) -> Self {
        Self {
            admins,
            gate: AuthorizationGate::new(),
        }
    }

    pub async fn handle(&self, principal: Option<&Principal>) -> Result<Vec<Admin>, AccountError> {
        self.gate.authorize(principal, &LIST_ADMINS, None)?;
        Ok(self.admins.list().await?)
    }
}

#[derive(Debug, Clone)]
pub struct GetAdminQuery {
    pub admin_id: AdminId,
}

pub struct GetAdminHandler {
    admins: Arc<dyn AdminRepository>,
    gate: AuthorizationGate,
}

impl GetAdminHandler {
    pub fn new(admins: Arc<dyn AdminRepository>) -> Self {
        Self {
            admins,
            gate: AuthorizationGate::new(),
        }
    }

    pub async fn handle(
        &self,
        query: GetAdminQuery,
        principal: Option<&Principal>,
    ) -> Result<Admin, AccountError> {
        let target = SubjectRef::instance(SubjectType::Admin, query.admin_id);
        self.gate.authorize(principal, &GET_ADMIN, Some(&target))?;

        self.admins
            .find_by_id(&query.admin_id)
            .await?
            .ok_or_else(|| AccountError::AdminNotFound(query.admin_id.to_string()))
    }
}

/// Returns the calling admin's own record.
pub struct GetAdminProfileHandler {
    admins: Arc<dyn AdminRepository>,
    gate: AuthorizationGate,
}

impl GetAdminProfileHandler {
    pub fn new(admins: Arc<dyn AdminRepository>) -> Self {
        Self {
            admins,
            gate: AuthorizationGate::new(),
        }
    }

    pub async fn handle(&self, principal: Option<&Principal>) -> Result<Admin, AccountError> {
        let target = principal.map(|p| SubjectRef::instance(SubjectType::Admin, &p.id));
        let ability = self
            .gate
            .authorize(principal, &GET_ADMIN_PROFILE, target.as_ref())?;

        let missing = || AccountError::AdminNotFound(ability.principal_id().to_string());
        let admin_id: AdminId = parse_id(ability.principal_id()).ok_or_else(missing)?;
        self.admins.find_by_id(&admin_id).await?.ok_or_else(missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAdminRepository;
    use crate::application::handlers::test_support::{admin_principal, user_principal};
    use crate::domain::account::AccountProfile;
    use crate::domain::foundation::{ErrorCode, Role};

    async fn seeded() -> (Arc<InMemoryAdminRepository>, Admin) {
        let repo = Arc::new(InMemoryAdminRepository::new());
        let profile = AccountProfile::new("kwame@dynasty.com", "Kwame", "Asante", None, None).unwrap();
        let admin = Admin::new(AdminId::new(), profile, "hash".into());
        repo.save(&admin).await.unwrap();
        (repo, admin)
    }

    #[tokio::test]
    async fn list_requires_authentication() {
        let (repo, _) = seeded().await;
        let handler = ListAdminsHandler::new(repo);

        let err = handler.handle(None).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(handler.handle(Some(&admin_principal())).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn get_unknown_admin_is_not_found() {
        let (repo, _) = seeded().await;
        let err = GetAdminHandler::new(repo)
            .handle(
                GetAdminQuery {
                    admin_id: AdminId::new(),
                },
                Some(&admin_principal()),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::AdminNotFound);
    }

    #[tokio::test]
    async fn profile_resolves_the_calling_admin() {
        let (repo, admin) = seeded().await;
        let principal = Principal::new(admin.id().to_string(), Role::Admin);

        let found = GetAdminProfileHandler::new(repo)
            .handle(Some(&principal))
            .await
            .unwrap();
        assert_eq!(found.id(), admin.id());
    }

    #[tokio::test]
    async fn customer_token_finds_no_admin_profile() {
        let (repo, _) = seeded().await;
        let err = GetAdminProfileHandler::new(repo)
            .handle(Some(&user_principal(AdminId::new())))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::AdminNotFound);
    }
}
