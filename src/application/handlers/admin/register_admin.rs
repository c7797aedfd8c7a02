//! Admin registration and password login.
//!
//! Registration is open to anonymous callers only while no admin exists;
//! after that it goes through the gate like any other command.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::application::operations::REGISTER_ADMIN;
use crate::domain::account::{validate_password, AccountError, AccountProfile, Admin};
use crate::domain::foundation::{AdminId, Principal};
use crate::ports::{AdminRepository, IssuedToken, PasswordHasher, TokenIssuer};

/// Command to register a new admin.
#[derive(Debug, Clone)]
pub struct RegisterAdminCommand {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub user_name: Option<String>,
    pub phone: Option<String>,
}

/// An admin together with a freshly issued access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin {
    pub admin: Admin,
    pub token: IssuedToken,
}

pub struct RegisterAdminHandler {
    admins: Arc<dyn AdminRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    gate: AuthorizationGate,
}

impl RegisterAdminHandler {
    pub fn new(
        admins: Arc<dyn AdminRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            admins,
            hasher,
            tokens,
            gate: AuthorizationGate::new(),
        }
    }

    /// # Errors
    ///
    /// - `Denied` when admins already exist and `principal` may not create one
    /// - `EmailTaken` when the email is registered
    pub async fn handle(
        &self,
        cmd: RegisterAdminCommand,
        principal: Option<&Principal>,
    ) -> Result<AuthenticatedAdmin, AccountError> {
        let bootstrap = principal.is_none() && !self.admins.has_any().await?;
        if !bootstrap {
            self.gate.authorize(principal, &REGISTER_ADMIN, None)?;
        }

        validate_password(&cmd.password)?;
        let profile = AccountProfile::new(
            cmd.email,
            cmd.first_name,
            cmd.last_name,
            cmd.user_name,
            cmd.phone,
        )?;

        if self.admins.find_by_email(&profile.email).await?.is_some() {
            return Err(AccountError::EmailTaken(profile.email));
        }

        let password_hash = self.hasher.hash(&cmd.password)?;
        let admin = Admin::new(AdminId::new(), profile, password_hash);
        self.admins.save(&admin).await?;

        let token = self
            .tokens
            .issue(&admin.principal())
            .map_err(|e| AccountError::infrastructure(e.to_string()))?;

        tracing::info!(admin_id = %admin.id(), bootstrap, "Admin registered");
        Ok(AuthenticatedAdmin { admin, token })
    }
}

#[derive(Debug, Clone)]
pub struct LoginAdminCommand {
    pub email: String,
    pub password: String,
}

pub struct LoginAdminHandler {
    admins: Arc<dyn AdminRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl LoginAdminHandler {
    pub fn new(
        admins: Arc<dyn AdminRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            admins,
            hasher,
            tokens,
        }
    }

    /// # Errors
    ///
    /// - `AdminNotFound` when no admin has the email
    /// - `InvalidCredentials` when the password does not match
    pub async fn handle(&self, cmd: LoginAdminCommand) -> Result<AuthenticatedAdmin, AccountError> {
        let email = cmd.email.trim().to_lowercase();
        let admin = self
            .admins
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AccountError::AdminNotFound(email.clone()))?;

        if !self.hasher.verify(&cmd.password, admin.password_hash())? {
            tracing::warn!(admin_id = %admin.id(), "Admin login with wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(&admin.principal())
            .map_err(|e| AccountError::infrastructure(e.to_string()))?;
        Ok(AuthenticatedAdmin { admin, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockTokenService;
    use crate::adapters::memory::InMemoryAdminRepository;
    use crate::application::handlers::test_support::{
        admin_principal, user_principal, PlainHasher,
    };
    use crate::domain::authorization::AuthorizationError;
    use crate::domain::foundation::{ErrorCode, Role};
    use crate::ports::SessionValidator;

    struct Fixture {
        admins: Arc<InMemoryAdminRepository>,
        tokens: Arc<MockTokenService>,
        register: RegisterAdminHandler,
        login: LoginAdminHandler,
    }

    fn fixture() -> Fixture {
        let admins = Arc::new(InMemoryAdminRepository::new());
        let tokens = Arc::new(MockTokenService::new());
        let hasher = Arc::new(PlainHasher);
        Fixture {
            register: RegisterAdminHandler::new(admins.clone(), hasher.clone(), tokens.clone()),
            login: LoginAdminHandler::new(admins.clone(), hasher, tokens.clone()),
            admins,
            tokens,
        }
    }

    fn register_cmd(email: &str) -> RegisterAdminCommand {
        RegisterAdminCommand {
            email: email.to_string(),
            password: "s3cret-pass".to_string(),
            first_name: "Ama".to_string(),
            last_name: "Mensah".to_string(),
            user_name: None,
            phone: None,
        }
    }

    #[tokio::test]
    async fn registers_admin_and_issues_admin_token() {
        let f = fixture();
        let result = f.register.handle(register_cmd("Ama@Dynasty.com"), None).await.unwrap();

        assert_eq!(result.admin.email(), "ama@dynasty.com");
        assert_eq!(result.admin.profile().user_name, "Ama Mensah");
        assert_ne!(result.admin.password_hash(), "s3cret-pass");

        let principal = f.tokens.validate(&result.token.token).await.unwrap();
        assert_eq!(principal.role, Role::Admin);
        assert_eq!(principal.id, result.admin.id().to_string());
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let f = fixture();
        f.register.handle(register_cmd("ama@dynasty.com"), None).await.unwrap();

        let err = f
            .register
            .handle(register_cmd("AMA@dynasty.com"), Some(&admin_principal()))
            .await
            .unwrap_err();
        assert_eq!(err, AccountError::EmailTaken("ama@dynasty.com".into()));
        assert_eq!(f.admins.count().await, 1);
    }

    #[tokio::test]
    async fn short_password_is_rejected_before_saving() {
        let f = fixture();
        let mut cmd = register_cmd("ama@dynasty.com");
        cmd.password = "short".into();

        let err = f.register.handle(cmd, None).await.unwrap_err();
        assert!(matches!(err, AccountError::ValidationFailed { ref field, .. } if field == "password"));
        assert_eq!(f.admins.count().await, 0);
    }

    #[tokio::test]
    async fn anonymous_registration_closes_after_first_admin() {
        let f = fixture();
        f.register.handle(register_cmd("first@dynasty.com"), None).await.unwrap();

        let err = f
            .register
            .handle(register_cmd("second@dynasty.com"), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AccountError::Denied(AuthorizationError::NotAuthenticated { .. })
        ));
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(f.admins.count().await, 1);
    }

    #[tokio::test]
    async fn users_cannot_create_admins() {
        let f = fixture();
        let user = user_principal("00000000-0000-0000-0000-000000000042");

        // Even before the first admin exists, a signed-in user is checked.
        let err = f
            .register
            .handle(register_cmd("sneaky@dynasty.com"), Some(&user))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(f.admins.count().await, 0);
    }

    #[tokio::test]
    async fn admins_can_create_further_admins() {
        let f = fixture();
        f.register.handle(register_cmd("first@dynasty.com"), None).await.unwrap();

        let second = f
            .register
            .handle(register_cmd("second@dynasty.com"), Some(&admin_principal()))
            .await
            .unwrap();
        assert_eq!(second.admin.email(), "second@dynasty.com");
        assert_eq!(f.admins.count().await, 2);
    }

    #[tokio::test]
    async fn login_checks_password() {
        let f = fixture();
        f.register.handle(register_cmd("ama@dynasty.com"), None).await.unwrap();

        let ok = f
            .login
            .handle(LoginAdminCommand {
                email: " AMA@dynasty.com ".into(),
                password: "s3cret-pass".into(),
            })
            .await;
        assert!(ok.is_ok());

        let wrong = f
            .login
            .handle(LoginAdminCommand {
                email: "ama@dynasty.com".into(),
                password: "guess-again".into(),
            })
            .await;
        assert_eq!(wrong.unwrap_err(), AccountError::InvalidCredentials);
    }

    #[tokio::test]
    async fn login_with_unknown_email_is_not_found() {
        let f = fixture();
        let err = f
            .login
            .handle(LoginAdminCommand {
                email: "nobody@dynasty.com".into(),
                password: "whatever1".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::AdminNotFound);
    }
}
