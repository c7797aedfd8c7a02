//! Customer registration, password login and social sign-in.

use std::sync::Arc;

use crate::domain::account::{validate_password, AccountError, AccountProfile, Customer};
use crate::domain::foundation::CustomerId;
use crate::ports::{CustomerRepository, IssuedToken, PasswordHasher, TokenIssuer};

#[derive(Debug, Clone)]
pub struct RegisterCustomerCommand {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub user_name: Option<String>,
    pub phone: Option<String>,
}

/// A customer together with a freshly issued access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedCustomer {
    pub customer: Customer,
    pub token: IssuedToken,
}

pub struct RegisterCustomerHandler {
    customers: Arc<dyn CustomerRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl RegisterCustomerHandler {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            customers,
            hasher,
            tokens,
        }
    }

    pub async fn handle(
        &self,
        cmd: RegisterCustomerCommand,
    ) -> Result<AuthenticatedCustomer, AccountError> {
        validate_password(&cmd.password)?;
        let profile = AccountProfile::new(
            cmd.email,
            cmd.first_name,
            cmd.last_name,
            cmd.user_name,
            cmd.phone,
        )?;

        if self.customers.find_by_email(&profile.email).await?.is_some() {
            return Err(AccountError::EmailTaken(profile.email));
        }

        let password_hash = self.hasher.hash(&cmd.password)?;
        let customer = Customer::new(CustomerId::new(), profile, password_hash);
        self.customers.save(&customer).await?;

        let token = issue(self.tokens.as_ref(), &customer)?;
        tracing::info!(customer_id = %customer.id(), "Customer registered");
        Ok(AuthenticatedCustomer { customer, token })
    }
}

#[derive(Debug, Clone)]
pub struct LoginCustomerCommand {
    pub email: String,
    pub password: String,
}

pub struct LoginCustomerHandler {
    customers: Arc<dyn CustomerRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl LoginCustomerHandler {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            customers,
            hasher,
            tokens,
        }
    }

    /// Social-only customers have no password and always fail here.
    pub async fn handle(
        &self,
        cmd: LoginCustomerCommand,
    ) -> Result<AuthenticatedCustomer, AccountError> {
        let email = cmd.email.trim().to_lowercase();
        let customer = self
            .customers
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AccountError::CustomerNotFound(email.clone()))?;

        let Some(hash) = customer.password_hash() else {
            return Err(AccountError::InvalidCredentials);
        };
        if !self.hasher.verify(&cmd.password, hash)? {
            tracing::warn!(customer_id = %customer.id(), "Customer login with wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        let token = issue(self.tokens.as_ref(), &customer)?;
        Ok(AuthenticatedCustomer { customer, token })
    }
}

/// Identity asserted by an external sign-in provider.
#[derive(Debug, Clone)]
pub struct SocialLoginCommand {
    pub social_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
}

pub struct SocialLoginHandler {
    customers: Arc<dyn CustomerRepository>,
    tokens: Arc<dyn TokenIssuer>,
}

impl SocialLoginHandler {
    pub fn new(customers: Arc<dyn CustomerRepository>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { customers, tokens }
    }

    /// Signs in the customer linked to `social_id`, creating a password-less
    /// customer on first sign-in.
    pub async fn handle(&self, cmd: SocialLoginCommand) -> Result<AuthenticatedCustomer, AccountError> {
        let social_id = cmd.social_id.trim().to_string();
        if social_id.is_empty() {
            return Err(AccountError::validation("social_id", "must not be empty"));
        }

        let customer = match self.customers.find_by_social_id(&social_id).await? {
            Some(existing) => existing,
            None => {
                let profile =
                    AccountProfile::new(cmd.email, cmd.first_name, cmd.last_name, None, None)?;
                if self.customers.find_by_email(&profile.email).await?.is_some() {
                    return Err(AccountError::EmailTaken(profile.email));
                }
                let mut customer = Customer::from_social(CustomerId::new(), social_id, profile);
                if let Some(avatar) = cmd.avatar.filter(|a| !a.trim().is_empty()) {
                    customer.set_avatar(avatar);
                }
                self.customers.save(&customer).await?;
                tracing::info!(customer_id = %customer.id(), "Customer created from social sign-in");
                customer
            }
        };

        let token = issue(self.tokens.as_ref(), &customer)?;
        Ok(AuthenticatedCustomer { customer, token })
    }
}

fn issue(tokens: &dyn TokenIssuer, customer: &Customer) -> Result<IssuedToken, AccountError> {
    tokens
        .issue(&customer.principal())
        .map_err(|e| AccountError::infrastructure(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockTokenService;
    use crate::adapters::memory::InMemoryCustomerRepository;
    use crate::application::handlers::test_support::PlainHasher;
    use crate::domain::foundation::{ErrorCode, Role};
    use crate::ports::SessionValidator;

    struct Fixture {
        customers: Arc<InMemoryCustomerRepository>,
        tokens: Arc<MockTokenService>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                customers: Arc::new(InMemoryCustomerRepository::new()),
                tokens: Arc::new(MockTokenService::new()),
            }
        }

        fn register(&self) -> RegisterCustomerHandler {
            RegisterCustomerHandler::new(self.customers.clone(), Arc::new(PlainHasher), self.tokens.clone())
        }

        fn login(&self) -> LoginCustomerHandler {
            LoginCustomerHandler::new(self.customers.clone(), Arc::new(PlainHasher), self.tokens.clone())
        }

        fn social(&self) -> SocialLoginHandler {
            SocialLoginHandler::new(self.customers.clone(), self.tokens.clone())
        }
    }

    fn register_cmd() -> RegisterCustomerCommand {
        RegisterCustomerCommand {
            email: "adwoa@mail.com".into(),
            password: "password-1".into(),
            first_name: "Adwoa".into(),
            last_name: "Darko".into(),
            user_name: Some("adwoa_d".into()),
            phone: Some("+233200000000".into()),
        }
    }

    fn social_cmd(social_id: &str, email: &str) -> SocialLoginCommand {
        SocialLoginCommand {
            social_id: social_id.into(),
            email: email.into(),
            first_name: "Yaw".into(),
            last_name: "Ofori".into(),
            avatar: Some("https://lh3.example.com/photo.jpg".into()),
        }
    }

    #[tokio::test]
    async fn registration_issues_user_token() {
        let f = Fixture::new();
        let result = f.register().handle(register_cmd()).await.unwrap();

        assert_eq!(result.customer.profile().user_name, "adwoa_d");
        let principal = f.tokens.validate(&result.token.token).await.unwrap();
        assert_eq!(principal.role, Role::User);
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let f = Fixture::new();
        f.register().handle(register_cmd()).await.unwrap();
        let err = f.register().handle(register_cmd()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmailTaken);
    }

    #[tokio::test]
    async fn login_round_trip() {
        let f = Fixture::new();
        f.register().handle(register_cmd()).await.unwrap();

        let ok = f
            .login()
            .handle(LoginCustomerCommand {
                email: "adwoa@mail.com".into(),
                password: "password-1".into(),
            })
            .await
            .unwrap();
        assert_eq!(ok.customer.email(), "adwoa@mail.com");

        let bad = f
            .login()
            .handle(LoginCustomerCommand {
                email: "adwoa@mail.com".into(),
                password: "password-2".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(bad, AccountError::InvalidCredentials);
    }

    #[tokio::test]
    async fn social_sign_in_creates_once_then_reuses() {
        let f = Fixture::new();
        let first = f.social().handle(social_cmd("g-123", "yaw@mail.com")).await.unwrap();
        let second = f.social().handle(social_cmd("g-123", "yaw@mail.com")).await.unwrap();

        assert_eq!(first.customer.id(), second.customer.id());
        assert_eq!(first.customer.social_id(), Some("g-123"));
        assert_eq!(first.customer.profile().avatar, "https://lh3.example.com/photo.jpg");
        assert_eq!(f.customers.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn social_customer_cannot_use_password_login() {
        let f = Fixture::new();
        f.social().handle(social_cmd("g-9", "yaw@mail.com")).await.unwrap();

        let err = f
            .login()
            .handle(LoginCustomerCommand {
                email: "yaw@mail.com".into(),
                password: "anything-1".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, AccountError::InvalidCredentials);
    }

    #[tokio::test]
    async fn blank_social_id_is_rejected() {
        let f = Fixture::new();
        let err = f.social().handle(social_cmd("  ", "yaw@mail.com")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }
}
