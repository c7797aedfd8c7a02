//! Shared application state for the REST API.

use std::sync::Arc;

use axum::http::HeaderValue;
use sqlx::PgPool;

use crate::adapters::auth::AccountSessionValidator;
use crate::adapters::memory::{
    InMemoryAdminRepository, InMemoryAttendanceRepository, InMemoryCartRepository,
    InMemoryCustomerRepository, InMemoryEmployeeRepository, InMemoryProductRepository,
    InMemorySaleRepository,
};
use crate::adapters::postgres::{
    PostgresAdminRepository, PostgresAttendanceRepository, PostgresCartRepository,
    PostgresCustomerRepository, PostgresEmployeeRepository, PostgresProductRepository,
    PostgresSaleRepository,
};
use crate::adapters::security::Argon2PasswordHasher;
use crate::domain::foundation::Timestamp;
use crate::ports::{
    AdminRepository, AttendanceRepository, BlobStorage, CartRepository, CustomerRepository,
    EmployeeRepository, IssuedToken, PasswordHasher, ProductRepository, SaleRepository,
    SessionValidator, TokenIssuer,
};

use super::middleware::ACCESS_TOKEN_COOKIE;

/// Attributes of the access token cookie set at login.
#[derive(Debug, Clone, Default)]
pub struct SessionCookie {
    pub domain: Option<String>,
    /// Adds `Secure`; on in production.
    pub secure: bool,
}

impl SessionCookie {
    /// `Set-Cookie` value carrying `token` until it expires.
    pub fn issue(&self, token: &IssuedToken) -> Option<HeaderValue> {
        let max_age = token
            .expires_at
            .unix_seconds()
            .saturating_sub(Timestamp::now().unix_seconds())
            .max(0);
        self.render(&token.token, max_age)
    }

    /// `Set-Cookie` value that removes the cookie.
    pub fn clear(&self) -> Option<HeaderValue> {
        self.render("", 0)
    }

    fn render(&self, value: &str, max_age: i64) -> Option<HeaderValue> {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            ACCESS_TOKEN_COOKIE, value, max_age
        );
        if let Some(domain) = &self.domain {
            cookie.push_str("; Domain=");
            cookie.push_str(domain);
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie).ok()
    }
}

/// Every collaborator a route handler may need.
///
/// Cloned per request; all members are reference counted.
#[derive(Clone)]
pub struct AppState {
    pub admins: Arc<dyn AdminRepository>,
    pub customers: Arc<dyn CustomerRepository>,
    pub carts: Arc<dyn CartRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub employees: Arc<dyn EmployeeRepository>,
    pub attendance: Arc<dyn AttendanceRepository>,
    pub sales: Arc<dyn SaleRepository>,
    pub storage: Arc<dyn BlobStorage>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub sessions: Arc<dyn SessionValidator>,
    pub cookie: SessionCookie,
}

impl AppState {
    /// State backed by PostgreSQL repositories.
    pub fn postgres<T>(pool: PgPool, tokens: Arc<T>, storage: Arc<dyn BlobStorage>) -> Self
    where
        T: TokenIssuer + SessionValidator + 'static,
    {
        let admins: Arc<dyn AdminRepository> = Arc::new(PostgresAdminRepository::new(pool.clone()));
        let customers: Arc<dyn CustomerRepository> =
            Arc::new(PostgresCustomerRepository::new(pool.clone()));
        Self {
            sessions: account_sessions(tokens.clone(), &admins, &customers),
            admins,
            customers,
            carts: Arc::new(PostgresCartRepository::new(pool.clone())),
            products: Arc::new(PostgresProductRepository::new(pool.clone())),
            employees: Arc::new(PostgresEmployeeRepository::new(pool.clone())),
            attendance: Arc::new(PostgresAttendanceRepository::new(pool.clone())),
            sales: Arc::new(PostgresSaleRepository::new(pool)),
            storage,
            hasher: Arc::new(Argon2PasswordHasher::new()),
            tokens,
            cookie: SessionCookie::default(),
        }
    }

    /// State backed by in-memory repositories.
    pub fn in_memory<T>(tokens: Arc<T>, storage: Arc<dyn BlobStorage>) -> Self
    where
        T: TokenIssuer + SessionValidator + 'static,
    {
        let carts = InMemoryCartRepository::new();
        let admins: Arc<dyn AdminRepository> = Arc::new(InMemoryAdminRepository::new());
        let customers: Arc<dyn CustomerRepository> =
            Arc::new(InMemoryCustomerRepository::with_carts(carts.clone()));
        Self {
            sessions: account_sessions(tokens.clone(), &admins, &customers),
            admins,
            customers,
            carts: Arc::new(carts),
            products: Arc::new(InMemoryProductRepository::new()),
            employees: Arc::new(InMemoryEmployeeRepository::new()),
            attendance: Arc::new(InMemoryAttendanceRepository::new()),
            sales: Arc::new(InMemorySaleRepository::new()),
            storage,
            hasher: Arc::new(Argon2PasswordHasher::new()),
            tokens,
            cookie: SessionCookie::default(),
        }
    }

    pub fn with_cookie(mut self, cookie: SessionCookie) -> Self {
        self.cookie = cookie;
        self
    }
}

/// Token validation followed by a lookup of the account it names.
fn account_sessions<T>(
    tokens: Arc<T>,
    admins: &Arc<dyn AdminRepository>,
    customers: &Arc<dyn CustomerRepository>,
) -> Arc<dyn SessionValidator>
where
    T: SessionValidator + 'static,
{
    Arc::new(AccountSessionValidator::new(
        tokens,
        admins.clone(),
        customers.clone(),
    ))
}
