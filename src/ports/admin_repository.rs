//! Admin repository port.

use async_trait::async_trait;

use crate::domain::account::Admin;
use crate::domain::foundation::{AdminId, DomainError};

/// Repository port for administrator accounts.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Save a new admin.
    ///
    /// # Errors
    ///
    /// - `EmailTaken` if another admin uses the same email
    /// - `DatabaseError` on persistence failure
    async fn save(&self, admin: &Admin) -> Result<(), DomainError>;

    /// Update an existing admin.
    ///
    /// # Errors
    ///
    /// - `AdminNotFound` if the admin doesn't exist
    async fn update(&self, admin: &Admin) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &AdminId) -> Result<Option<Admin>, DomainError>;

    /// Lookup by (lowercase) email, used by login and registration.
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, DomainError>;

    /// All admins, newest first.
    async fn list(&self) -> Result<Vec<Admin>, DomainError>;

    /// Whether at least one admin account exists.
    async fn has_any(&self) -> Result<bool, DomainError>;

    /// # Errors
    ///
    /// - `AdminNotFound` if the admin doesn't exist
    async fn delete(&self, id: &AdminId) -> Result<(), DomainError>;
}
