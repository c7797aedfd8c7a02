//! Administrator account entity.

use crate::domain::authorization::{Subject, SubjectType};
use crate::domain::foundation::{AdminId, Principal, Role, Timestamp, ValidationError};

use super::profile::{AccountProfile, ProfileChanges, DEFAULT_AVATAR_URL};

/// Back-office account with the `ADMIN` role.
///
/// # Invariants
///
/// - `email` is lowercase and unique across admins (enforced by the repository)
/// - `password_hash` is never exposed outside the service boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    id: AdminId,
    profile: AccountProfile,
    password_hash: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Admin {
    pub fn new(id: AdminId, profile: AccountProfile, password_hash: String) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            profile,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute an admin from persistence (no validation).
    pub fn reconstitute(
        id: AdminId,
        profile: AccountProfile,
        password_hash: String,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            profile,
            password_hash,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> AdminId {
        self.id
    }

    pub fn profile(&self) -> &AccountProfile {
        &self.profile
    }

    pub fn email(&self) -> &str {
        &self.profile.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn role(&self) -> Role {
        Role::Admin
    }

    /// The principal this account authenticates as.
    pub fn principal(&self) -> Principal {
        Principal::new(self.id.to_string(), Role::Admin)
    }

    pub fn update_profile(&mut self, changes: ProfileChanges) -> Result<(), ValidationError> {
        self.profile.apply(changes)?;
        self.touch();
        Ok(())
    }

    pub fn change_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.touch();
    }

    pub fn set_avatar(&mut self, url: String) {
        self.profile.avatar = url;
        self.touch();
    }

    pub fn reset_avatar(&mut self) {
        self.set_avatar(DEFAULT_AVATAR_URL.to_string());
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

impl Subject for Admin {
    const SUBJECT_TYPE: SubjectType = SubjectType::Admin;

    fn subject_id(&self) -> String {
        self.id.to_string()
    }
}
