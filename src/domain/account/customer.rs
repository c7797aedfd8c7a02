//! Customer account entity.

use crate::domain::authorization::{Subject, SubjectType};
use crate::domain::foundation::{CustomerId, Principal, Role, Timestamp, ValidationError};

use super::profile::{AccountProfile, ProfileChanges, DEFAULT_AVATAR_URL};

/// Shopper account with the `USER` role.
///
/// Customers created through social sign-in have a `social_id` and may have
/// no password at all; they cannot use password login until one is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: CustomerId,
    social_id: Option<String>,
    profile: AccountProfile,
    password_hash: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Customer {
    pub fn new(id: CustomerId, profile: AccountProfile, password_hash: String) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            social_id: None,
            profile,
            password_hash: Some(password_hash),
            created_at: now,
            updated_at: now,
        }
    }

    /// A password-less customer linked to a social identity.
    pub fn from_social(id: CustomerId, social_id: String, profile: AccountProfile) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            social_id: Some(social_id),
            profile,
            password_hash: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a customer from persistence (no validation).
    pub fn reconstitute(
        id: CustomerId,
        social_id: Option<String>,
        profile: AccountProfile,
        password_hash: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            social_id,
            profile,
            password_hash,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn social_id(&self) -> Option<&str> {
        self.social_id.as_deref()
    }

    pub fn profile(&self) -> &AccountProfile {
        &self.profile
    }

    pub fn email(&self) -> &str {
        &self.profile.email
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn role(&self) -> Role {
        Role::User
    }

    pub fn principal(&self) -> Principal {
        Principal::new(self.id.to_string(), Role::User)
    }

    pub fn update_profile(&mut self, changes: ProfileChanges) -> Result<(), ValidationError> {
        self.profile.apply(changes)?;
        self.touch();
        Ok(())
    }

    pub fn change_password_hash(&mut self, password_hash: String) {
        self.password_hash = Some(password_hash);
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

impl Subject for Customer {
    const SUBJECT_TYPE: SubjectType = SubjectType::Customer;

    fn subject_id(&self) -> String {
        self.id.to_string()
    }
}
