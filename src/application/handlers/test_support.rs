//! Fixtures for handler tests.

use crate::domain::foundation::{DomainError, Principal, Role};
use crate::ports::PasswordHasher;

/// Reversible "hash" so tests stay fast.
#[derive(Debug, Default)]
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("plain${}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash == format!("plain${}", password))
    }
}

pub fn admin_principal() -> Principal {
    Principal::new("00000000-0000-0000-0000-0000000000ad", Role::Admin)
}

pub fn user_principal(id: impl ToString) -> Principal {
    Principal::new(id.to_string(), Role::User)
}

pub fn guest_principal() -> Principal {
    Principal::new("guest", Role::Unrecognized)
}

pub fn png() -> crate::application::handlers::ImageUpload {
    crate::application::handlers::ImageUpload::new(vec![0x89, b'P', b'N', b'G'], "image/png")
}
