//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Shortest accepted HS256 signing secret in production.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

/// Authentication configuration (self-issued HS256 access tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Token signing secret
    pub jwt_secret: SecretString,

    /// Access token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,

    /// `iss` claim written to and required on every token
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Domain attribute of the `access_token` cookie; host-only when unset
    pub cookie_domain: Option<String>,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// Any non-empty secret is accepted outside production.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(ValidationError::JwtSecretTooShort {
                min: MIN_JWT_SECRET_BYTES,
            });
        }
        if !(60..=30 * 24 * 3600).contains(&self.token_ttl_secs) {
            return Err(ValidationError::InvalidTokenTtl);
        }
        if self.issuer.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ISSUER"));
        }
        Ok(())
    }
}

fn default_token_ttl() -> i64 {
    7 * 24 * 3600
}

fn default_issuer() -> String {
    "dynasty-urban-style".to_string()
}
