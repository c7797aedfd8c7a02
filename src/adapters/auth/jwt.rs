//! HS256 access tokens.
//!
//! [`JwtTokenService`] implements both [`TokenIssuer`] and
//! [`SessionValidator`]: login and registration sign a token for the
//! account's [`Principal`], and the HTTP middleware validates it on later
//! requests.
//!
//! # Claims
//!
//! | claim  | content                          |
//! |--------|----------------------------------|
//! | `sub`  | account id                       |
//! | `role` | `ADMIN` or `USER`                |
//! | `iss`  | configured issuer                |
//! | `iat`  | issue time (unix seconds)        |
//! | `exp`  | expiry (unix seconds)            |
//!
//! A token whose `role` is absent or unknown still validates; the principal
//! simply gets the unrecognized role and the gate treats it as read-only.

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, Principal, Timestamp};
use crate::ports::{IssuedToken, SessionValidator, TokenIssuer};

/// Settings for [`JwtTokenService`].
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: SecretString,
    pub issuer: String,
    /// Token lifetime in seconds.
    pub ttl_secs: i64,
}

impl JwtConfig {
    pub fn new(secret: SecretString, issuer: impl Into<String>, ttl_secs: i64) -> Self {
        Self {
            secret,
            issuer: issuer.into(),
            ttl_secs,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    iss: String,
    iat: i64,
    exp: i64,
}

pub struct JwtTokenService {
    issuer: String,
    ttl_secs: i64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let secret = config.secret.expose_secret().as_bytes();
        Self {
            issuer: config.issuer,
            ttl_secs: config.ttl_secs,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = 0;
        validation
    }
}

impl std::fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("issuer", &self.issuer)
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer for JwtTokenService {
    fn issue(&self, principal: &Principal) -> Result<IssuedToken, AuthError> {
        let issued_at = Timestamp::now();
        let expires_at = issued_at.add_seconds(self.ttl_secs);
        let claims = Claims {
            sub: principal.id.clone(),
            role: Some(principal.role.as_str().to_string()),
            iss: self.issuer.clone(),
            iat: issued_at.unix_seconds(),
            exp: expires_at.unix_seconds(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to sign access token");
                AuthError::IssuanceFailed(e.to_string())
            })?;

        Ok(IssuedToken { token, expires_at })
    }
}

#[async_trait]
impl SessionValidator for JwtTokenService {
    async fn validate(&self, token: &str) -> Result<Principal, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation()).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer => {
                    tracing::warn!("Invalid issuer in token");
                    AuthError::InvalidToken
                }
                ErrorKind::InvalidSignature => {
                    tracing::warn!("Invalid token signature");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::debug!(error = %e, "Token rejected");
                    AuthError::InvalidToken
                }
            }
        })?;

        Principal::from_claims(&data.claims.sub, data.claims.role.as_deref())
            .ok_or(AuthError::InvalidToken)
    }
}
