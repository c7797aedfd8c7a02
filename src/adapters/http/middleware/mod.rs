//! HTTP middleware for axum.
//!
//! - `auth` - access token resolution and the principal extractor

pub mod auth;

pub use auth::{access_token, auth_middleware, AuthState, OptionalAuth, ACCESS_TOKEN_COOKIE};
