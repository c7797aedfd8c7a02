//! HTTP adapter for admin and customer accounts.
//!
//! - `/admins` - registration, login, profile, avatar and account management
//! - `/customers` - the same for customers, plus social login and carts

pub mod admin_handlers;
pub mod customer_handlers;
pub mod dto;
pub mod routes;

pub use routes::{admin_routes, customer_routes};

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::state::{AppState, SessionCookie};
use crate::ports::IssuedToken;

/// JSON response that also sets the session cookie.
fn signed_in<T: serde::Serialize>(
    cookie: &SessionCookie,
    status: StatusCode,
    token: &IssuedToken,
    body: T,
) -> Response {
    let mut response = (status, Json(body)).into_response();
    if let Some(value) = cookie.issue(token) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

/// Clears the session cookie. Tokens are stateless, so nothing is revoked.
pub async fn logout(State(state): State<AppState>) -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    if let Some(value) = state.cookie.clear() {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}
