//! Authentication middleware and extractor for axum.
//!
//! - `auth_middleware` - resolves the access token to a `Principal` and
//!   injects it into request extensions
//! - `OptionalAuth` - hands the principal (if any) to a route handler
//!
//! The token is read from the `Authorization: Bearer <token>` header, falling
//! back to the `access_token` cookie set at login. Requests without a token
//! continue anonymously; the authorization gate rejects them where a
//! principal is required.
//!
//! ```text
//! Request → auth_middleware → injects Principal into extensions
//!                                      ↓
//!                              Handler → OptionalAuth extractor reads from extensions
//! ```

use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::error::ApiError;
use crate::domain::foundation::Principal;
use crate::ports::SessionValidator;

/// Name of the cookie carrying the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Validates the request's access token, if it carries one.
///
/// A present but invalid or expired token is answered with 401 right away
/// rather than silently downgrading the request to anonymous.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = access_token(request.headers()) else {
        return next.run(request).await;
    };

    match validator.validate(&token).await {
        Ok(principal) => {
            tracing::debug!(principal = %principal.id, role = %principal.role, "Authenticated request");
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Extracts the access token from the Bearer header or the session cookie.
pub fn access_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == ACCESS_TOKEN_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// The request's principal, `None` for anonymous requests.
///
/// ```ignore
/// async fn my_handler(OptionalAuth(principal): OptionalAuth) -> impl IntoResponse {
///     handler.handle(cmd, principal.as_ref()).await
/// }
/// ```
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<Principal>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<Principal>().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockTokenService;
    use crate::domain::foundation::{AuthError, Role};
    use axum::body::Body;
    use axum::http::{HeaderValue, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn headers(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(name, HeaderValue::from_str(value).unwrap());
        map
    }

    #[test]
    fn bearer_header_wins_over_cookie() {
        let mut map = headers(header::AUTHORIZATION, "Bearer from-header");
        map.insert(header::COOKIE, HeaderValue::from_static("access_token=from-cookie"));
        assert_eq!(access_token(&map).as_deref(), Some("from-header"));
    }

    #[test]
    fn cookie_is_found_among_others() {
        let map = headers(header::COOKIE, "theme=dark; access_token=abc123; lang=en");
        assert_eq!(access_token(&map).as_deref(), Some("abc123"));
    }

    #[test]
    fn other_schemes_and_empty_values_are_ignored() {
        assert_eq!(access_token(&headers(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")), None);
        assert_eq!(access_token(&headers(header::COOKIE, "access_token=")), None);
        assert_eq!(access_token(&HeaderMap::new()), None);
    }

    async fn whoami(OptionalAuth(principal): OptionalAuth) -> String {
        principal.map(|p| p.id).unwrap_or_else(|| "anonymous".into())
    }

    fn app(validator: MockTokenService) -> Router {
        let state: AuthState = Arc::new(validator);
        Router::new()
            .route("/whoami", get(whoami))
            .layer(axum::middleware::from_fn_with_state(state, auth_middleware))
    }

    async fn call(app: Router, request: axum::http::Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn valid_token_injects_principal() {
        let tokens = MockTokenService::new().with_principal("t1", Principal::new("c42", Role::User));
        let request = axum::http::Request::get("/whoami")
            .header(header::AUTHORIZATION, "Bearer t1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(call(app(tokens), request).await, (StatusCode::OK, "c42".into()));
    }

    #[tokio::test]
    async fn missing_token_continues_anonymously() {
        let request = axum::http::Request::get("/whoami").body(Body::empty()).unwrap();
        assert_eq!(
            call(app(MockTokenService::new()), request).await,
            (StatusCode::OK, "anonymous".into())
        );
    }

    #[tokio::test]
    async fn bad_token_is_rejected() {
        let tokens = MockTokenService::new().with_error(AuthError::TokenExpired);
        let request = axum::http::Request::get("/whoami")
            .header(header::COOKIE, "access_token=stale")
            .body(Body::empty())
            .unwrap();
        let (status, _) = call(app(tokens), request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn auth_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthState>();
        assert_send_sync::<OptionalAuth>();
    }
}
