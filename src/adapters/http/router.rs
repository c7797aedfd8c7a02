//! Top-level router: resource routes, authentication and cross-cutting layers.

use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde::Serialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::storage::MAX_BLOB_BYTES;
use crate::config::{ServerConfig, StorageBackend, StorageConfig};

use super::account::{admin_routes, customer_routes};
use super::employee::{attendance_routes, employee_routes};
use super::middleware::auth_middleware;
use super::product::product_routes;
use super::sale::sale_routes;
use super::state::AppState;

/// Room for multipart boundaries and headers around the largest image.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Resource routes with the authentication middleware applied.
pub fn api_routes(state: AppState) -> Router {
    let body_limit = MAX_BLOB_BYTES as usize + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health))
        .nest("/admins", admin_routes())
        .nest("/customers", customer_routes())
        .nest("/products", product_routes())
        .nest("/employees", employee_routes())
        .nest("/attendance", attendance_routes())
        .nest("/sales", sale_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn_with_state(
            state.sessions.clone(),
            auth_middleware,
        ))
        .with_state(state)
}

/// Creates the application router.
///
/// Layers are applied in reverse order (last added = outermost):
/// 1. Timeout (outermost)
/// 2. CORS
/// 3. `x-request-id` assignment
/// 4. Tracing spans, with the request id propagated to the response
/// 5. gzip compression
/// 6. Routes under `server.api_prefix()`, plus `/media` for the local blob store
pub fn create_router(state: AppState, server: &ServerConfig, storage: &StorageConfig) -> Router {
    let mut router = Router::new().nest(&server.api_prefix(), api_routes(state));

    if storage.backend == StorageBackend::Local && !storage.serve_path.is_empty() {
        router = router.nest_service(&storage.serve_path, ServeDir::new(&storage.base_path));
    }

    router
        .layer(CompressionLayer::new())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors_layer(server))
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_secs,
        )))
}

/// Any origin when none are configured; otherwise the listed origins with
/// credentials, so the session cookie travels cross-site.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
