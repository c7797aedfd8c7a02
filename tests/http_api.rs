//! End-to-end tests for the REST API over in-memory adapters.
//!
//! Requests go through the full router (auth middleware, gate, handlers,
//! repositories) with `MockTokenService` standing in for JWT signing.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use dynasty_urban_style::adapters::auth::MockTokenService;
use dynasty_urban_style::adapters::http::{create_router, AppState};
use dynasty_urban_style::adapters::storage::InMemoryBlobStorage;
use dynasty_urban_style::config::{ServerConfig, StorageBackend, StorageConfig};
use dynasty_urban_style::domain::foundation::AuthError;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app_with(tokens: MockTokenService) -> Router {
    let state = AppState::in_memory(Arc::new(tokens), Arc::new(InMemoryBlobStorage::new()));
    let storage = StorageConfig {
        backend: StorageBackend::Memory,
        ..StorageConfig::default()
    };
    create_router(state, &ServerConfig::default(), &storage)
}

fn app() -> Router {
    app_with(MockTokenService::new())
}

struct Reply {
    status: StatusCode,
    cookie: Option<String>,
    body: Value,
}

async fn send(
    app: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Reply {
    let mut request = Request::builder()
        .method(method)
        .uri(format!("/api/v1{}", path));
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    Reply {
        status,
        cookie,
        body,
    }
}

fn registration(email: &str) -> Value {
    json!({
        "email": email,
        "password": "correct-horse",
        "first_name": "Ada",
        "last_name": "Okafor",
    })
}

/// Registers an account and returns `(id, token)`.
async fn register(app: &Router, kind: &str, email: &str) -> (String, String) {
    let reply = send(
        app,
        Method::POST,
        &format!("/{}/register", kind),
        None,
        Some(registration(email)),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    (
        reply.body["account"]["id"].as_str().unwrap().to_string(),
        reply.body["access_token"].as_str().unwrap().to_string(),
    )
}

async fn create_product(app: &Router, admin: &str, name: &str) -> String {
    let reply = send(
        app,
        Method::POST,
        "/products",
        Some(admin),
        Some(json!({
            "name": name,
            "description": "Heavyweight cotton",
            "price": 49.5,
            "currency": "usd",
            "depo": "Main",
            "category": "Hoodies",
            "num_in_stock": 12,
            "sizes": ["M", "L"],
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    reply.body["id"].as_str().unwrap().to_string()
}

async fn create_employee(app: &Router, admin: &str, email: &str) -> String {
    let reply = send(
        app,
        Method::POST,
        "/employees",
        Some(admin),
        Some(json!({
            "email": email,
            "first_name": "Tunde",
            "last_name": "Bello",
            "designation": "Cashier",
            "phone_number": "+2348000000000",
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    reply.body["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn registration_issues_a_session_cookie() {
    let app = app();
    let reply = send(
        &app,
        Method::POST,
        "/customers/register",
        None,
        Some(registration("ada@example.com")),
    )
    .await;

    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["account"]["role"], "USER");
    assert!(reply.body["account"].get("password_hash").is_none());
    assert!(reply.cookie.unwrap().starts_with("access_token="));
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = app();
    let (_, admin) = register(&app, "admins", "boss@example.com").await;

    let reply = send(
        &app,
        Method::POST,
        "/admins/register",
        Some(&admin),
        Some(registration("boss@example.com")),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
    assert_eq!(reply.body["code"], "EMAIL_TAKEN");
}

#[tokio::test]
async fn admin_registration_closes_after_the_first_admin() {
    let app = app();
    register(&app, "admins", "boss@example.com").await;

    let reply = send(
        &app,
        Method::POST,
        "/admins/register",
        None,
        Some(registration("intruder@example.com")),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn customers_cannot_register_admins() {
    let app = app();
    register(&app, "admins", "boss@example.com").await;
    let (_, customer) = register(&app, "customers", "ada@example.com").await;

    let reply = send(
        &app,
        Method::POST,
        "/admins/register",
        Some(&customer),
        Some(registration("ada-admin@example.com")),
    )
    .await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
    assert_eq!(reply.body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn admins_create_further_admins_without_switching_session() {
    let app = app();
    let (_, admin) = register(&app, "admins", "boss@example.com").await;

    let reply = send(
        &app,
        Method::POST,
        "/admins/register",
        Some(&admin),
        Some(registration("deputy@example.com")),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    assert_eq!(reply.body["role"], "ADMIN");
    assert!(reply.body.get("access_token").is_none());
    assert!(reply.cookie.is_none());

    let login = send(
        &app,
        Method::POST,
        "/admins/login",
        None,
        Some(json!({"email": "deputy@example.com", "password": "correct-horse"})),
    )
    .await;
    assert_eq!(login.status, StatusCode::OK);
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let app = app();
    register(&app, "customers", "ada@example.com").await;

    let ok = send(
        &app,
        Method::POST,
        "/customers/login",
        None,
        Some(json!({"email": "ada@example.com", "password": "correct-horse"})),
    )
    .await;
    assert_eq!(ok.status, StatusCode::OK);

    let bad = send(
        &app,
        Method::POST,
        "/customers/login",
        None,
        Some(json!({"email": "ada@example.com", "password": "battery-staple"})),
    )
    .await;
    assert_eq!(bad.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_cookie_authenticates_requests() {
    let app = app();
    let reply = send(
        &app,
        Method::POST,
        "/customers/register",
        None,
        Some(registration("ada@example.com")),
    )
    .await;
    let cookie = reply.cookie.unwrap();
    let pair = cookie.split(';').next().unwrap().to_string();

    let request = Request::get("/api/v1/customers/profile")
        .header(header::COOKIE, pair)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let reply = send(&app(), Method::POST, "/admins/logout", None, None).await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);
    assert!(reply.cookie.unwrap().contains("Max-Age=0"));
}

#[tokio::test]
async fn customers_only_manage_their_own_account() {
    let app = app();
    let (ada, ada_token) = register(&app, "customers", "ada@example.com").await;
    let (bola, _) = register(&app, "customers", "bola@example.com").await;

    let own = send(
        &app,
        Method::PATCH,
        &format!("/customers/{}", ada),
        Some(&ada_token),
        Some(json!({"phone": "+2348011111111"})),
    )
    .await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.body["phone"], "+2348011111111");

    let other = send(
        &app,
        Method::DELETE,
        &format!("/customers/{}", bola),
        Some(&ada_token),
        None,
    )
    .await;
    assert_eq!(other.status, StatusCode::FORBIDDEN);
    assert_eq!(other.body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn admins_manage_any_customer() {
    let app = app();
    let (_, admin) = register(&app, "admins", "boss@example.com").await;
    let (ada, _) = register(&app, "customers", "ada@example.com").await;

    let deleted = send(
        &app,
        Method::DELETE,
        &format!("/customers/{}", ada),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = send(
        &app,
        Method::GET,
        &format!("/customers/{}", ada),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Authentication and the gate
// =============================================================================

#[tokio::test]
async fn anonymous_guarded_request_is_unauthorized() {
    let reply = send(&app(), Method::GET, "/employees", None, None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn invalid_token_is_rejected_even_on_public_routes() {
    let app = app_with(MockTokenService::new().with_error(AuthError::InvalidToken));
    let reply = send(&app, Method::GET, "/products", Some("garbage"), None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn deleted_admin_token_stops_working() {
    let app = app();
    let (id, admin) = register(&app, "admins", "boss@example.com").await;
    create_product(&app, &admin, "Dynasty Hoodie").await;

    let deleted = send(&app, Method::DELETE, &format!("/admins/{}", id), Some(&admin), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let reply = send(
        &app,
        Method::POST,
        "/products",
        Some(&admin),
        Some(json!({"name": "Ghost Tee"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn deleted_customer_token_stops_working() {
    let app = app();
    let (_, admin) = register(&app, "admins", "boss@example.com").await;
    let (ada, token) = register(&app, "customers", "ada@example.com").await;

    let deleted = send(&app, Method::DELETE, &format!("/customers/{}", ada), Some(&admin), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let reply = send(&app, Method::GET, "/customers/profile", Some(&token), None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn product_browsing_is_public_but_writes_need_an_admin() {
    let app = app();
    let (_, admin) = register(&app, "admins", "boss@example.com").await;
    let (_, customer) = register(&app, "customers", "ada@example.com").await;
    let id = create_product(&app, &admin, "Dynasty Hoodie").await;

    let listed = send(&app, Method::GET, "/products", None, None).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body.as_array().unwrap().len(), 1);

    let found = send(
        &app,
        Method::GET,
        "/products/search?name=dynasty%20hoodie",
        None,
        None,
    )
    .await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["id"], id.as_str());
    assert_eq!(found.body["currency"], "USD");

    let denied = send(
        &app,
        Method::DELETE,
        &format!("/products/{}", id),
        Some(&customer),
        None,
    )
    .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let anonymous = send(
        &app,
        Method::PATCH,
        &format!("/products/{}", id),
        None,
        Some(json!({"num_in_stock": 3})),
    )
    .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_product_input_is_a_validation_error() {
    let app = app();
    let (_, admin) = register(&app, "admins", "boss@example.com").await;

    let reply = send(
        &app,
        Method::POST,
        "/products",
        Some(&admin),
        Some(json!({
            "name": "Cap",
            "description": "Snapback",
            "price": -1.0,
            "currency": "USD",
            "depo": "Main",
            "category": "Hats",
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["code"], "VALIDATION_FAILED");
}

// =============================================================================
// Carts
// =============================================================================

#[tokio::test]
async fn cart_belongs_to_its_customer() {
    let app = app();
    let (_, admin) = register(&app, "admins", "boss@example.com").await;
    let (ada, ada_token) = register(&app, "customers", "ada@example.com").await;
    let (_, bola_token) = register(&app, "customers", "bola@example.com").await;
    let product = create_product(&app, &admin, "Dynasty Tee").await;

    let cart = format!("/customers/{}/cart", ada);
    let added = send(
        &app,
        Method::POST,
        &cart,
        Some(&ada_token),
        Some(json!({"product_id": product, "quantity": 2})),
    )
    .await;
    assert_eq!(added.status, StatusCode::CREATED, "{}", added.body);

    let again = send(
        &app,
        Method::POST,
        &cart,
        Some(&ada_token),
        Some(json!({"product_id": product})),
    )
    .await;
    assert_eq!(again.body["quantity"], 3);

    let viewed = send(&app, Method::GET, &cart, Some(&ada_token), None).await;
    assert_eq!(viewed.status, StatusCode::OK);
    assert_eq!(viewed.body.as_array().unwrap().len(), 1);

    let snooped = send(&app, Method::GET, &cart, Some(&bola_token), None).await;
    assert_eq!(snooped.status, StatusCode::FORBIDDEN);

    let item = added.body["id"].as_str().unwrap();
    let removed = send(
        &app,
        Method::DELETE,
        &format!("{}/{}", cart, item),
        Some(&ada_token),
        None,
    )
    .await;
    assert_eq!(removed.status, StatusCode::NO_CONTENT);
}

// =============================================================================
// Staff and sales
// =============================================================================

#[tokio::test]
async fn attendance_shift_lifecycle() {
    let app = app();
    let (_, admin) = register(&app, "admins", "boss@example.com").await;
    let employee = create_employee(&app, &admin, "tunde@example.com").await;

    let opened = send(
        &app,
        Method::POST,
        &format!("/employees/{}/clock-in", employee),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(opened.status, StatusCode::CREATED, "{}", opened.body);
    assert!(opened.body["close_time"].is_null());
    let shift = opened.body["id"].as_str().unwrap().to_string();

    let second = send(
        &app,
        Method::POST,
        &format!("/employees/{}/clock-in", employee),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(second.status, StatusCode::CONFLICT);

    let closed = send(
        &app,
        Method::POST,
        &format!("/employees/{}/clock-out/{}", employee, shift),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(closed.status, StatusCode::OK, "{}", closed.body);
    assert!(!closed.body["close_time"].is_null());

    let listed = send(
        &app,
        Method::GET,
        &format!("/attendance?employee_id={}", employee),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn users_can_read_staff_but_not_clock_in() {
    let app = app();
    let (_, admin) = register(&app, "admins", "boss@example.com").await;
    let (_, customer) = register(&app, "customers", "ada@example.com").await;
    let employee = create_employee(&app, &admin, "tunde@example.com").await;

    let read = send(
        &app,
        Method::GET,
        &format!("/employees/{}", employee),
        Some(&customer),
        None,
    )
    .await;
    assert_eq!(read.status, StatusCode::OK);

    let clock = send(
        &app,
        Method::POST,
        &format!("/employees/{}/clock-in", employee),
        Some(&customer),
        None,
    )
    .await;
    assert_eq!(clock.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn sales_reference_existing_records() {
    let app = app();
    let (_, admin) = register(&app, "admins", "boss@example.com").await;
    let product = create_product(&app, &admin, "Dynasty Cargo").await;
    let employee = create_employee(&app, &admin, "tunde@example.com").await;

    let recorded = send(
        &app,
        Method::POST,
        "/sales",
        Some(&admin),
        Some(json!({
            "product_id": product,
            "employee_id": employee,
            "currency": "USD",
            "amount": 99.0,
            "quantity": 2,
        })),
    )
    .await;
    assert_eq!(recorded.status, StatusCode::CREATED, "{}", recorded.body);

    let by_employee = send(
        &app,
        Method::GET,
        &format!("/sales/employee/{}", employee),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(by_employee.body.as_array().unwrap().len(), 1);

    let orphan = send(
        &app,
        Method::POST,
        "/sales",
        Some(&admin),
        Some(json!({
            "product_id": "00000000-0000-0000-0000-000000000000",
            "employee_id": employee,
            "currency": "USD",
            "amount": 10.0,
            "quantity": 1,
        })),
    )
    .await;
    assert_eq!(orphan.status, StatusCode::NOT_FOUND);
    assert_eq!(orphan.body["code"], "PRODUCT_NOT_FOUND");
}
