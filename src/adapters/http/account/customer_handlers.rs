//! HTTP handlers for customer and cart endpoints.

use axum::extract::{Json, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::OptionalAuth;
use crate::adapters::http::state::AppState;
use crate::adapters::http::upload::read_image;
use crate::application::handlers::customer::{
    AddToCartCommand, CartHandler, DeleteCustomerAvatarCommand, DeleteCustomerAvatarHandler,
    DeleteCustomerCommand, DeleteCustomerHandler, GetCustomerHandler, GetCustomerProfileHandler,
    GetCustomerQuery, ListCustomersHandler, LoginCustomerHandler, RegisterCustomerHandler,
    RemoveFromCartCommand, ResetCustomerPasswordCommand, ResetCustomerPasswordHandler,
    SocialLoginHandler, UpdateCartItemCommand, UpdateCustomerAvatarCommand,
    UpdateCustomerAvatarHandler, UpdateCustomerCommand, UpdateCustomerHandler, ViewCartQuery,
};
use crate::domain::foundation::{CartItemId, CustomerId};

use super::dto::{
    AccountResponse, AddToCartRequest, CartItemResponse, LoginRequest, RegisterRequest,
    ResetPasswordRequest, SessionResponse, SocialLoginRequest, UpdateCartItemRequest,
    UpdateProfileRequest,
};
use super::signed_in;

// ════════════════════════════════════════════════════════════════════════════════
// Sign-in
// ════════════════════════════════════════════════════════════════════════════════

/// POST /customers/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = RegisterCustomerHandler::new(
        state.customers.clone(),
        state.hasher.clone(),
        state.tokens.clone(),
    );
    let result = handler.handle(req.into()).await?;

    tracing::info!(customer_id = %result.customer.id(), "Customer registered");
    let body = SessionResponse::new(&result.token, AccountResponse::from(&result.customer));
    Ok(signed_in(&state.cookie, StatusCode::CREATED, &result.token, body))
}

/// POST /customers/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = LoginCustomerHandler::new(
        state.customers.clone(),
        state.hasher.clone(),
        state.tokens.clone(),
    );
    let result = handler.handle(req.into()).await?;

    let body = SessionResponse::new(&result.token, AccountResponse::from(&result.customer));
    Ok(signed_in(&state.cookie, StatusCode::OK, &result.token, body))
}

/// POST /customers/social-login
pub async fn social_login(
    State(state): State<AppState>,
    Json(req): Json<SocialLoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = SocialLoginHandler::new(state.customers.clone(), state.tokens.clone());
    let result = handler.handle(req.into()).await?;

    let body = SessionResponse::new(&result.token, AccountResponse::from(&result.customer));
    Ok(signed_in(&state.cookie, StatusCode::OK, &result.token, body))
}

// ════════════════════════════════════════════════════════════════════════════════
// Accounts
// ════════════════════════════════════════════════════════════════════════════════

/// GET /customers
pub async fn list_customers(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
) -> Result<impl IntoResponse, ApiError> {
    let customers = ListCustomersHandler::new(state.customers.clone())
        .handle(principal.as_ref())
        .await?;
    let body: Vec<AccountResponse> = customers.iter().map(AccountResponse::from).collect();
    Ok(Json(body))
}

/// GET /customers/profile
pub async fn get_profile(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
) -> Result<impl IntoResponse, ApiError> {
    let customer = GetCustomerProfileHandler::new(state.customers.clone())
        .handle(principal.as_ref())
        .await?;
    Ok(Json(AccountResponse::from(&customer)))
}

/// GET /customers/:id
pub async fn get_customer(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(customer_id): Path<CustomerId>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = GetCustomerHandler::new(state.customers.clone())
        .handle(GetCustomerQuery { customer_id }, principal.as_ref())
        .await?;
    Ok(Json(AccountResponse::from(&customer)))
}

/// PATCH /customers/:id
pub async fn update_customer(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(customer_id): Path<CustomerId>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (changes, password) = req.into_parts();
    let cmd = UpdateCustomerCommand {
        customer_id,
        changes,
        password,
    };
    let customer = UpdateCustomerHandler::new(state.customers.clone(), state.hasher.clone())
        .handle(cmd, principal.as_ref())
        .await?;
    Ok(Json(AccountResponse::from(&customer)))
}

/// PUT /customers/:id/password
pub async fn reset_password(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(customer_id): Path<CustomerId>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = ResetCustomerPasswordCommand {
        customer_id,
        password: req.password,
    };
    ResetCustomerPasswordHandler::new(state.customers.clone(), state.hasher.clone())
        .handle(cmd, principal.as_ref())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /customers/:id/avatar (multipart, field `image`)
pub async fn update_avatar(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(customer_id): Path<CustomerId>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let image = read_image(multipart).await?;
    let customer = UpdateCustomerAvatarHandler::new(state.customers.clone(), state.storage.clone())
        .handle(UpdateCustomerAvatarCommand { customer_id, image }, principal.as_ref())
        .await?;
    Ok(Json(AccountResponse::from(&customer)))
}

/// DELETE /customers/:id/avatar
pub async fn delete_avatar(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(customer_id): Path<CustomerId>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = DeleteCustomerAvatarHandler::new(state.customers.clone(), state.storage.clone())
        .handle(DeleteCustomerAvatarCommand { customer_id }, principal.as_ref())
        .await?;
    Ok(Json(AccountResponse::from(&customer)))
}

/// DELETE /customers/:id
pub async fn delete_customer(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(customer_id): Path<CustomerId>,
) -> Result<impl IntoResponse, ApiError> {
    DeleteCustomerHandler::new(state.customers.clone(), state.storage.clone())
        .handle(DeleteCustomerCommand { customer_id }, principal.as_ref())
        .await?;
    tracing::info!(%customer_id, "Customer deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Cart
// ════════════════════════════════════════════════════════════════════════════════

fn cart_handler(state: &AppState) -> CartHandler {
    CartHandler::new(state.customers.clone(), state.products.clone(), state.carts.clone())
}

/// GET /customers/:id/cart
pub async fn view_cart(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(customer_id): Path<CustomerId>,
) -> Result<impl IntoResponse, ApiError> {
    let items = cart_handler(&state)
        .view(ViewCartQuery { customer_id }, principal.as_ref())
        .await?;
    let body: Vec<CartItemResponse> = items.iter().map(CartItemResponse::from).collect();
    Ok(Json(body))
}

/// POST /customers/:id/cart
pub async fn add_to_cart(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(customer_id): Path<CustomerId>,
    Json(req): Json<AddToCartRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = AddToCartCommand {
        customer_id,
        product_id: req.product_id,
        quantity: req.quantity,
    };
    let item = cart_handler(&state).add(cmd, principal.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(CartItemResponse::from(&item))))
}

/// PATCH /customers/:id/cart/:item_id
pub async fn update_cart_item(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path((customer_id, item_id)): Path<(CustomerId, CartItemId)>,
    Json(req): Json<UpdateCartItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateCartItemCommand {
        customer_id,
        item_id,
        quantity: req.quantity,
    };
    let item = cart_handler(&state).update(cmd, principal.as_ref()).await?;
    Ok(Json(CartItemResponse::from(&item)))
}

/// DELETE /customers/:id/cart/:item_id
pub async fn remove_from_cart(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path((customer_id, item_id)): Path<(CustomerId, CartItemId)>,
) -> Result<impl IntoResponse, ApiError> {
    cart_handler(&state)
        .remove(RemoveFromCartCommand { customer_id, item_id }, principal.as_ref())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
