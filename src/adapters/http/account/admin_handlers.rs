//! HTTP handlers for admin endpoints.

use axum::extract::{Json, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::OptionalAuth;
use crate::adapters::http::state::AppState;
use crate::adapters::http::upload::read_image;
use crate::application::handlers::admin::{
    DeleteAdminAvatarCommand, DeleteAdminAvatarHandler, DeleteAdminCommand, DeleteAdminHandler,
    GetAdminHandler, GetAdminProfileHandler, GetAdminQuery, ListAdminsHandler, LoginAdminHandler,
    RegisterAdminHandler, ResetAdminPasswordCommand, ResetAdminPasswordHandler,
    UpdateAdminAvatarCommand, UpdateAdminAvatarHandler, UpdateAdminCommand, UpdateAdminHandler,
};
use crate::domain::foundation::AdminId;

use super::dto::{
    AccountResponse, LoginRequest, RegisterRequest, ResetPasswordRequest, SessionResponse,
    UpdateProfileRequest,
};
use super::signed_in;

/// POST /admins/register
///
/// The first admin registers anonymously and is signed in. Later admins are
/// created by an existing admin, whose own session is left untouched.
pub async fn register(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, ApiError> {
    let handler = RegisterAdminHandler::new(state.admins.clone(), state.hasher.clone(), state.tokens.clone());
    let result = handler.handle(req.into(), principal.as_ref()).await?;

    let account = AccountResponse::from(&result.admin);
    if principal.is_some() {
        return Ok((StatusCode::CREATED, Json(account)).into_response());
    }
    let body = SessionResponse::new(&result.token, account);
    Ok(signed_in(&state.cookie, StatusCode::CREATED, &result.token, body))
}

/// POST /admins/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = LoginAdminHandler::new(state.admins.clone(), state.hasher.clone(), state.tokens.clone());
    let result = handler.handle(req.into()).await?;

    let body = SessionResponse::new(&result.token, AccountResponse::from(&result.admin));
    Ok(signed_in(&state.cookie, StatusCode::OK, &result.token, body))
}

/// GET /admins
pub async fn list_admins(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
) -> Result<impl IntoResponse, ApiError> {
    let admins = ListAdminsHandler::new(state.admins.clone())
        .handle(principal.as_ref())
        .await?;
    let body: Vec<AccountResponse> = admins.iter().map(AccountResponse::from).collect();
    Ok(Json(body))
}

/// GET /admins/profile
pub async fn get_profile(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
) -> Result<impl IntoResponse, ApiError> {
    let admin = GetAdminProfileHandler::new(state.admins.clone())
        .handle(principal.as_ref())
        .await?;
    Ok(Json(AccountResponse::from(&admin)))
}

/// GET /admins/:id
pub async fn get_admin(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(admin_id): Path<AdminId>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = GetAdminHandler::new(state.admins.clone())
        .handle(GetAdminQuery { admin_id }, principal.as_ref())
        .await?;
    Ok(Json(AccountResponse::from(&admin)))
}

/// PATCH /admins/:id
pub async fn update_admin(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(admin_id): Path<AdminId>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (changes, password) = req.into_parts();
    let cmd = UpdateAdminCommand {
        admin_id,
        changes,
        password,
    };
    let admin = UpdateAdminHandler::new(state.admins.clone(), state.hasher.clone())
        .handle(cmd, principal.as_ref())
        .await?;
    Ok(Json(AccountResponse::from(&admin)))
}

/// PUT /admins/:id/password
pub async fn reset_password(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(admin_id): Path<AdminId>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = ResetAdminPasswordCommand {
        admin_id,
        password: req.password,
    };
    ResetAdminPasswordHandler::new(state.admins.clone(), state.hasher.clone())
        .handle(cmd, principal.as_ref())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /admins/:id/avatar (multipart, field `image`)
pub async fn update_avatar(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(admin_id): Path<AdminId>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let image = read_image(multipart).await?;
    let admin = UpdateAdminAvatarHandler::new(state.admins.clone(), state.storage.clone())
        .handle(UpdateAdminAvatarCommand { admin_id, image }, principal.as_ref())
        .await?;
    Ok(Json(AccountResponse::from(&admin)))
}

/// DELETE /admins/:id/avatar
pub async fn delete_avatar(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(admin_id): Path<AdminId>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = DeleteAdminAvatarHandler::new(state.admins.clone(), state.storage.clone())
        .handle(DeleteAdminAvatarCommand { admin_id }, principal.as_ref())
        .await?;
    Ok(Json(AccountResponse::from(&admin)))
}

/// DELETE /admins/:id
pub async fn delete_admin(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(admin_id): Path<AdminId>,
) -> Result<impl IntoResponse, ApiError> {
    DeleteAdminHandler::new(state.admins.clone(), state.storage.clone())
        .handle(DeleteAdminCommand { admin_id }, principal.as_ref())
        .await?;
    tracing::info!(%admin_id, "Admin deleted");
    Ok(StatusCode::NO_CONTENT)
}
