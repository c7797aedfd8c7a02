//! HTTP handlers for product endpoints.

use axum::extract::{Json, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::OptionalAuth;
use crate::adapters::http::state::AppState;
use crate::adapters::http::upload::read_image;
use crate::application::handlers::product::{
    CreateProductCommand, CreateProductHandler, DeleteProductCommand, DeleteProductHandler,
    DeleteProductImageCommand, ProductImageHandler, ProductQueries, UpdateProductCommand,
    UpdateProductHandler, UploadProductImageCommand,
};
use crate::domain::foundation::ProductId;

use super::dto::{
    CreateProductRequest, DeleteImageRequest, ProductResponse, ProductSearch, UpdateProductRequest,
};

/// GET /products
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let products = ProductQueries::new(state.products.clone()).list().await?;
    let body: Vec<ProductResponse> = products.iter().map(ProductResponse::from).collect();
    Ok(Json(body))
}

/// GET /products/search?name=
pub async fn find_by_name(
    State(state): State<AppState>,
    Query(search): Query<ProductSearch>,
) -> Result<impl IntoResponse, ApiError> {
    let product = ProductQueries::new(state.products.clone())
        .get_by_name(&search.name)
        .await?;
    Ok(Json(ProductResponse::from(&product)))
}

/// GET /products/:id
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<impl IntoResponse, ApiError> {
    let product = ProductQueries::new(state.products.clone()).get(product_id).await?;
    Ok(Json(ProductResponse::from(&product)))
}

/// POST /products
pub async fn create_product(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Json(req): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateProductCommand {
        details: req.try_into()?,
    };
    let product = CreateProductHandler::new(state.products.clone())
        .handle(cmd, principal.as_ref())
        .await?;

    tracing::info!(product_id = %product.id(), "Product created");
    Ok((StatusCode::CREATED, Json(ProductResponse::from(&product))))
}

/// PATCH /products/:id
pub async fn update_product(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(product_id): Path<ProductId>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let current = if req.needs_current_price() {
        let product = ProductQueries::new(state.products.clone()).get(product_id).await?;
        Some(product.details().price.clone())
    } else {
        None
    };
    let cmd = UpdateProductCommand {
        product_id,
        changes: req.into_changes(current.as_ref())?,
    };
    let product = UpdateProductHandler::new(state.products.clone())
        .handle(cmd, principal.as_ref())
        .await?;
    Ok(Json(ProductResponse::from(&product)))
}

/// POST /products/:id/images (multipart, field `image`)
pub async fn upload_image(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(product_id): Path<ProductId>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let image = read_image(multipart).await?;
    let product = ProductImageHandler::new(state.products.clone(), state.storage.clone())
        .upload(UploadProductImageCommand { product_id, image }, principal.as_ref())
        .await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(&product))))
}

/// DELETE /products/:id/images
pub async fn delete_image(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(product_id): Path<ProductId>,
    Json(req): Json<DeleteImageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = DeleteProductImageCommand {
        product_id,
        image_url: req.url,
    };
    let product = ProductImageHandler::new(state.products.clone(), state.storage.clone())
        .delete(cmd, principal.as_ref())
        .await?;
    Ok(Json(ProductResponse::from(&product)))
}

/// DELETE /products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(product_id): Path<ProductId>,
) -> Result<impl IntoResponse, ApiError> {
    DeleteProductHandler::new(state.products.clone(), state.storage.clone())
        .handle(DeleteProductCommand { product_id }, principal.as_ref())
        .await?;
    tracing::info!(%product_id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
