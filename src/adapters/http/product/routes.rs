//! Axum router for product endpoints.

use axum::{routing::get, Router};

use crate::adapters::http::state::AppState;

use super::handlers::{
    create_product, delete_image, delete_product, find_by_name, get_product, list_products,
    update_product, upload_image,
};

/// Routes mounted at `/products`.
///
/// Browsing (`GET /`, `GET /search?name=`, `GET /:id`) is public; the rest
/// requires an admin.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(find_by_name))
        .route(
            "/:id",
            get(get_product).patch(update_product).delete(delete_product),
        )
        .route(
            "/:id/images",
            axum::routing::post(upload_image).delete(delete_image),
        )
}
