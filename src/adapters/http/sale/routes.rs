//! Axum router for sale endpoints.

use axum::{routing::get, Router};

use crate::adapters::http::state::AppState;

use super::handlers::{
    delete_sale, get_sale, list_employee_sales, list_sales, record_sale, update_sale,
};

/// Routes mounted at `/sales`.
pub fn sale_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sales).post(record_sale))
        .route("/employee/:id", get(list_employee_sales))
        .route("/:id", get(get_sale).patch(update_sale).delete(delete_sale))
}
