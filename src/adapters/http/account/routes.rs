//! Axum routers for account endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::adapters::http::state::AppState;

use super::{admin_handlers as admin, customer_handlers as customer, logout};

/// Routes mounted at `/admins`.
///
/// - `POST /register` - public until the first admin exists, then admin-only
/// - `POST /login`, `POST /logout` - public
/// - `GET /`, `GET /profile`, `GET /:id`
/// - `PATCH /:id`, `DELETE /:id`
/// - `PUT /:id/password`
/// - `PUT /:id/avatar` (multipart), `DELETE /:id/avatar`
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(admin::register))
        .route("/login", post(admin::login))
        .route("/logout", post(logout))
        .route("/", get(admin::list_admins))
        .route("/profile", get(admin::get_profile))
        .route(
            "/:id",
            get(admin::get_admin)
                .patch(admin::update_admin)
                .delete(admin::delete_admin),
        )
        .route("/:id/password", put(admin::reset_password))
        .route(
            "/:id/avatar",
            put(admin::update_avatar).delete(admin::delete_avatar),
        )
}

/// Routes mounted at `/customers`.
///
/// Same account surface as [`admin_routes`], plus:
/// - `POST /social-login` - public
/// - `GET /:id/cart`, `POST /:id/cart`
/// - `PATCH /:id/cart/:item_id`, `DELETE /:id/cart/:item_id`
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(customer::register))
        .route("/login", post(customer::login))
        .route("/social-login", post(customer::social_login))
        .route("/logout", post(logout))
        .route("/", get(customer::list_customers))
        .route("/profile", get(customer::get_profile))
        .route(
            "/:id",
            get(customer::get_customer)
                .patch(customer::update_customer)
                .delete(customer::delete_customer),
        )
        .route("/:id/password", put(customer::reset_password))
        .route(
            "/:id/avatar",
            put(customer::update_avatar).delete(customer::delete_avatar),
        )
        .route(
            "/:id/cart",
            get(customer::view_cart).post(customer::add_to_cart),
        )
        .route(
            "/:id/cart/:item_id",
            axum::routing::patch(customer::update_cart_item).delete(customer::remove_from_cart),
        )
}
