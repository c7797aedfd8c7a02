//! Axum routers for employee and attendance endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{
    clock_in, clock_out, create_employee, delete_avatar, delete_employee, get_attendance,
    get_employee, list_attendance, list_employees, update_avatar, update_employee,
};

/// Routes mounted at `/employees`.
pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/:id",
            get(get_employee).patch(update_employee).delete(delete_employee),
        )
        .route("/:id/avatar", put(update_avatar).delete(delete_avatar))
        .route("/:id/clock-in", post(clock_in))
        .route("/:id/clock-out/:attendance_id", post(clock_out))
}

/// Routes mounted at `/attendance`.
pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_attendance))
        .route("/:id", get(get_attendance))
}
