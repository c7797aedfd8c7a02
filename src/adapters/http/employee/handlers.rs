//! HTTP handlers for employee and attendance endpoints.

use axum::extract::{Json, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::OptionalAuth;
use crate::adapters::http::state::AppState;
use crate::adapters::http::upload::read_image;
use crate::application::handlers::employee::{
    AttendanceHandler, ClockInCommand, ClockOutCommand, CreateEmployeeCommand,
    CreateEmployeeHandler, DeleteEmployeeAvatarCommand, DeleteEmployeeCommand,
    DeleteEmployeeHandler, EmployeeAvatarHandler, EmployeeQueries, UpdateEmployeeAvatarCommand,
    UpdateEmployeeCommand, UpdateEmployeeHandler,
};
use crate::domain::foundation::{AttendanceId, EmployeeId};

use super::dto::{
    AttendanceFilter, AttendanceResponse, ClockRequest, CreateEmployeeRequest, EmployeeResponse,
    UpdateEmployeeRequest,
};

fn attendance_handler(state: &AppState) -> AttendanceHandler {
    AttendanceHandler::new(state.employees.clone(), state.attendance.clone())
}

fn avatar_handler(state: &AppState) -> EmployeeAvatarHandler {
    EmployeeAvatarHandler::new(state.employees.clone(), state.storage.clone())
}

// ════════════════════════════════════════════════════════════════════════════════
// Employees
// ════════════════════════════════════════════════════════════════════════════════

/// POST /employees
pub async fn create_employee(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (details, avatar) = req.into_parts();
    let employee = CreateEmployeeHandler::new(state.employees.clone())
        .handle(CreateEmployeeCommand { details, avatar }, principal.as_ref())
        .await?;

    tracing::info!(employee_id = %employee.id(), "Employee created");
    Ok((StatusCode::CREATED, Json(EmployeeResponse::from(&employee))))
}

/// GET /employees
pub async fn list_employees(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
) -> Result<impl IntoResponse, ApiError> {
    let employees = EmployeeQueries::new(state.employees.clone())
        .list(principal.as_ref())
        .await?;
    let body: Vec<EmployeeResponse> = employees.iter().map(EmployeeResponse::from).collect();
    Ok(Json(body))
}

/// GET /employees/:id
pub async fn get_employee(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(employee_id): Path<EmployeeId>,
) -> Result<impl IntoResponse, ApiError> {
    let employee = EmployeeQueries::new(state.employees.clone())
        .get(employee_id, principal.as_ref())
        .await?;
    Ok(Json(EmployeeResponse::from(&employee)))
}

/// PATCH /employees/:id
pub async fn update_employee(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(employee_id): Path<EmployeeId>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateEmployeeCommand {
        employee_id,
        changes: req.into(),
    };
    let employee = UpdateEmployeeHandler::new(state.employees.clone())
        .handle(cmd, principal.as_ref())
        .await?;
    Ok(Json(EmployeeResponse::from(&employee)))
}

/// DELETE /employees/:id
pub async fn delete_employee(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(employee_id): Path<EmployeeId>,
) -> Result<impl IntoResponse, ApiError> {
    DeleteEmployeeHandler::new(state.employees.clone(), state.storage.clone())
        .handle(DeleteEmployeeCommand { employee_id }, principal.as_ref())
        .await?;
    tracing::info!(%employee_id, "Employee deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /employees/:id/avatar (multipart, field `image`)
pub async fn update_avatar(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(employee_id): Path<EmployeeId>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let image = read_image(multipart).await?;
    let employee = avatar_handler(&state)
        .update(UpdateEmployeeAvatarCommand { employee_id, image }, principal.as_ref())
        .await?;
    Ok(Json(EmployeeResponse::from(&employee)))
}

/// DELETE /employees/:id/avatar
pub async fn delete_avatar(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(employee_id): Path<EmployeeId>,
) -> Result<impl IntoResponse, ApiError> {
    let employee = avatar_handler(&state)
        .delete(DeleteEmployeeAvatarCommand { employee_id }, principal.as_ref())
        .await?;
    Ok(Json(EmployeeResponse::from(&employee)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Attendance
// ════════════════════════════════════════════════════════════════════════════════

/// POST /employees/:id/clock-in
pub async fn clock_in(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(employee_id): Path<EmployeeId>,
    body: Option<Json<ClockRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let start_time = body.and_then(|Json(req)| req.at);
    let attendance = attendance_handler(&state)
        .clock_in(ClockInCommand { employee_id, start_time }, principal.as_ref())
        .await?;
    Ok((StatusCode::CREATED, Json(AttendanceResponse::from(&attendance))))
}

/// POST /employees/:id/clock-out/:attendance_id
pub async fn clock_out(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path((employee_id, attendance_id)): Path<(EmployeeId, AttendanceId)>,
    body: Option<Json<ClockRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = ClockOutCommand {
        employee_id,
        attendance_id,
        close_time: body.and_then(|Json(req)| req.at),
    };
    let attendance = attendance_handler(&state)
        .clock_out(cmd, principal.as_ref())
        .await?;
    Ok(Json(AttendanceResponse::from(&attendance)))
}

/// GET /attendance?employee_id=
pub async fn list_attendance(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Query(filter): Query<AttendanceFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let records = attendance_handler(&state)
        .list(filter.employee_id, principal.as_ref())
        .await?;
    let body: Vec<AttendanceResponse> = records.iter().map(AttendanceResponse::from).collect();
    Ok(Json(body))
}

/// GET /attendance/:id
pub async fn get_attendance(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(attendance_id): Path<AttendanceId>,
) -> Result<impl IntoResponse, ApiError> {
    let attendance = attendance_handler(&state)
        .get(attendance_id, principal.as_ref())
        .await?;
    Ok(Json(AttendanceResponse::from(&attendance)))
}
