//! HTTP handlers for sale endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::OptionalAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::sale::{
    DeleteSaleCommand, SaleCommands, SaleQueries, UpdateSaleCommand,
};
use crate::domain::foundation::{EmployeeId, SaleId};

use super::dto::{RecordSaleRequest, SaleResponse, UpdateSaleRequest};

fn commands(state: &AppState) -> SaleCommands {
    SaleCommands::new(state.sales.clone(), state.employees.clone(), state.products.clone())
}

/// POST /sales
pub async fn record_sale(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Json(req): Json<RecordSaleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let sale = commands(&state).record(req.into(), principal.as_ref()).await?;
    tracing::info!(sale_id = %sale.id(), employee_id = %sale.employee_id(), "Sale recorded");
    Ok((StatusCode::CREATED, Json(SaleResponse::from(&sale))))
}

/// GET /sales
pub async fn list_sales(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
) -> Result<impl IntoResponse, ApiError> {
    let sales = SaleQueries::new(state.sales.clone())
        .list(principal.as_ref())
        .await?;
    let body: Vec<SaleResponse> = sales.iter().map(SaleResponse::from).collect();
    Ok(Json(body))
}

/// GET /sales/employee/:id
pub async fn list_employee_sales(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(employee_id): Path<EmployeeId>,
) -> Result<impl IntoResponse, ApiError> {
    let sales = SaleQueries::new(state.sales.clone())
        .by_employee(employee_id, principal.as_ref())
        .await?;
    let body: Vec<SaleResponse> = sales.iter().map(SaleResponse::from).collect();
    Ok(Json(body))
}

/// GET /sales/:id
pub async fn get_sale(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(sale_id): Path<SaleId>,
) -> Result<impl IntoResponse, ApiError> {
    let sale = SaleQueries::new(state.sales.clone())
        .get(sale_id, principal.as_ref())
        .await?;
    Ok(Json(SaleResponse::from(&sale)))
}

/// PATCH /sales/:id
pub async fn update_sale(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(sale_id): Path<SaleId>,
    Json(req): Json<UpdateSaleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateSaleCommand {
        sale_id,
        changes: req.into(),
    };
    let sale = commands(&state).update(cmd, principal.as_ref()).await?;
    Ok(Json(SaleResponse::from(&sale)))
}

/// DELETE /sales/:id
pub async fn delete_sale(
    State(state): State<AppState>,
    OptionalAuth(principal): OptionalAuth,
    Path(sale_id): Path<SaleId>,
) -> Result<impl IntoResponse, ApiError> {
    commands(&state)
        .delete(DeleteSaleCommand { sale_id }, principal.as_ref())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
