//! HTTP request handlers for the payroll engine API.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::PayrollEngine;

use super::request::{CalculatePayslipRequest, GeneratePeriodRequest};
use super::response::{ApiError, ApiErrorResponse, CalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payslips/calculate", post(calculate_payslip_handler))
        .route("/payslips/:id/approve", post(approve_payslip_handler))
        .route("/periods/generate", post(generate_period_handler))
        .with_state(state)
}

/// Handler for `POST /payslips/calculate`.
async fn calculate_payslip_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculatePayslipRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match parse_payload(payload) {
        Ok(request) => request,
        Err(response) => return response.into_response(),
    };

    info!(
        employee_id = %request.employee_id,
        period_id = %request.period_id,
        "calculate payslip requested"
    );
    match state
        .engine()
        .calculate_payslip(request.employee_id, request.period_id)
    {
        Ok(outcome) => {
            let response: CalculationResponse = outcome.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(error) => engine_error_response(error),
    }
}

/// Handler for `POST /payslips/:id/approve`.
async fn approve_payslip_handler(
    State(state): State<AppState>,
    Path(payslip_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.engine().approve_payslip(payslip_id) {
        Ok(payslip) => (StatusCode::OK, Json(payslip)).into_response(),
        Err(error) => engine_error_response(error),
    }
}

/// Handler for `POST /periods/generate`.
async fn generate_period_handler(
    State(state): State<AppState>,
    payload: Result<Json<GeneratePeriodRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match parse_payload(payload) {
        Ok(request) => request,
        Err(response) => return response.into_response(),
    };

    let engine: &PayrollEngine = state.engine();
    match engine.generate_period(request.organization_id, request.month, request.year) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(error) => engine_error_response(error),
    }
}

/// Turns a JSON extraction result into the request or a 400 response.
fn parse_payload<T>(
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, (StatusCode, Json<ApiError>)> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            let error = match &rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(error = %body_text, "JSON data error");
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(error = %err, "JSON syntax error");
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err((StatusCode::BAD_REQUEST, Json(error)))
        }
    }
}

fn engine_error_response(error: crate::error::EngineError) -> axum::response::Response {
    warn!(error = %error, "engine call failed");
    let response: ApiErrorResponse = error.into();
    response.into_response()
}
