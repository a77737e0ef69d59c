//! HTTP request handlers for the billing engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_service_order, price_lab_service};
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{ServiceOrderCalculation, ServiceOrderRecord, ShiftInput};

use super::request::{CalculationRequest, LabServiceRequest, ShiftRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/calculate/record", post(calculate_record_handler))
        .route("/calculate/lab", post(lab_service_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a calculation request and returns the full calculation with its
/// audit trace.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match perform_calculation(&state, request) {
        Ok(calculation) => {
            log_completed(correlation_id, &calculation);
            json_ok(calculation)
        }
        Err(err) => engine_error_response(correlation_id, err.into()),
    }
}

/// Handler for POST /calculate/record endpoint.
///
/// Same input as `/calculate`; returns the flat record to be stored.
async fn calculate_record_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing record request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let record = perform_calculation(&state, request).and_then(|calculation| {
        log_completed(correlation_id, &calculation);
        ServiceOrderRecord::from_calculation(&calculation)
    });

    match record {
        Ok(record) => json_ok(record),
        Err(err) => engine_error_response(correlation_id, err.into()),
    }
}

/// Handler for POST /calculate/lab endpoint.
async fn lab_service_handler(payload: Result<Json<LabServiceRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing lab service request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let record = price_lab_service(request.lab_value, request.parts_value).and_then(|billing| {
        info!(
            correlation_id = %correlation_id,
            order_number = %request.order.order_number,
            total_value = %billing.total_value,
            "Lab service priced"
        );
        ServiceOrderRecord::lab_service(&request.order, request.service_date, &billing)
    });

    match record {
        Ok(record) => json_ok(record),
        Err(err) => engine_error_response(correlation_id, err.into()),
    }
}

/// Runs the engine for a field-service request.
fn perform_calculation(
    state: &AppState,
    request: CalculationRequest,
) -> EngineResult<ServiceOrderCalculation> {
    let input = build_shift_input(request.shift, state.config())?;
    calculate_service_order(request.order, input, state.calendar(), &state.policy())
}

/// Fills the rates a request left out from the rate table in force on the
/// service date. The table is only consulted when a rate is missing.
fn build_shift_input(shift: ShiftRequest, config: &ConfigLoader) -> EngineResult<ShiftInput> {
    let default_break_policy = config.default_break_policy();

    if !shift.needs_rate_table() {
        return Ok(shift.into_shift_input(
            rust_decimal::Decimal::ZERO,
            rust_decimal::Decimal::ZERO,
            default_break_policy,
        ));
    }

    let rates = config.get_rates(shift.service_date)?;
    Ok(shift.into_shift_input(rates.hourly_rate, rates.rate_per_km, default_break_policy))
}

fn log_completed(correlation_id: Uuid, calculation: &ServiceOrderCalculation) {
    info!(
        correlation_id = %correlation_id,
        calculation_id = %calculation.calculation_id,
        order_number = %calculation.order.order_number,
        service_date = %calculation.input.service_date,
        total_value = %calculation.billing.total_value,
        warnings = calculation.audit_trace.warnings.len(),
        duration_us = calculation.audit_trace.duration_us,
        "Calculation completed successfully"
    );
}

fn json_ok<T: serde::Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(correlation_id: Uuid, api_error: ApiErrorResponse) -> Response {
    warn!(
        correlation_id = %correlation_id,
        code = %api_error.error.code,
        error = %api_error.error.message,
        "Calculation failed"
    );
    api_error.into_response()
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}
