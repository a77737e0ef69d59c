//! HTTP API module for the billing engine.
//!
//! This module provides the REST API endpoints for pricing field-service
//! attendances and laboratory services.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, LabServiceRequest, ShiftRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
