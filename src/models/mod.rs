//! Core data models for the billing engine.
//!
//! This module contains all the domain models used throughout the engine.

mod billing_result;
mod calculation_result;
mod classified_duration;
mod holiday;
mod service_order;
mod shift_input;

pub use billing_result::BillingResult;
pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, ServiceOrderCalculation};
pub use classified_duration::ClassifiedDuration;
pub use holiday::PublicHoliday;
pub use service_order::{PaymentStatus, ServiceOrder, ServiceOrderRecord};
pub use shift_input::{BreakPolicy, ShiftInput};
