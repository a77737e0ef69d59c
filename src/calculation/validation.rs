//! Input validation run before any classification.
//!
//! Out-of-contract values are rejected rather than clamped, so an invoice can
//! never carry a silently corrected figure. Blank form fields are expected to
//! have been turned into zeros before they get here.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{BreakPolicy, ShiftInput};

/// Checks a shift input against the engine's preconditions.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] naming the first offending field when:
/// - `technician_count` is zero
/// - any rate, quantity or monetary value is negative
/// - an automatic break window does not end after it starts
///
/// # Example
///
/// ```
/// use billing_engine::calculation::validate_shift_input;
/// use billing_engine::models::ShiftInput;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let input = ShiftInput::new(
///     NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     Decimal::new(90, 0),
/// );
/// assert!(validate_shift_input(&input).is_ok());
/// assert!(validate_shift_input(&input.clone().with_technicians(0)).is_err());
/// ```
pub fn validate_shift_input(input: &ShiftInput) -> EngineResult<()> {
    if input.technician_count == 0 {
        return Err(EngineError::invalid_input(
            "technician_count",
            "must be at least 1",
        ));
    }

    let amounts = [
        ("hourly_rate", input.hourly_rate),
        ("distance_km", input.distance_km),
        ("rate_per_km", input.rate_per_km),
        ("meal_value", input.meal_value),
        ("parts_value", input.parts_value),
        ("toll_value", input.toll_value),
        (
            "transport_value_per_technician",
            input.transport_value_per_technician,
        ),
        ("lab_value", input.lab_value),
    ];

    for (field, value) in amounts {
        if value < Decimal::ZERO {
            return Err(EngineError::invalid_input(
                field,
                format!("must not be negative, got {}", value),
            ));
        }
    }

    if let BreakPolicy::Automatic { start, end } = input.break_policy {
        if end <= start {
            return Err(EngineError::invalid_input(
                "break_policy",
                format!("automatic break must end after it starts ({} - {})", start, end),
            ));
        }
    }

    Ok(())
}
