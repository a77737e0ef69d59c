//! Monetary pricing of classified time and pass-through charges.
//!
//! ## Formulae
//!
//! - normal value = rate × normal hours × technicians
//! - premium-50 value = rate × 1.5 × premium-50 hours × technicians
//! - premium-100 value = rate × 2.0 × premium-100 hours × technicians
//! - km value = distance × rate per km
//! - transport total = transport per technician × technicians
//!
//! Meal, parts, toll and lab values pass through unchanged. Nothing is rounded.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{BillingResult, ClassifiedDuration, ShiftInput};

use super::policy::BillingPolicy;

/// Prices a classified shift.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when a product or the total does not
/// fit in a `Decimal`. The error names the input that drove the product.
///
/// # Example
///
/// ```
/// use billing_engine::calculation::{price_shift, BillingPolicy};
/// use billing_engine::models::{ClassifiedDuration, ShiftInput};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let input = ShiftInput::new(
///     NaiveDate::from_ymd_opt(2026, 1, 17).unwrap(),
///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
///     Decimal::new(100, 0),
/// )
/// .with_technicians(2);
/// let classified = ClassifiedDuration {
///     normal_seconds: 0,
///     premium_50_seconds: 0,
///     premium_100_seconds: 4 * 3600,
/// };
///
/// let billing = price_shift(&classified, &input, &BillingPolicy::default()).unwrap();
/// assert_eq!(billing.premium_100_value, Decimal::new(1600, 0));
/// assert_eq!(billing.total_value, Decimal::new(1600, 0));
/// ```
pub fn price_shift(
    classified: &ClassifiedDuration,
    input: &ShiftInput,
    policy: &BillingPolicy,
) -> EngineResult<BillingResult> {
    let technicians = Decimal::from(input.technician_count);
    let rate = input.hourly_rate;

    let normal_hours_value =
        checked_product("hourly_rate", &[rate, classified.normal_hours(), technicians])?;
    let premium_50_value = checked_product(
        "hourly_rate",
        &[rate, policy.premium_50_multiplier, classified.premium_50_hours(), technicians],
    )?;
    let premium_100_value = checked_product(
        "hourly_rate",
        &[rate, policy.premium_100_multiplier, classified.premium_100_hours(), technicians],
    )?;
    let km_value = checked_product("distance_km", &[input.distance_km, input.rate_per_km])?;
    let transport_total = checked_product(
        "transport_value_per_technician",
        &[input.transport_value_per_technician, technicians],
    )?;

    BillingResult::from_subtotals(
        normal_hours_value,
        premium_50_value,
        premium_100_value,
        km_value,
        input.meal_value,
        input.parts_value,
        input.toll_value,
        transport_total,
        input.lab_value,
    )
}

fn checked_product(field: &str, factors: &[Decimal]) -> EngineResult<Decimal> {
    factors
        .iter()
        .try_fold(Decimal::ONE, |product, factor| product.checked_mul(*factor))
        .ok_or_else(|| EngineError::invalid_input(field, "value too large"))
}

/// Prices a bench service done in the laboratory.
///
/// A lab service has no shift: only the lab fee and the parts are charged.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when either value is negative.
///
/// # Example
///
/// ```
/// use billing_engine::calculation::price_lab_service;
/// use rust_decimal::Decimal;
///
/// let billing = price_lab_service(Decimal::new(35000, 2), Decimal::new(12000, 2)).unwrap();
/// assert_eq!(billing.total_value, Decimal::new(47000, 2));
/// assert_eq!(billing.hours_value(), Decimal::ZERO);
/// ```
pub fn price_lab_service(lab_value: Decimal, parts_value: Decimal) -> EngineResult<BillingResult> {
    for (field, value) in [("lab_value", lab_value), ("parts_value", parts_value)] {
        if value < Decimal::ZERO {
            return Err(EngineError::invalid_input(
                field,
                format!("must not be negative, got {}", value),
            ));
        }
    }

    BillingResult::from_subtotals(
        Decimal::ZERO,
        Decimal::ZERO,
        Decimal::ZERO,
        Decimal::ZERO,
        Decimal::ZERO,
        parts_value,
        Decimal::ZERO,
        Decimal::ZERO,
        lab_value,
    )
}
