//! Service-order calculation entry points.
//!
//! Ties validation, shift normalisation, the business-day lookup,
//! classification and pricing together. Every call is independent: no state
//! is kept between calculations and the calendar is queried exactly once.

use std::time::Instant;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, BillingResult, BreakPolicy, ClassifiedDuration,
    ServiceOrder, ServiceOrderCalculation, ShiftInput,
};

use super::business_calendar::BusinessCalendar;
use super::classification::classify_shift;
use super::policy::BillingPolicy;
use super::pricing::price_shift;
use super::shift_window::{ShiftWindow, normalize_shift};
use super::validation::validate_shift_input;

/// Everything derived from one shift before it is wrapped for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Evaluation {
    window: ShiftWindow,
    is_business_day: bool,
    classified: ClassifiedDuration,
    billing: BillingResult,
}

fn evaluate(
    input: &ShiftInput,
    calendar: &dyn BusinessCalendar,
    policy: &BillingPolicy,
) -> EngineResult<Evaluation> {
    policy.validate()?;
    validate_shift_input(input)?;

    let window = normalize_shift(input);
    let is_business_day = calendar.is_business_day(input.service_date)?;
    let classified = classify_shift(&window, is_business_day, policy);
    let billing = price_shift(&classified, input, policy)?;

    debug!(
        service_date = %input.service_date,
        gross_seconds = window.gross_seconds,
        break_seconds = window.break_seconds,
        is_business_day,
        normal_seconds = classified.normal_seconds,
        premium_50_seconds = classified.premium_50_seconds,
        premium_100_seconds = classified.premium_100_seconds,
        total_value = %billing.total_value,
        "Shift classified and priced"
    );

    Ok(Evaluation {
        window,
        is_business_day,
        classified,
        billing,
    })
}

/// Classifies and prices a shift with the standard billing policy
/// (normal hours 07:00-17:00, premiums of 150% and 200%).
///
/// # Errors
///
/// - [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput) when the input breaks a precondition
/// - [`EngineError::CalendarUnavailable`](crate::error::EngineError::CalendarUnavailable) when the calendar cannot answer
///
/// # Example
///
/// ```
/// use billing_engine::calculation::{classify_and_price, WeekdayCalendar};
/// use billing_engine::models::ShiftInput;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// // Tuesday 08:00-17:00 at R$ 90/h
/// let input = ShiftInput::new(
///     NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     Decimal::new(90, 0),
/// );
///
/// let billing = classify_and_price(&input, &WeekdayCalendar).unwrap();
/// assert_eq!(billing.normal_hours_value, Decimal::new(810, 0));
/// assert_eq!(billing.total_value, Decimal::new(810, 0));
/// ```
pub fn classify_and_price(
    input: &ShiftInput,
    calendar: &dyn BusinessCalendar,
) -> EngineResult<BillingResult> {
    classify_and_price_with_policy(input, calendar, &BillingPolicy::default())
}

/// Classifies and prices a shift under an explicit billing policy.
pub fn classify_and_price_with_policy(
    input: &ShiftInput,
    calendar: &dyn BusinessCalendar,
    policy: &BillingPolicy,
) -> EngineResult<BillingResult> {
    evaluate(input, calendar, policy).map(|evaluation| evaluation.billing)
}

/// Prices a service order and records how the result was reached.
///
/// The returned calculation carries the classified time, the monetary
/// breakdown and an audit trace with one step per rule applied.
///
/// # Example
///
/// ```
/// use billing_engine::calculation::{calculate_service_order, BillingPolicy, NationalHolidayCalendar};
/// use billing_engine::models::{ServiceOrder, ShiftInput};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// // Saturday 08:00-12:00, two technicians at R$ 100/h
/// let input = ShiftInput::new(
///     NaiveDate::from_ymd_opt(2026, 1, 17).unwrap(),
///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
///     Decimal::new(100, 0),
/// )
/// .with_technicians(2);
///
/// let calculation = calculate_service_order(
///     ServiceOrder::default(),
///     input,
///     &NationalHolidayCalendar::new(),
///     &BillingPolicy::default(),
/// )
/// .unwrap();
///
/// assert_eq!(calculation.classified.premium_100_seconds, 4 * 3600);
/// assert_eq!(calculation.billing.total_value, Decimal::new(1600, 0));
/// assert_eq!(calculation.audit_trace.steps.len(), 5);
/// ```
pub fn calculate_service_order(
    order: ServiceOrder,
    input: ShiftInput,
    calendar: &dyn BusinessCalendar,
    policy: &BillingPolicy,
) -> EngineResult<ServiceOrderCalculation> {
    let started = Instant::now();
    let evaluation = evaluate(&input, calendar, policy)?;

    let steps = audit_steps(&input, policy, &evaluation);
    let warnings = audit_warnings(&input, &evaluation);

    Ok(ServiceOrderCalculation {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        order,
        input,
        classified: evaluation.classified,
        billing: evaluation.billing,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: started.elapsed().as_micros() as u64,
        },
    })
}

fn audit_steps(input: &ShiftInput, policy: &BillingPolicy, evaluation: &Evaluation) -> Vec<AuditStep> {
    let Evaluation {
        window,
        is_business_day,
        classified,
        billing,
    } = evaluation;

    let window_step = AuditStep {
        step_number: 1,
        rule_id: "shift_window".to_string(),
        rule_name: "Shift Window Normalisation".to_string(),
        input: serde_json::json!({
            "service_date": input.service_date.to_string(),
            "start_time": input.start_time.to_string(),
            "end_time": input.end_time.to_string()
        }),
        output: serde_json::json!({
            "start": window.start.to_string(),
            "end": window.end.to_string(),
            "gross_seconds": window.gross_seconds
        }),
        reasoning: if window.crosses_midnight() {
            format!(
                "End time {} is not after start time {}: shift ends on the following day ({}s gross)",
                input.end_time, input.start_time, window.gross_seconds
            )
        } else {
            format!(
                "Shift ends on its start date ({}s gross)",
                window.gross_seconds
            )
        },
    };

    let break_window = input.break_window();
    let break_step = AuditStep {
        step_number: 2,
        rule_id: "break_deduction".to_string(),
        rule_name: "Break Deduction".to_string(),
        input: serde_json::json!({
            "policy": input.break_policy,
            "break_start": input.break_start.map(|t| t.to_string()),
            "break_end": input.break_end.map(|t| t.to_string())
        }),
        output: serde_json::json!({
            "break_seconds": window.break_seconds,
            "net_seconds": window.net_seconds()
        }),
        reasoning: match break_window {
            Some((start, end)) => format!(
                "Break {}-{} overlaps the shift by {}s",
                start, end, window.break_seconds
            ),
            None => "No break window applies: nothing deducted".to_string(),
        },
    };

    let calendar_step = AuditStep {
        step_number: 3,
        rule_id: "business_day".to_string(),
        rule_name: "Business Day Lookup".to_string(),
        input: serde_json::json!({
            "service_date": input.service_date.to_string(),
            "weekday": input.service_date.format("%A").to_string()
        }),
        output: serde_json::json!({ "is_business_day": is_business_day }),
        reasoning: if *is_business_day {
            format!("{} is a business day", input.service_date)
        } else {
            format!(
                "{} is a weekend day or holiday: all time billed at 100% premium",
                input.service_date
            )
        },
    };

    let classification_step = AuditStep {
        step_number: 4,
        rule_id: "time_classification".to_string(),
        rule_name: "Time Classification".to_string(),
        input: serde_json::json!({
            "net_seconds": window.net_seconds(),
            "normal_window_start": policy.normal_window_start.to_string(),
            "normal_window_end": policy.normal_window_end.to_string()
        }),
        output: serde_json::json!({
            "normal_seconds": classified.normal_seconds,
            "premium_50_seconds": classified.premium_50_seconds,
            "premium_100_seconds": classified.premium_100_seconds
        }),
        reasoning: format!(
            "{}h normal, {}h at 50%, {}h at 100%",
            classified.normal_hours().normalize(),
            classified.premium_50_hours().normalize(),
            classified.premium_100_hours().normalize()
        ),
    };

    let pricing_step = AuditStep {
        step_number: 5,
        rule_id: "pricing".to_string(),
        rule_name: "Service Order Pricing".to_string(),
        input: serde_json::json!({
            "hourly_rate": input.hourly_rate.normalize().to_string(),
            "technician_count": input.technician_count,
            "premium_50_multiplier": policy.premium_50_multiplier.normalize().to_string(),
            "premium_100_multiplier": policy.premium_100_multiplier.normalize().to_string()
        }),
        output: serde_json::Value::Object(
            billing
                .subtotals()
                .iter()
                .map(|(name, value)| {
                    (
                        name.to_string(),
                        serde_json::Value::String(value.normalize().to_string()),
                    )
                })
                .chain(std::iter::once((
                    "total_value".to_string(),
                    serde_json::Value::String(billing.total_value.normalize().to_string()),
                )))
                .collect(),
        ),
        reasoning: format!(
            "Hours R${} + other charges R${} = R${}",
            billing.hours_value().normalize(),
            (billing.total_value - billing.hours_value()).normalize(),
            billing.total_value.normalize()
        ),
    };

    vec![
        window_step,
        break_step,
        calendar_step,
        classification_step,
        pricing_step,
    ]
}

fn audit_warnings(input: &ShiftInput, evaluation: &Evaluation) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();

    if input.start_time == input.end_time {
        warnings.push(AuditWarning {
            code: "FULL_DAY_SHIFT".to_string(),
            message: format!(
                "Start and end are both {}: billed as a 24-hour shift",
                input.start_time
            ),
            severity: "high".to_string(),
        });
    }

    if input.break_window().is_some() && evaluation.window.break_seconds == 0 {
        warnings.push(AuditWarning {
            code: "BREAK_OUTSIDE_SHIFT".to_string(),
            message: "Break window does not overlap the shift and was not deducted".to_string(),
            severity: "low".to_string(),
        });
    }

    if input.break_policy == BreakPolicy::Manual
        && input.break_start.is_some() != input.break_end.is_some()
    {
        warnings.push(AuditWarning {
            code: "INCOMPLETE_BREAK".to_string(),
            message: "Only one break bound was given; no break deducted".to_string(),
            severity: "medium".to_string(),
        });
    }

    warnings
}
