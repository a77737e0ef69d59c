//! Shift input model and break policy.
//!
//! This module defines the [`ShiftInput`] submitted once per service order and
//! the [`BreakPolicy`] that decides which break window, if any, is deducted.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Decides how the break deducted from a shift is obtained.
///
/// # Example
///
/// ```
/// use billing_engine::models::BreakPolicy;
///
/// assert_eq!(BreakPolicy::default(), BreakPolicy::Manual);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BreakPolicy {
    /// Use the break window entered with the shift, when both bounds are present
    /// and the end is after the start.
    #[default]
    Manual,
    /// Always deduct a fixed window (for example a 12:00-13:00 lunch), clipped
    /// to the part that falls inside the shift.
    Automatic {
        /// Start of the fixed break window.
        start: NaiveTime,
        /// End of the fixed break window.
        end: NaiveTime,
    },
    /// Never deduct a break.
    #[serde(rename = "none")]
    NoDeduction,
}

/// The inputs of a single service-order hours calculation.
///
/// Times are wall-clock times without a time zone. When `end_time` is not after
/// `start_time` the shift is read as crossing midnight.
///
/// # Example
///
/// ```
/// use billing_engine::models::ShiftInput;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let input = ShiftInput::new(
///     NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     Decimal::new(90, 0),
/// )
/// .with_technicians(2);
///
/// assert_eq!(input.technician_count, 2);
/// assert!(!input.crosses_midnight());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftInput {
    /// Calendar date of the attendance (the date the shift starts on).
    pub service_date: NaiveDate,
    /// Wall-clock time the service started.
    pub start_time: NaiveTime,
    /// Wall-clock time the service ended.
    pub end_time: NaiveTime,
    /// Start of the manual break window.
    #[serde(default)]
    pub break_start: Option<NaiveTime>,
    /// End of the manual break window.
    #[serde(default)]
    pub break_end: Option<NaiveTime>,
    /// How the deducted break is chosen.
    #[serde(default)]
    pub break_policy: BreakPolicy,
    /// Number of technicians on the job; multiplies hour values and transport.
    pub technician_count: u32,
    /// Rate per technician per normal hour.
    pub hourly_rate: Decimal,
    /// Kilometres driven.
    #[serde(default)]
    pub distance_km: Decimal,
    /// Rate charged per kilometre.
    #[serde(default)]
    pub rate_per_km: Decimal,
    /// Meal expenses passed through to the customer.
    #[serde(default)]
    pub meal_value: Decimal,
    /// Parts sold on the job.
    #[serde(default)]
    pub parts_value: Decimal,
    /// Tolls paid on the way.
    #[serde(default)]
    pub toll_value: Decimal,
    /// Transportation charged per technician.
    #[serde(default)]
    pub transport_value_per_technician: Decimal,
    /// Laboratory fee.
    #[serde(default)]
    pub lab_value: Decimal,
}

impl ShiftInput {
    /// Creates an input for one technician with no break and no extra charges.
    pub fn new(
        service_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        hourly_rate: Decimal,
    ) -> Self {
        Self {
            service_date,
            start_time,
            end_time,
            break_start: None,
            break_end: None,
            break_policy: BreakPolicy::Manual,
            technician_count: 1,
            hourly_rate,
            distance_km: Decimal::ZERO,
            rate_per_km: Decimal::ZERO,
            meal_value: Decimal::ZERO,
            parts_value: Decimal::ZERO,
            toll_value: Decimal::ZERO,
            transport_value_per_technician: Decimal::ZERO,
            lab_value: Decimal::ZERO,
        }
    }

    /// Sets a manual break window.
    pub fn with_break(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.break_start = Some(start);
        self.break_end = Some(end);
        self
    }

    /// Sets the number of technicians.
    pub fn with_technicians(mut self, count: u32) -> Self {
        self.technician_count = count;
        self
    }

    /// Sets the break policy.
    pub fn with_break_policy(mut self, policy: BreakPolicy) -> Self {
        self.break_policy = policy;
        self
    }

    /// Returns `true` when the end time is not after the start time.
    ///
    /// A shift whose start and end are equal also counts as crossing midnight
    /// and lasts a full 24 hours.
    pub fn crosses_midnight(&self) -> bool {
        self.end_time <= self.start_time
    }

    /// The start of the shift as a full timestamp.
    pub fn start_timestamp(&self) -> NaiveDateTime {
        self.service_date.and_time(self.start_time)
    }

    /// The end of the shift as a full timestamp, advanced by a day when the
    /// shift crosses midnight.
    pub fn end_timestamp(&self) -> NaiveDateTime {
        let end = self.service_date.and_time(self.end_time);
        if self.crosses_midnight() {
            end + chrono::Duration::days(1)
        } else {
            end
        }
    }

    /// The break window to deduct under the input's policy, if any.
    ///
    /// Windows whose end is not after their start are ignored.
    pub fn break_window(&self) -> Option<(NaiveTime, NaiveTime)> {
        let (start, end) = match self.break_policy {
            BreakPolicy::Manual => (self.break_start?, self.break_end?),
            BreakPolicy::Automatic { start, end } => (start, end),
            BreakPolicy::NoDeduction => return None,
        };
        (end > start).then_some((start, end))
    }
}
