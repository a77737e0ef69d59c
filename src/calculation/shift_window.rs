//! Shift window normalisation.
//!
//! Turns the wall-clock times of a [`ShiftInput`] into full timestamps, rolls
//! the end over midnight when needed and clips the break to the shift.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::ShiftInput;

use super::overlap::overlap_seconds;

/// A shift laid out on the timeline, with its break already clipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    /// Start of the shift.
    pub start: NaiveDateTime,
    /// End of the shift; strictly after `start`.
    pub end: NaiveDateTime,
    /// `end - start` in seconds.
    pub gross_seconds: i64,
    /// Seconds of break that fall inside the shift.
    pub break_seconds: i64,
}

impl ShiftWindow {
    /// Worked seconds after the break is deducted; never negative.
    pub fn net_seconds(&self) -> i64 {
        self.gross_seconds - self.break_seconds
    }

    /// Returns `true` when the shift ends on a later date than it starts.
    pub fn crosses_midnight(&self) -> bool {
        self.end.date() > self.start.date()
    }
}

/// Lays a shift out on the timeline.
///
/// The break window (chosen by the input's break policy) is anchored to the
/// service date and only the part of it inside the shift is counted.
///
/// # Example
///
/// ```
/// use billing_engine::calculation::normalize_shift;
/// use billing_engine::models::ShiftInput;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let input = ShiftInput::new(
///     NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
///     NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
///     Decimal::new(90, 0),
/// );
///
/// let window = normalize_shift(&input);
/// assert!(window.crosses_midnight());
/// assert_eq!(window.gross_seconds, 8 * 3600);
/// ```
pub fn normalize_shift(input: &ShiftInput) -> ShiftWindow {
    let start = input.start_timestamp();
    let end = input.end_timestamp();

    let break_seconds = input
        .break_window()
        .map(|(break_start, break_end)| {
            overlap_seconds(
                start,
                end,
                input.service_date.and_time(break_start),
                input.service_date.and_time(break_end),
            )
        })
        .unwrap_or(0);

    ShiftWindow {
        start,
        end,
        gross_seconds: (end - start).num_seconds(),
        break_seconds,
    }
}
