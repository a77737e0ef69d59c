//! Classification of worked seconds into billing buckets.
//!
//! ## Rules
//!
//! **Business days:** time inside the normal window (07:00-17:00 on the start
//! date) is normal; the break is taken out of normal time first; every other
//! net second is premium-50.
//!
//! **Weekends and holidays:** every net second is premium-100.

use crate::models::ClassifiedDuration;

use super::overlap::overlap_seconds;
use super::policy::BillingPolicy;
use super::shift_window::ShiftWindow;

/// Splits the net seconds of a shift into normal, premium-50 and premium-100.
///
/// The business-day answer is for the date the shift starts on, even when it
/// ends on the next day. The normal window is anchored to that same date.
///
/// The buckets always sum to `window.net_seconds()`.
///
/// # Example
///
/// ```
/// use billing_engine::calculation::{classify_shift, normalize_shift, BillingPolicy};
/// use billing_engine::models::ShiftInput;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// // Tuesday 06:00-18:00 with a 12:00-13:00 break
/// let input = ShiftInput::new(
///     NaiveDate::from_ymd_opt(2026, 1, 13).unwrap(),
///     NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
///     Decimal::new(90, 0),
/// )
/// .with_break(
///     NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
/// );
///
/// let classified = classify_shift(&normalize_shift(&input), true, &BillingPolicy::default());
/// assert_eq!(classified.normal_seconds, 9 * 3600);
/// assert_eq!(classified.premium_50_seconds, 2 * 3600);
/// assert_eq!(classified.premium_100_seconds, 0);
/// ```
pub fn classify_shift(
    window: &ShiftWindow,
    is_business_day: bool,
    policy: &BillingPolicy,
) -> ClassifiedDuration {
    let net_seconds = window.net_seconds();

    if !is_business_day {
        return ClassifiedDuration {
            normal_seconds: 0,
            premium_50_seconds: 0,
            premium_100_seconds: net_seconds,
        };
    }

    let day = window.start.date();
    let normal_gross = overlap_seconds(
        window.start,
        window.end,
        day.and_time(policy.normal_window_start),
        day.and_time(policy.normal_window_end),
    );
    let normal_seconds = (normal_gross - window.break_seconds).max(0);

    ClassifiedDuration {
        normal_seconds,
        premium_50_seconds: net_seconds - normal_seconds,
        premium_100_seconds: 0,
    }
}
