//! Classified worked time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const SECONDS_PER_HOUR: i64 = 3600;

/// Net worked seconds split into the three billing buckets.
///
/// On a business day only `normal_seconds` and `premium_50_seconds` are used;
/// on weekends and holidays every net second is `premium_100_seconds`.
///
/// # Example
///
/// ```
/// use billing_engine::models::ClassifiedDuration;
/// use rust_decimal::Decimal;
///
/// let classified = ClassifiedDuration {
///     normal_seconds: 8 * 3600,
///     premium_50_seconds: 1800,
///     premium_100_seconds: 0,
/// };
/// assert_eq!(classified.total_seconds(), 8 * 3600 + 1800);
/// assert_eq!(classified.premium_50_hours(), Decimal::new(5, 1));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedDuration {
    /// Seconds billed at the normal rate.
    pub normal_seconds: i64,
    /// Seconds billed at the 50% premium.
    pub premium_50_seconds: i64,
    /// Seconds billed at the 100% premium.
    pub premium_100_seconds: i64,
}

impl ClassifiedDuration {
    /// Sum of the three buckets; equals the net shift seconds.
    pub fn total_seconds(&self) -> i64 {
        self.normal_seconds + self.premium_50_seconds + self.premium_100_seconds
    }

    /// Normal seconds expressed in hours.
    pub fn normal_hours(&self) -> Decimal {
        to_hours(self.normal_seconds)
    }

    /// Premium-50 seconds expressed in hours.
    pub fn premium_50_hours(&self) -> Decimal {
        to_hours(self.premium_50_seconds)
    }

    /// Premium-100 seconds expressed in hours.
    pub fn premium_100_hours(&self) -> Decimal {
        to_hours(self.premium_100_seconds)
    }
}

fn to_hours(seconds: i64) -> Decimal {
    Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR)
}
