//! Public holiday model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A public holiday on which every worked hour is billed at the 100% premium.
///
/// Holidays are tracked per region so municipal or state holidays can be
/// added on top of the national calendar.
///
/// # Example
///
/// ```
/// use billing_engine::models::PublicHoliday;
/// use chrono::NaiveDate;
///
/// let holiday = PublicHoliday {
///     date: NaiveDate::from_ymd_opt(2026, 4, 21).unwrap(),
///     name: "Tiradentes".to_string(),
///     region: "national".to_string(),
/// };
/// assert!(holiday.is_national());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
    /// The region where this holiday applies (e.g., "national", "SP").
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    "national".to_string()
}

impl PublicHoliday {
    /// Creates a national holiday.
    pub fn national(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
            region: default_region(),
        }
    }

    /// Returns `true` for holidays observed nationwide.
    pub fn is_national(&self) -> bool {
        self.region == "national"
    }
}
