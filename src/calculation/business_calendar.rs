//! Business-day calendars.
//!
//! The engine never decides on its own whether a date is a business day; it
//! asks an injected [`BusinessCalendar`]. A business day is a weekday
//! (Monday to Friday) that is not a listed holiday.
//!
//! Three calendars are provided:
//! - [`NationalHolidayCalendar`] computes Brazilian national holidays per year,
//!   including Good Friday from the date of Easter, plus any extra dates.
//! - [`HolidayTableCalendar`] answers from a fixed table covering known years.
//! - [`WeekdayCalendar`] applies the weekday rule only.

use std::collections::{BTreeSet, HashSet};

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::error::{EngineError, EngineResult};
use crate::models::PublicHoliday;

/// Answers whether a date is a business day.
///
/// Implementations must be side-effect free. A calendar that cannot answer
/// returns [`EngineError::CalendarUnavailable`] instead of guessing.
pub trait BusinessCalendar: Send + Sync {
    /// Returns `true` when `date` is a weekday that is not a holiday.
    fn is_business_day(&self, date: NaiveDate) -> EngineResult<bool>;
}

/// Returns `true` for Monday through Friday.
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Calendar that treats every weekday as a business day.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekdayCalendar;

impl BusinessCalendar for WeekdayCalendar {
    fn is_business_day(&self, date: NaiveDate) -> EngineResult<bool> {
        Ok(is_weekday(date))
    }
}

/// Returns the date of Easter Sunday in the Gregorian calendar.
///
/// Uses the anonymous Gregorian computus (Meeus/Jones/Butcher).
///
/// # Example
///
/// ```
/// use billing_engine::calculation::easter_sunday;
/// use chrono::NaiveDate;
///
/// assert_eq!(easter_sunday(2026), NaiveDate::from_ymd_opt(2026, 4, 5));
/// ```
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// Brazilian national holidays, computed per year.
///
/// Includes New Year's Day, Good Friday, Tiradentes, Labour Day,
/// Independence Day, Nossa Senhora Aparecida (from 1980), All Souls' Day,
/// Republic Day, Black Consciousness Day (from 2024) and Christmas. Regional
/// holidays can be layered on with [`NationalHolidayCalendar::with_extra_holidays`].
///
/// # Example
///
/// ```
/// use billing_engine::calculation::{BusinessCalendar, NationalHolidayCalendar};
/// use chrono::NaiveDate;
///
/// let calendar = NationalHolidayCalendar::new();
///
/// // Tiradentes, a Tuesday
/// let holiday = NaiveDate::from_ymd_opt(2026, 4, 21).unwrap();
/// assert!(!calendar.is_business_day(holiday).unwrap());
///
/// // An ordinary Tuesday
/// let tuesday = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
/// assert!(calendar.is_business_day(tuesday).unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct NationalHolidayCalendar {
    extra_holidays: Vec<PublicHoliday>,
}

impl NationalHolidayCalendar {
    /// First year whose holiday rules are modelled.
    pub const FIRST_SUPPORTED_YEAR: i32 = 1980;

    /// Creates a calendar with national holidays only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds regional or one-off holidays on top of the national ones.
    pub fn with_extra_holidays(mut self, holidays: Vec<PublicHoliday>) -> Self {
        self.extra_holidays.extend(holidays);
        self
    }

    /// Lists the national holidays of a year, in date order.
    ///
    /// Returns `None` when the year is outside the modelled range.
    pub fn national_holidays(year: i32) -> Option<Vec<PublicHoliday>> {
        if year < Self::FIRST_SUPPORTED_YEAR {
            return None;
        }

        let fixed = |month: u32, day: u32, name: &str| {
            NaiveDate::from_ymd_opt(year, month, day).map(|date| PublicHoliday::national(date, name))
        };

        let good_friday = easter_sunday(year)
            .map(|easter| PublicHoliday::national(easter - Duration::days(2), "Sexta-feira Santa"));

        let mut holidays: Vec<PublicHoliday> = [
            fixed(1, 1, "Confraternização Universal"),
            good_friday,
            fixed(4, 21, "Tiradentes"),
            fixed(5, 1, "Dia do Trabalhador"),
            fixed(9, 7, "Independência do Brasil"),
            fixed(10, 12, "Nossa Senhora Aparecida"),
            fixed(11, 2, "Finados"),
            fixed(11, 15, "Proclamação da República"),
            (year >= 2024)
                .then(|| fixed(11, 20, "Dia Nacional de Zumbi e da Consciência Negra"))
                .flatten(),
            fixed(12, 25, "Natal"),
        ]
        .into_iter()
        .flatten()
        .collect();

        holidays.sort_by_key(|h| h.date);
        Some(holidays)
    }

    /// Returns the holiday falling on `date`, if any.
    pub fn holiday_on(&self, date: NaiveDate) -> EngineResult<Option<PublicHoliday>> {
        if let Some(extra) = self.extra_holidays.iter().find(|h| h.date == date) {
            return Ok(Some(extra.clone()));
        }

        let national = Self::national_holidays(date.year()).ok_or_else(|| {
            EngineError::CalendarUnavailable {
                date,
                message: format!(
                    "holiday rules not defined before {}",
                    Self::FIRST_SUPPORTED_YEAR
                ),
            }
        })?;

        Ok(national.into_iter().find(|h| h.date == date))
    }
}

impl BusinessCalendar for NationalHolidayCalendar {
    fn is_business_day(&self, date: NaiveDate) -> EngineResult<bool> {
        // Checked first so unsupported years fail even on weekends.
        let holiday = self.holiday_on(date)?;
        Ok(is_weekday(date) && holiday.is_none())
    }
}

/// Calendar backed by a fixed holiday table.
///
/// The table states which years it covers; dates in any other year cannot be
/// classified and return [`EngineError::CalendarUnavailable`].
///
/// # Example
///
/// ```
/// use billing_engine::calculation::{BusinessCalendar, HolidayTableCalendar};
/// use billing_engine::models::PublicHoliday;
/// use chrono::NaiveDate;
///
/// let carnival = NaiveDate::from_ymd_opt(2026, 2, 17).unwrap();
/// let calendar = HolidayTableCalendar::from_holidays(vec![
///     PublicHoliday::national(carnival, "Carnaval"),
/// ]);
///
/// assert!(!calendar.is_business_day(carnival).unwrap());
/// assert!(calendar.is_business_day(NaiveDate::from_ymd_opt(2027, 2, 9).unwrap()).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct HolidayTableCalendar {
    holidays: HashSet<NaiveDate>,
    covered_years: BTreeSet<i32>,
}

impl HolidayTableCalendar {
    /// Creates a calendar covering exactly `covered_years`.
    pub fn new(holidays: Vec<PublicHoliday>, covered_years: impl IntoIterator<Item = i32>) -> Self {
        Self {
            holidays: holidays.into_iter().map(|h| h.date).collect(),
            covered_years: covered_years.into_iter().collect(),
        }
    }

    /// Creates a calendar covering every year that appears in the table.
    pub fn from_holidays(holidays: Vec<PublicHoliday>) -> Self {
        let years: Vec<i32> = holidays.iter().map(|h| h.date.year()).collect();
        Self::new(holidays, years)
    }

    /// The years this table can answer for.
    pub fn covered_years(&self) -> impl Iterator<Item = i32> + '_ {
        self.covered_years.iter().copied()
    }
}

impl BusinessCalendar for HolidayTableCalendar {
    fn is_business_day(&self, date: NaiveDate) -> EngineResult<bool> {
        if !self.covered_years.contains(&date.year()) {
            return Err(EngineError::CalendarUnavailable {
                date,
                message: format!("holiday table does not cover {}", date.year()),
            });
        }
        Ok(is_weekday(date) && !self.holidays.contains(&date))
    }
}
