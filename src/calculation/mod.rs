//! Calculation logic for the service-order billing engine.
//!
//! This module contains the interval overlap primitive, shift normalisation
//! (midnight rollover and break clipping), business-day calendars, the
//! classification of worked time into normal, premium-50 and premium-100
//! buckets, the monetary pricing of a service order and input validation.

mod business_calendar;
mod classification;
mod engine;
mod overlap;
mod policy;
mod pricing;
mod shift_window;
mod validation;

pub use business_calendar::{
    BusinessCalendar, HolidayTableCalendar, NationalHolidayCalendar, WeekdayCalendar,
    easter_sunday, is_weekday,
};
pub use classification::classify_shift;
pub use engine::{calculate_service_order, classify_and_price, classify_and_price_with_policy};
pub use overlap::overlap_seconds;
pub use policy::{
    BillingPolicy, DEFAULT_NORMAL_WINDOW_END_HOUR, DEFAULT_NORMAL_WINDOW_START_HOUR,
    PREMIUM_50_MULTIPLIER, PREMIUM_100_MULTIPLIER,
};
pub use pricing::{price_lab_service, price_shift};
pub use shift_window::{ShiftWindow, normalize_shift};
pub use validation::validate_shift_input;
