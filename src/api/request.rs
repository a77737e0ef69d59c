//! Request types for the billing engine API.
//!
//! This module defines the JSON request structures for the `/calculate`
//! endpoints. Blank monetary fields default to zero; rates left out are taken
//! from the rate table in force on the service date.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{BreakPolicy, ServiceOrder, ShiftInput};

/// Request body for the `/calculate` and `/calculate/record` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Descriptive data about the service order.
    #[serde(default)]
    pub order: ServiceOrder,
    /// The attendance to price.
    pub shift: ShiftRequest,
}

/// Shift information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRequest {
    /// The date the attendance started.
    pub service_date: NaiveDate,
    /// Wall-clock start time.
    pub start_time: NaiveTime,
    /// Wall-clock end time; not after `start_time` means the next day.
    pub end_time: NaiveTime,
    /// Start of the manual break.
    #[serde(default)]
    pub break_start: Option<NaiveTime>,
    /// End of the manual break.
    #[serde(default)]
    pub break_end: Option<NaiveTime>,
    /// Break policy; the configured default is used when omitted.
    #[serde(default)]
    pub break_policy: Option<BreakPolicy>,
    /// Number of technicians on the job.
    pub technician_count: u32,
    /// Rate per technician per hour; the rate table's when omitted.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// Kilometres driven.
    #[serde(default)]
    pub distance_km: Decimal,
    /// Rate per kilometre; the rate table's when omitted.
    #[serde(default)]
    pub rate_per_km: Option<Decimal>,
    /// Meal expenses.
    #[serde(default)]
    pub meal_value: Decimal,
    /// Parts sold.
    #[serde(default)]
    pub parts_value: Decimal,
    /// Tolls paid.
    #[serde(default)]
    pub toll_value: Decimal,
    /// Transportation charged per technician.
    #[serde(default)]
    pub transport_value_per_technician: Decimal,
    /// Laboratory fee.
    #[serde(default)]
    pub lab_value: Decimal,
}

impl ShiftRequest {
    /// Returns `true` when a rate must be looked up in the rate table.
    pub fn needs_rate_table(&self) -> bool {
        self.hourly_rate.is_none() || self.rate_per_km.is_none()
    }

    /// Converts the request into engine input.
    ///
    /// `default_hourly_rate` and `default_rate_per_km` fill in whichever
    /// rate the request left out.
    pub fn into_shift_input(
        self,
        default_hourly_rate: Decimal,
        default_rate_per_km: Decimal,
        default_break_policy: BreakPolicy,
    ) -> ShiftInput {
        ShiftInput {
            service_date: self.service_date,
            start_time: self.start_time,
            end_time: self.end_time,
            break_start: self.break_start,
            break_end: self.break_end,
            break_policy: self.break_policy.unwrap_or(default_break_policy),
            technician_count: self.technician_count,
            hourly_rate: self.hourly_rate.unwrap_or(default_hourly_rate),
            distance_km: self.distance_km,
            rate_per_km: self.rate_per_km.unwrap_or(default_rate_per_km),
            meal_value: self.meal_value,
            parts_value: self.parts_value,
            toll_value: self.toll_value,
            transport_value_per_technician: self.transport_value_per_technician,
            lab_value: self.lab_value,
        }
    }
}

/// Request body for the `/calculate/lab` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabServiceRequest {
    /// Descriptive data about the service order.
    #[serde(default)]
    pub order: ServiceOrder,
    /// The date the bench service was done.
    pub service_date: NaiveDate,
    /// Laboratory fee.
    #[serde(default)]
    pub lab_value: Decimal,
    /// Parts used.
    #[serde(default)]
    pub parts_value: Decimal,
}
