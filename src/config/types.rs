//! Configuration types for service-order billing.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::BillingPolicy;
use crate::models::{BreakPolicy, PublicHoliday};

/// Metadata about the company issuing the invoices.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyConfig {
    /// The trading name of the company.
    pub name: String,
    /// The company's tax registration number (CNPJ).
    pub tax_id: String,
    /// ISO currency code all values are expressed in.
    pub currency: String,
}

/// Billing rules from policy.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// Start of the normal-hours window on business days.
    pub normal_window_start: NaiveTime,
    /// End of the normal-hours window on business days.
    pub normal_window_end: NaiveTime,
    /// Multiplier for hours outside the window on business days.
    pub premium_50_multiplier: Decimal,
    /// Multiplier for every hour on weekends and holidays.
    pub premium_100_multiplier: Decimal,
    /// Break policy applied when a request does not choose one.
    #[serde(default)]
    pub default_break_policy: BreakPolicy,
}

impl PolicyConfig {
    /// The billing policy described by this file.
    pub fn billing_policy(&self) -> BillingPolicy {
        BillingPolicy {
            normal_window_start: self.normal_window_start,
            normal_window_end: self.normal_window_end,
            premium_50_multiplier: self.premium_50_multiplier,
            premium_100_multiplier: self.premium_100_multiplier,
        }
    }
}

/// Holiday calendar settings from calendar.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// Label of the region the calendar covers (e.g., "BR-SP").
    pub region: String,
    /// Regional or one-off holidays observed on top of the national ones.
    #[serde(default)]
    pub extra_holidays: Vec<PublicHoliday>,
}

/// Default rates effective from a given date.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RateTable {
    /// The effective date for these rates.
    pub effective_date: NaiveDate,
    /// Default rate per technician per normal hour.
    pub hourly_rate: Decimal,
    /// Default rate per kilometre driven.
    pub rate_per_km: Decimal,
}

/// The complete billing configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct BillingConfig {
    company: CompanyConfig,
    policy: PolicyConfig,
    calendar: CalendarConfig,
    /// Rate tables by effective date (sorted oldest first).
    rates: Vec<RateTable>,
}

impl BillingConfig {
    /// Creates a new BillingConfig from its component parts.
    pub fn new(
        company: CompanyConfig,
        policy: PolicyConfig,
        calendar: CalendarConfig,
        rates: Vec<RateTable>,
    ) -> Self {
        let mut sorted_rates = rates;
        sorted_rates.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            company,
            policy,
            calendar,
            rates: sorted_rates,
        }
    }

    /// Returns the company metadata.
    pub fn company(&self) -> &CompanyConfig {
        &self.company
    }

    /// Returns the policy configuration.
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Returns the calendar configuration.
    pub fn calendar(&self) -> &CalendarConfig {
        &self.calendar
    }

    /// Returns all rate tables, oldest first.
    pub fn rates(&self) -> &[RateTable] {
        &self.rates
    }
}
