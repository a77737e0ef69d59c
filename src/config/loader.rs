//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading billing
//! configurations from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::calculation::{BillingPolicy, NationalHolidayCalendar};
use crate::error::{EngineError, EngineResult};
use crate::models::BreakPolicy;

use super::types::{BillingConfig, CalendarConfig, CompanyConfig, PolicyConfig, RateTable};

/// Loads and provides access to billing configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query the billing policy, the holiday calendar
/// and the default rates.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/elite_cnc/
/// ├── company.yaml     # Company metadata
/// ├── policy.yaml      # Normal window, multipliers and break policy
/// ├── calendar.yaml    # Region and extra holidays
/// └── rates/
///     └── 2025-01-01.yaml  # Rates effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use billing_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/elite_cnc").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
/// let rates = loader.get_rates(date).unwrap();
/// println!("Hourly rate: R$ {}", rates.hourly_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: BillingConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The policy file describes an invalid billing policy
    ///
    /// # Example
    ///
    /// ```no_run
    /// use billing_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/elite_cnc")?;
    /// # Ok::<(), billing_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let company = Self::load_yaml::<CompanyConfig>(&path.join("company.yaml"))?;
        let policy = Self::load_yaml::<PolicyConfig>(&path.join("policy.yaml"))?;
        policy.billing_policy().validate()?;
        let calendar = Self::load_yaml::<CalendarConfig>(&path.join("calendar.yaml"))?;
        let rates = Self::load_rates(&path.join("rates"))?;

        Ok(Self {
            config: BillingConfig::new(company, policy, calendar, rates),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<RateTable>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                rates.push(Self::load_yaml::<RateTable>(&path)?);
            }
        }

        if rates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    /// Returns the underlying billing configuration.
    pub fn config(&self) -> &BillingConfig {
        &self.config
    }

    /// Returns the company metadata.
    pub fn company(&self) -> &CompanyConfig {
        self.config.company()
    }

    /// Returns the configured billing policy.
    pub fn policy(&self) -> BillingPolicy {
        self.config.policy().billing_policy()
    }

    /// Returns the break policy used when a request does not choose one.
    pub fn default_break_policy(&self) -> BreakPolicy {
        self.config.policy().default_break_policy
    }

    /// Builds the holiday calendar: national holidays plus the configured extras.
    pub fn calendar(&self) -> NationalHolidayCalendar {
        NationalHolidayCalendar::new()
            .with_extra_holidays(self.config.calendar().extra_holidays.clone())
    }

    /// Gets the rate table in force on a given date.
    ///
    /// This is the most recent table whose effective date is on or before
    /// `date`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RateNotFound`] when every table takes effect
    /// after `date`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use billing_engine::config::ConfigLoader;
    /// use chrono::NaiveDate;
    ///
    /// let loader = ConfigLoader::load("./config/elite_cnc")?;
    /// let date = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
    /// let rates = loader.get_rates(date)?;
    /// println!("R$ {}/km", rates.rate_per_km);
    /// # Ok::<(), billing_engine::error::EngineError>(())
    /// ```
    pub fn get_rates(&self, date: NaiveDate) -> EngineResult<&RateTable> {
        self.config
            .rates()
            .iter()
            .rev()
            .find(|table| table.effective_date <= date)
            .ok_or(EngineError::RateNotFound { date })
    }
}
