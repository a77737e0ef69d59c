//! Application state for the billing engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::{BillingPolicy, BusinessCalendar};
use crate::config::ConfigLoader;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded configuration and the business-day calendar built from it.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    calendar: Arc<dyn BusinessCalendar>,
}

impl AppState {
    /// Creates a new application state using the configured holiday calendar.
    pub fn new(config: ConfigLoader) -> Self {
        let calendar = Arc::new(config.calendar());
        Self::with_calendar(config, calendar)
    }

    /// Creates a new application state with an explicit calendar.
    pub fn with_calendar(config: ConfigLoader, calendar: Arc<dyn BusinessCalendar>) -> Self {
        Self {
            config: Arc::new(config),
            calendar,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the business-day calendar.
    pub fn calendar(&self) -> &dyn BusinessCalendar {
        self.calendar.as_ref()
    }

    /// Returns the configured billing policy.
    pub fn policy(&self) -> BillingPolicy {
        self.config.policy()
    }
}
