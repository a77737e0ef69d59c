//! Configuration loading and management for the billing engine.
//!
//! This module provides functionality to load billing configurations from YAML
//! files, including company metadata, the billing policy, the holiday calendar
//! and effective-dated default rates.
//!
//! # Example
//!
//! ```no_run
//! use billing_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/elite_cnc").unwrap();
//! println!("Loaded company: {}", config.company().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BillingConfig, CalendarConfig, CompanyConfig, PolicyConfig, RateTable};
