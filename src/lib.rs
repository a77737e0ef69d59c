//! Hours and billing engine for technical service orders.
//!
//! This crate classifies the time worked on a field-service attendance into
//! normal, 50% premium and 100% premium hours, using a business-day calendar
//! for weekends and Brazilian public holidays, and prices the service order
//! from those hours plus mileage and pass-through expenses.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
