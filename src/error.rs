//! Error types for the billing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that can stop a service-order calculation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the billing engine.
///
/// All fallible operations in the engine return this error type, so callers
/// can decide on user-facing messaging in a single place.
///
/// # Example
///
/// ```
/// use billing_engine::error::EngineError;
///
/// let error = EngineError::InvalidInput {
///     field: "technician_count".to_string(),
///     message: "must be at least 1".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid input 'technician_count': must be at least 1"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A shift input violated a precondition of the engine.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The input field that was rejected.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The business-day calendar could not answer for a date.
    #[error("Business calendar unavailable for {date}: {message}")]
    CalendarUnavailable {
        /// The date that was queried.
        date: NaiveDate,
        /// Why the calendar could not answer.
        message: String,
    },

    /// The billing policy (normal window, multipliers) is inconsistent.
    #[error("Invalid billing policy: {message}")]
    InvalidPolicy {
        /// A description of the inconsistency.
        message: String,
    },

    /// No default rate table is effective for the given date.
    #[error("Rate table not found for date {date}")]
    RateNotFound {
        /// The service date for which a rate was requested.
        date: NaiveDate,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
