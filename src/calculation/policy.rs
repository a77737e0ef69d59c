//! Billing policy: the normal-hours window and the premium multipliers.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Hour the normal-hours window opens on business days.
pub const DEFAULT_NORMAL_WINDOW_START_HOUR: u32 = 7;

/// Hour the normal-hours window closes on business days.
pub const DEFAULT_NORMAL_WINDOW_END_HOUR: u32 = 17;

/// Multiplier applied to premium-50 hours (150%).
pub const PREMIUM_50_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Multiplier applied to premium-100 hours (200%).
pub const PREMIUM_100_MULTIPLIER: Decimal = Decimal::from_parts(20, 0, 0, false, 1);

/// The rules used to classify and price worked time.
///
/// # Example
///
/// ```
/// use billing_engine::calculation::BillingPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = BillingPolicy::default();
/// assert_eq!(policy.premium_50_multiplier, Decimal::new(15, 1));
/// assert!(policy.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPolicy {
    /// Start of the normal-hours window on business days.
    pub normal_window_start: NaiveTime,
    /// End of the normal-hours window on business days.
    pub normal_window_end: NaiveTime,
    /// Multiplier for hours outside the window on business days.
    pub premium_50_multiplier: Decimal,
    /// Multiplier for every hour on weekends and holidays.
    pub premium_100_multiplier: Decimal,
}

impl Default for BillingPolicy {
    fn default() -> Self {
        Self {
            normal_window_start: NaiveTime::from_hms_opt(DEFAULT_NORMAL_WINDOW_START_HOUR, 0, 0)
                .expect("Valid window start time"),
            normal_window_end: NaiveTime::from_hms_opt(DEFAULT_NORMAL_WINDOW_END_HOUR, 0, 0)
                .expect("Valid window end time"),
            premium_50_multiplier: PREMIUM_50_MULTIPLIER,
            premium_100_multiplier: PREMIUM_100_MULTIPLIER,
        }
    }
}

impl BillingPolicy {
    /// Checks that the window is ordered and no multiplier discounts time.
    pub fn validate(&self) -> EngineResult<()> {
        if self.normal_window_end <= self.normal_window_start {
            return Err(EngineError::InvalidPolicy {
                message: format!(
                    "normal window end {} must be after start {}",
                    self.normal_window_end, self.normal_window_start
                ),
            });
        }

        for (name, multiplier) in [
            ("premium_50_multiplier", self.premium_50_multiplier),
            ("premium_100_multiplier", self.premium_100_multiplier),
        ] {
            if multiplier < Decimal::ONE {
                return Err(EngineError::InvalidPolicy {
                    message: format!("{} must be at least 1, got {}", name, multiplier),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_matches_business_rules() {
        let policy = BillingPolicy::default();
        assert_eq!(policy.normal_window_start, NaiveTime::from_hms_opt(7, 0, 0).unwrap());
        assert_eq!(policy.normal_window_end, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        assert_eq!(policy.premium_50_multiplier, Decimal::new(15, 1));
        assert_eq!(policy.premium_100_multiplier, Decimal::from(2));
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        let policy = BillingPolicy {
            normal_window_start: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            normal_window_end: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            ..Default::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(EngineError::InvalidPolicy { .. })
        ));
    }

    #[test]
    fn test_discounting_multiplier_is_rejected() {
        let policy = BillingPolicy {
            premium_100_multiplier: Decimal::new(9, 1),
            ..Default::default()
        };
        let err = policy.validate().unwrap_err();
        assert!(err.to_string().contains("premium_100_multiplier"));
    }
}
