//! Monetary breakdown of a service order.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The line-item monetary breakdown handed to the persistence layer.
///
/// `total_value` is always the literal sum of the nine subtotals; no fixed fee
/// or rounding is hidden in it.
///
/// # Example
///
/// ```
/// use billing_engine::models::BillingResult;
/// use rust_decimal::Decimal;
///
/// let billing = BillingResult::from_subtotals(
///     Decimal::new(810, 0),
///     Decimal::ZERO,
///     Decimal::ZERO,
///     Decimal::new(230, 0),
///     Decimal::ZERO,
///     Decimal::ZERO,
///     Decimal::ZERO,
///     Decimal::ZERO,
///     Decimal::ZERO,
/// )
/// .unwrap();
/// assert_eq!(billing.total_value, Decimal::new(1040, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingResult {
    /// Normal hours × rate × technicians.
    pub normal_hours_value: Decimal,
    /// Premium-50 hours × rate × 1.5 × technicians.
    pub premium_50_value: Decimal,
    /// Premium-100 hours × rate × 2.0 × technicians.
    pub premium_100_value: Decimal,
    /// Distance × rate per kilometre.
    pub km_value: Decimal,
    /// Meal expenses.
    pub meal_value: Decimal,
    /// Parts sold.
    pub parts_value: Decimal,
    /// Tolls.
    pub toll_value: Decimal,
    /// Transportation per technician × technicians.
    pub transport_total: Decimal,
    /// Laboratory fee.
    pub lab_value: Decimal,
    /// Sum of all of the above.
    pub total_value: Decimal,
}

impl BillingResult {
    /// Builds a result from its nine subtotals, computing the total forward.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] on `total_value` when the sum does
    /// not fit in a `Decimal`.
    #[allow(clippy::too_many_arguments)]
    pub fn from_subtotals(
        normal_hours_value: Decimal,
        premium_50_value: Decimal,
        premium_100_value: Decimal,
        km_value: Decimal,
        meal_value: Decimal,
        parts_value: Decimal,
        toll_value: Decimal,
        transport_total: Decimal,
        lab_value: Decimal,
    ) -> EngineResult<Self> {
        let mut result = Self {
            normal_hours_value,
            premium_50_value,
            premium_100_value,
            km_value,
            meal_value,
            parts_value,
            toll_value,
            transport_total,
            lab_value,
            total_value: Decimal::ZERO,
        };
        result.total_value = result.checked_total()?;
        Ok(result)
    }

    fn checked_total(&self) -> EngineResult<Decimal> {
        self.subtotals()
            .iter()
            .try_fold(Decimal::ZERO, |total, (_, value)| total.checked_add(*value))
            .ok_or_else(|| EngineError::invalid_input("total_value", "value too large"))
    }

    /// The nine named subtotals in display order.
    pub fn subtotals(&self) -> [(&'static str, Decimal); 9] {
        [
            ("normal_hours_value", self.normal_hours_value),
            ("premium_50_value", self.premium_50_value),
            ("premium_100_value", self.premium_100_value),
            ("km_value", self.km_value),
            ("meal_value", self.meal_value),
            ("parts_value", self.parts_value),
            ("toll_value", self.toll_value),
            ("transport_total", self.transport_total),
            ("lab_value", self.lab_value),
        ]
    }

    /// Combined value of the three hour buckets.
    pub fn hours_value(&self) -> Decimal {
        self.normal_hours_value
            .saturating_add(self.premium_50_value)
            .saturating_add(self.premium_100_value)
    }

    /// A copy with every subtotal rounded to cents for storage.
    ///
    /// The total is the sum of the rounded subtotals, so a stored row stays
    /// additive. It may differ by a few cents from the exact total rounded.
    pub fn rounded(&self) -> EngineResult<Self> {
        let round = |value: Decimal| {
            value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        };
        let mut result = Self {
            normal_hours_value: round(self.normal_hours_value),
            premium_50_value: round(self.premium_50_value),
            premium_100_value: round(self.premium_100_value),
            km_value: round(self.km_value),
            meal_value: round(self.meal_value),
            parts_value: round(self.parts_value),
            toll_value: round(self.toll_value),
            transport_total: round(self.transport_total),
            lab_value: round(self.lab_value),
            total_value: Decimal::ZERO,
        };
        result.total_value = result.checked_total()?;
        Ok(result)
    }
}
