use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::{APPROVAL_TENURES, QUICK_TENURES};
use crate::{types::*, BuyoutFinanceError, BuyoutFinanceResult};

/// Lender-side limits an approval must respect. Missing fields in a policy
/// file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LendingPolicy {
    /// Charged on the approved amount, e.g. 2 for 2%.
    pub processing_fee_percent: Percent,
    pub min_approved_amount: Money,
    /// Approved amounts move in these increments above `min_approved_amount`.
    pub amount_step: Money,
    pub min_rate_percent: Percent,
    pub max_rate_percent: Percent,
    /// Reviewer overrides must land on this grid above `min_rate_percent`.
    pub rate_step_percent: Percent,
    pub min_tenure_months: Months,
    pub max_tenure_months: Months,
    /// Tenures a reviewer may pick; each must lie within the min/max.
    pub tenure_options: Vec<Months>,
    /// Rate used for calculator quotes before a lender prices the loan.
    pub calculator_rate_percent: Percent,
    pub quick_tenures: Vec<Months>,
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self {
            processing_fee_percent: dec!(2),
            min_approved_amount: dec!(10_000),
            amount_step: dec!(1000),
            min_rate_percent: dec!(8),
            max_rate_percent: dec!(24),
            rate_step_percent: dec!(0.5),
            min_tenure_months: 6,
            max_tenure_months: 24,
            tenure_options: APPROVAL_TENURES.to_vec(),
            calculator_rate_percent: dec!(12),
            quick_tenures: QUICK_TENURES.to_vec(),
        }
    }
}

impl LendingPolicy {
    pub fn validate(&self) -> BuyoutFinanceResult<()> {
        if self.processing_fee_percent < Decimal::ZERO || self.processing_fee_percent > dec!(100) {
            return Err(BuyoutFinanceError::invalid(
                "processing_fee_percent",
                "Processing fee must be between 0% and 100%.",
            ));
        }
        if self.min_approved_amount <= Decimal::ZERO {
            return Err(BuyoutFinanceError::invalid(
                "min_approved_amount",
                "Minimum approved amount must be positive.",
            ));
        }
        if self.amount_step <= Decimal::ZERO {
            return Err(BuyoutFinanceError::invalid(
                "amount_step",
                "Amount step must be positive.",
            ));
        }
        if self.min_rate_percent < Decimal::ZERO {
            return Err(BuyoutFinanceError::invalid(
                "min_rate_percent",
                "Minimum rate cannot be negative.",
            ));
        }
        if self.max_rate_percent < self.min_rate_percent {
            return Err(BuyoutFinanceError::invalid(
                "max_rate_percent",
                "Maximum rate must not be below the minimum rate.",
            ));
        }
        if self.rate_step_percent <= Decimal::ZERO {
            return Err(BuyoutFinanceError::invalid(
                "rate_step_percent",
                "Rate step must be positive.",
            ));
        }
        if self.min_tenure_months == 0 {
            return Err(BuyoutFinanceError::invalid(
                "min_tenure_months",
                "Minimum tenure must be at least 1 month.",
            ));
        }
        if self.max_tenure_months < self.min_tenure_months {
            return Err(BuyoutFinanceError::invalid(
                "max_tenure_months",
                "Maximum tenure must not be below the minimum tenure.",
            ));
        }
        if self.tenure_options.is_empty()
            || self
                .tenure_options
                .iter()
                .any(|t| *t < self.min_tenure_months || *t > self.max_tenure_months)
        {
            return Err(BuyoutFinanceError::invalid(
                "tenure_options",
                "Tenure options must be a non-empty list within the tenure bounds.",
            ));
        }
        if self.calculator_rate_percent < Decimal::ZERO {
            return Err(BuyoutFinanceError::invalid(
                "calculator_rate_percent",
                "Calculator rate cannot be negative.",
            ));
        }
        if self.quick_tenures.is_empty() || self.quick_tenures.contains(&0) {
            return Err(BuyoutFinanceError::invalid(
                "quick_tenures",
                "Quick tenures must be a non-empty list of positive months.",
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON policy document.
    pub fn from_json_str(json: &str) -> BuyoutFinanceResult<Self> {
        let policy: LendingPolicy = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Pull a rate into the policy's allowed range.
    pub fn clamp_rate(&self, rate: Percent) -> Percent {
        rate.max(self.min_rate_percent).min(self.max_rate_percent)
    }

    pub fn rate_on_grid(&self, rate: Percent) -> bool {
        ((rate - self.min_rate_percent) % self.rate_step_percent).is_zero()
    }

    pub fn amount_on_grid(&self, amount: Money) -> bool {
        ((amount - self.min_approved_amount) % self.amount_step).is_zero()
    }

    pub fn allows_tenure(&self, tenure_months: Months) -> bool {
        self.tenure_options.contains(&tenure_months)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_policy_is_valid() {
        LendingPolicy::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let policy = LendingPolicy::from_json_str(r#"{"processing_fee_percent": "1.5"}"#).unwrap();
        assert_eq!(policy.processing_fee_percent, dec!(1.5));
        assert_eq!(policy.max_tenure_months, 24);
        assert_eq!(policy.quick_tenures, vec![6, 12, 24]);
    }

    #[test]
    fn test_inverted_rate_range_rejected() {
        let err = LendingPolicy::from_json_str(r#"{"min_rate_percent": "20", "max_rate_percent": "10"}"#)
            .unwrap_err();
        assert_eq!(err.field(), Some("max_rate_percent"));
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = LendingPolicy::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, BuyoutFinanceError::Serialization(_)));
    }

    #[test]
    fn test_tenure_options_and_amount_grid() {
        let policy = LendingPolicy::default();
        assert!(policy.allows_tenure(9));
        assert!(!policy.allows_tenure(7));
        assert!(policy.amount_on_grid(dec!(250_000)));
        assert!(!policy.amount_on_grid(dec!(250_500)));
    }

    #[test]
    fn test_tenure_option_outside_bounds_rejected() {
        let err = LendingPolicy::from_json_str(r#"{"tenure_options": [6, 36]}"#).unwrap_err();
        assert_eq!(err.field(), Some("tenure_options"));
        let err = LendingPolicy::from_json_str(r#"{"amount_step": "0"}"#).unwrap_err();
        assert_eq!(err.field(), Some("amount_step"));
    }

    #[test]
    fn test_rate_grid_and_clamp() {
        let policy = LendingPolicy::default();
        assert!(policy.rate_on_grid(dec!(12.5)));
        assert!(!policy.rate_on_grid(dec!(12.25)));
        assert_eq!(policy.clamp_rate(dec!(30)), dec!(24));
        assert_eq!(policy.clamp_rate(dec!(5)), dec!(8));
        assert_eq!(policy.clamp_rate(dec!(13)), dec!(13));
    }
}
