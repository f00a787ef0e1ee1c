//! Commercial pricing policy.
//!
//! These values define the product's terms rather than any single offer, so
//! they are not part of [`PricingInputs`](crate::pricing::PricingInputs).
//! The engine receives them explicitly; [`PricingConstants::default`] is the
//! policy in force.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::types::Rate;
use crate::PricingResult;

pub const MARKET_INTEREST_RATE: Rate = dec!(0.048);
pub const MARGIN_EXPECTATION: Rate = dec!(0.015);
pub const UTILIZATION_RISK_UPLIFT_FACTOR: Decimal = dec!(0.5);
pub const UPLIFT_ON_CONSUMABLES: Rate = dec!(0.02);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConstants {
    /// Annual interest rate used to amortize capital outlays
    pub market_interest_rate: Rate,
    /// Margin per year of term, added on top of the principal
    pub margin_expectation: Rate,
    /// Share of the offloaded utilization risk loaded onto the unit price
    pub utilization_risk_uplift_factor: Decimal,
    /// Markup applied to consumables passed through per metered unit
    pub uplift_on_consumables: Rate,
}

impl PricingConstants {
    pub const POLICY: PricingConstants = PricingConstants {
        market_interest_rate: MARKET_INTEREST_RATE,
        margin_expectation: MARGIN_EXPECTATION,
        utilization_risk_uplift_factor: UTILIZATION_RISK_UPLIFT_FACTOR,
        uplift_on_consumables: UPLIFT_ON_CONSUMABLES,
    };

    pub fn validate(&self) -> PricingResult<()> {
        if self.market_interest_rate <= dec!(-1) {
            return Err(PricingError::InvalidInput {
                field: "marketInterestRate".into(),
                reason: "Market interest rate must be greater than -100%".into(),
            });
        }
        if self.margin_expectation < Decimal::ZERO {
            return Err(PricingError::InvalidInput {
                field: "marginExpectation".into(),
                reason: "Margin expectation cannot be negative".into(),
            });
        }
        if self.utilization_risk_uplift_factor < Decimal::ZERO {
            return Err(PricingError::InvalidInput {
                field: "utilizationRiskUpliftFactor".into(),
                reason: "Utilization risk uplift factor cannot be negative".into(),
            });
        }
        if self.uplift_on_consumables <= dec!(-1) {
            return Err(PricingError::InvalidInput {
                field: "upliftOnConsumables".into(),
                reason: "Consumables uplift must be greater than -100%".into(),
            });
        }
        Ok(())
    }
}

impl Default for PricingConstants {
    fn default() -> Self {
        Self::POLICY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_policy() {
        let c = PricingConstants::default();
        assert_eq!(c.market_interest_rate, dec!(0.048));
        assert_eq!(c.margin_expectation, dec!(0.015));
        assert_eq!(c.utilization_risk_uplift_factor, dec!(0.5));
        assert_eq!(c.uplift_on_consumables, dec!(0.02));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_rejects_rate_at_minus_one() {
        let c = PricingConstants {
            market_interest_rate: dec!(-1),
            ..PricingConstants::POLICY
        };
        assert!(matches!(
            c.validate(),
            Err(PricingError::InvalidInput { ref field, .. }) if field == "marketInterestRate"
        ));
    }

    #[test]
    fn test_deserializes_camel_case() {
        let json = r#"{
            "marketInterestRate": 0.05,
            "marginExpectation": 0.01,
            "utilizationRiskUpliftFactor": 0.25,
            "upliftOnConsumables": 0.0
        }"#;
        let c: PricingConstants = serde_json::from_str(json).unwrap();
        assert_eq!(c.market_interest_rate, dec!(0.05));
        assert_eq!(c.utilization_risk_uplift_factor, dec!(0.25));
    }
}
