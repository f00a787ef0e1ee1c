use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize};

use super::checked;
use crate::error::PricingError;
use crate::types::{Money, Percent};
use crate::PricingResult;

/// The unit usage is metered and billed in.
///
/// Serialized as the bare string the form sends (`"kg"`, `"kWh"`, ...).
/// Any other non-empty label is carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BillingMetric {
    Hours,
    Kilograms,
    Litres,
    KilowattHours,
    Other(String),
}

impl BillingMetric {
    pub fn as_str(&self) -> &str {
        match self {
            BillingMetric::Hours => "hours",
            BillingMetric::Kilograms => "kg",
            BillingMetric::Litres => "l",
            BillingMetric::KilowattHours => "kWh",
            BillingMetric::Other(label) => label,
        }
    }
}

impl From<String> for BillingMetric {
    fn from(label: String) -> Self {
        match label.as_str() {
            "hours" => BillingMetric::Hours,
            "kg" => BillingMetric::Kilograms,
            "l" => BillingMetric::Litres,
            "kWh" => BillingMetric::KilowattHours,
            _ => BillingMetric::Other(label),
        }
    }
}

impl From<&str> for BillingMetric {
    fn from(label: &str) -> Self {
        BillingMetric::from(label.to_string())
    }
}

impl From<BillingMetric> for String {
    fn from(metric: BillingMetric) -> Self {
        match metric {
            BillingMetric::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BillingMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything known about one pay-per-use offer.
///
/// Field names on the wire are camelCase and shared with the request form.
/// Percentages are plain numbers (`50` = 50%), the term is in months and
/// maintenance fees are annual amounts for the whole fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingInputs {
    /// Unit the usage price is quoted per
    pub billing_metric: BillingMetric,
    /// Expected annual consumption per asset, in billing metric units
    pub expected_consumption: Decimal,
    /// Assets in the fleet. Integral floats such as `1000.0` are accepted.
    #[serde(deserialize_with = "deserialize_asset_count")]
    pub number_of_assets: u32,
    /// Deployment region (informational)
    #[serde(default)]
    pub geography: String,
    /// Share of underutilization risk the provider absorbs (0 to 100)
    pub utilization_risk_offloading: Percent,
    /// Fleet-wide acquisition cost of the core assets
    pub acquisition_cost_core: Money,
    /// Fleet-wide acquisition cost of accessories
    pub acquisition_cost_accessories: Money,
    /// One-time project / integration cost
    pub project_cost: Money,
    /// Minimum usage term in months
    pub minimum_usage_term: Decimal,
    /// Resale value of the core assets at term end, percent of cost
    pub residual_value_core: Percent,
    /// Resale value of the accessories at term end, percent of cost
    pub residual_value_accessories: Percent,
    pub maintenance_fee_core: Money,
    pub maintenance_fee_accessories: Money,
    /// Consumables cost per metered unit
    pub consumables_cost: Money,
}

impl PricingInputs {
    /// Term of the annuity in years.
    pub fn term_years(&self) -> Decimal {
        self.minimum_usage_term / dec!(12)
    }

    /// Share of the usage cost the customer keeps guaranteed, as a fraction.
    pub fn retained_risk_fraction(&self) -> Decimal {
        Decimal::ONE - self.utilization_risk_offloading / dec!(100)
    }

    /// Fleet-wide capital outlay, not amortized.
    pub fn total_investment_cost(&self) -> PricingResult<Money> {
        checked(
            "total investment cost",
            self.acquisition_cost_core
                .checked_add(self.acquisition_cost_accessories)
                .and_then(|sum| sum.checked_add(self.project_cost)),
        )
    }

    /// Rejects anything the pipeline cannot price. Runs before any annuity math.
    pub fn validate(&self) -> PricingResult<()> {
        if self.number_of_assets == 0 {
            return Err(invalid("numberOfAssets", "Number of assets must be greater than zero"));
        }
        if self.expected_consumption <= Decimal::ZERO {
            return Err(invalid(
                "expectedConsumption",
                "Expected consumption must be positive",
            ));
        }
        if self.minimum_usage_term <= Decimal::ZERO {
            return Err(invalid("minimumUsageTerm", "Minimum usage term must be positive"));
        }
        if self.billing_metric.as_str().trim().is_empty() {
            return Err(invalid("billingMetric", "Billing metric cannot be empty"));
        }
        if self.utilization_risk_offloading < Decimal::ZERO
            || self.utilization_risk_offloading > dec!(100)
        {
            return Err(invalid(
                "utilizationRiskOffloading",
                "Utilization risk offloading must be between 0 and 100 percent",
            ));
        }

        let amounts = [
            ("acquisitionCostCore", self.acquisition_cost_core),
            ("acquisitionCostAccessories", self.acquisition_cost_accessories),
            ("projectCost", self.project_cost),
            ("maintenanceFeeCore", self.maintenance_fee_core),
            ("maintenanceFeeAccessories", self.maintenance_fee_accessories),
            ("consumablesCost", self.consumables_cost),
        ];
        for (field, amount) in amounts {
            if amount < Decimal::ZERO {
                return Err(invalid(field, "Amount cannot be negative"));
            }
        }

        Ok(())
    }

    /// Non-fatal observations about the offer.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for (label, residual) in [
            ("core assets", self.residual_value_core),
            ("accessories", self.residual_value_accessories),
        ] {
            if residual < Decimal::ZERO || residual > dec!(100) {
                warnings.push(format!(
                    "Residual value of {label} ({residual}%) is outside 0-100%"
                ));
            }
        }

        if self.utilization_risk_offloading == dec!(100) {
            warnings.push(
                "Provider absorbs all utilization risk; no guaranteed advance payment".into(),
            );
        }

        if self.consumables_cost > Decimal::ZERO {
            warnings.push(format!(
                "Consumables cost ({} per {}) is also added to the annual operating cost per asset",
                self.consumables_cost, self.billing_metric
            ));
        }

        warnings
    }
}

fn deserialize_asset_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let count = <Decimal as Deserialize>::deserialize(deserializer)?;
    if !count.fract().is_zero() {
        return Err(serde::de::Error::custom(format!(
            "numberOfAssets must be a whole number, got {count}"
        )));
    }
    count.to_u32().ok_or_else(|| {
        serde::de::Error::custom(format!("numberOfAssets out of range: {count}"))
    })
}

fn invalid(field: &str, reason: &str) -> PricingError {
    PricingError::InvalidInput {
        field: field.into(),
        reason: reason.into(),
    }
}
