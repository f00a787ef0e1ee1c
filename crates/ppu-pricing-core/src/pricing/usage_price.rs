use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::checked;
use super::inputs::PricingInputs;
use crate::config::PricingConstants;
use crate::types::Money;
use crate::PricingResult;

/// Components of the price per metered unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsagePrice {
    /// Annual cost per asset spread over expected consumption
    pub base: Money,
    /// Base price loaded with the utilization risk uplift
    pub uplifted: Money,
    /// Consumables pass-through including markup
    pub consumables_term: Money,
    /// `uplifted + consumables_term` before rounding
    pub unrounded: Money,
    /// Price per metered unit, rounded up to the cent
    pub unit_price: Money,
}

/// Round up to the next whole cent. Never rounds down.
pub fn ceil_to_cents(value: Money) -> PricingResult<Money> {
    let cents = checked("unit price in cents", value.checked_mul(dec!(100)))?;
    Ok(cents.ceil() / dec!(100))
}

/// Price per metered unit for an annual cost per asset.
///
/// Only `utilization_risk_uplift_factor` of the offloaded risk percentage is
/// loaded onto the price. Rounding happens once, on the sum of both terms.
pub fn price_per_unit(
    subtotal_per_asset: Money,
    inputs: &PricingInputs,
    constants: &PricingConstants,
) -> PricingResult<UsagePrice> {
    let base = checked(
        "base unit price",
        subtotal_per_asset.checked_div(inputs.expected_consumption),
    )?;

    let risk_uplift = checked(
        "utilization risk uplift",
        (inputs.utilization_risk_offloading / dec!(100))
            .checked_mul(constants.utilization_risk_uplift_factor)
            .and_then(|share| Decimal::ONE.checked_add(share)),
    )?;
    let uplifted = checked("uplifted unit price", base.checked_mul(risk_uplift))?;

    let consumables_term = checked(
        "consumables term",
        Decimal::ONE
            .checked_add(constants.uplift_on_consumables)
            .and_then(|markup| inputs.consumables_cost.checked_mul(markup)),
    )?;

    let unrounded = checked("unit price", uplifted.checked_add(consumables_term))?;
    let unit_price = ceil_to_cents(unrounded)?;

    debug!(
        target: "ppu_pricing::usage_price",
        %base,
        %uplifted,
        %consumables_term,
        %unrounded,
        %unit_price,
        "priced metered unit"
    );

    Ok(UsagePrice {
        base,
        uplifted,
        consumables_term,
        unrounded,
        unit_price,
    })
}
