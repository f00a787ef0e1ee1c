//! Annual cost per asset the provider must recover.
//!
//! Each capital outlay is amortized through a *relative* factor: the annual
//! payment that recovers one currency unit fronted plus a margin of
//! `term_years * margin_expectation`, net of the residual value. The factor
//! does not depend on the outlay, so the same term prices core assets,
//! accessories and project cost; only the residual differs.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::checked;
use super::inputs::PricingInputs;
use crate::config::PricingConstants;
use crate::time_value::{pmt, PaymentTiming};
use crate::types::{Money, Percent, Periods};
use crate::PricingResult;

/// One capital outlay category, amortized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizedOutlay {
    /// Annual payment per currency unit of principal
    pub relative: Decimal,
    /// Annual payment per asset
    pub absolute: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostAggregation {
    pub term_years: Periods,
    pub core_assets: AmortizedOutlay,
    pub accessories: AmortizedOutlay,
    pub project_cost: AmortizedOutlay,
    /// Maintenance and consumables per asset, not amortized
    pub operating_cost_per_asset: Money,
    /// Full annual cost per asset, independent of consumption
    pub subtotal_per_asset: Money,
}

/// Relative annual amortization factor for a residual value given in percent.
pub fn relative_amortization_factor(
    constants: &PricingConstants,
    term_years: Periods,
    residual_value: Percent,
) -> PricingResult<Decimal> {
    let fronted = checked(
        "fronted principal",
        term_years
            .checked_mul(constants.margin_expectation)
            .and_then(|margin| Decimal::ONE.checked_add(margin)),
    )?;
    pmt(
        constants.market_interest_rate,
        term_years,
        -fronted,
        residual_value / dec!(100),
        PaymentTiming::End,
    )
}

pub fn aggregate_costs(
    inputs: &PricingInputs,
    constants: &PricingConstants,
) -> PricingResult<CostAggregation> {
    let term_years = inputs.term_years();
    let assets = Decimal::from(inputs.number_of_assets);

    let core_assets = amortize(
        constants,
        term_years,
        inputs.residual_value_core,
        inputs.acquisition_cost_core,
        assets,
    )?;
    let accessories = amortize(
        constants,
        term_years,
        inputs.residual_value_accessories,
        inputs.acquisition_cost_accessories,
        assets,
    )?;
    // Project cost has no resale value
    let project_cost = amortize(constants, term_years, Decimal::ZERO, inputs.project_cost, assets)?;

    // consumables_cost is a per-unit rate summed into an annual figure; the
    // quoted prices depend on it staying here.
    let operating_cost_per_asset = checked(
        "operating cost per asset",
        inputs
            .maintenance_fee_core
            .checked_add(inputs.maintenance_fee_accessories)
            .and_then(|fees| fees.checked_add(inputs.consumables_cost))
            .and_then(|total| total.checked_div(assets)),
    )?;

    let subtotal_per_asset = checked(
        "subtotal cost per asset",
        core_assets
            .absolute
            .checked_add(accessories.absolute)
            .and_then(|sum| sum.checked_add(project_cost.absolute))
            .and_then(|sum| sum.checked_add(operating_cost_per_asset)),
    )?;

    debug!(
        target: "ppu_pricing::amortization",
        %term_years,
        core_relative = %core_assets.relative,
        core_absolute = %core_assets.absolute,
        accessories_relative = %accessories.relative,
        accessories_absolute = %accessories.absolute,
        project_relative = %project_cost.relative,
        project_absolute = %project_cost.absolute,
        %operating_cost_per_asset,
        %subtotal_per_asset,
        "aggregated annual cost per asset"
    );

    Ok(CostAggregation {
        term_years,
        core_assets,
        accessories,
        project_cost,
        operating_cost_per_asset,
        subtotal_per_asset,
    })
}

fn amortize(
    constants: &PricingConstants,
    term_years: Periods,
    residual_value: Percent,
    outlay: Money,
    assets: Decimal,
) -> PricingResult<AmortizedOutlay> {
    let relative = relative_amortization_factor(constants, term_years, residual_value)?;
    let absolute = checked(
        "amortized outlay per asset",
        outlay
            .checked_div(assets)
            .and_then(|per_asset| relative.checked_mul(per_asset)),
    )?;
    Ok(AmortizedOutlay { relative, absolute })
}
