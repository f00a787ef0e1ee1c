//! Customer-facing figures derived from the unit price.
//!
//! [`CalculationResult`] is the contract shared with the request form. The
//! resale and worst-case present values in [`BillingDiagnostics`] are
//! computed for review only and are not part of that contract.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::checked;
use super::inputs::PricingInputs;
use crate::config::PricingConstants;
use crate::time_value::{pv, PaymentTiming};
use crate::types::{Money, Periods};
use crate::PricingResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Result of pricing one offer. Figures serialize as JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Fleet-wide capital outlay, not amortized
    #[serde(with = "rust_decimal::serde::float")]
    pub total_investment_cost: Money,
    /// Billing metric the unit price is quoted per
    pub pay_per: String,
    /// Price per metered unit
    #[serde(with = "rust_decimal::serde::float")]
    pub cost_per_unit: Money,
    /// Annual usage cost per asset at expected consumption
    #[serde(with = "rust_decimal::serde::float")]
    pub total_usage_cost_per_asset: Money,
    /// Usage cost per asset the customer pays regardless of consumption
    #[serde(with = "rust_decimal::serde::float")]
    pub additional_cost: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_advance_payment_per_asset: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_advance_payment_total: Money,
}

/// Present values behind the offer, withheld from [`CalculationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingDiagnostics {
    pub pv_core_assets_resale_relative: Decimal,
    pub pv_core_assets_resale_absolute: Money,
    pub pv_accessories_resale_relative: Decimal,
    pub pv_accessories_resale_absolute: Money,
    /// Provider's PV of usage income if consumption falls to the guaranteed share
    pub pv_usage_payments_worst_case: Money,
}

pub fn project_billing(inputs: &PricingInputs, unit_price: Money) -> PricingResult<CalculationResult> {
    let total_investment_cost = inputs.total_investment_cost()?;
    let total_usage_cost_per_asset = checked(
        "total usage cost per asset",
        unit_price.checked_mul(inputs.expected_consumption),
    )?;
    let additional_cost = checked(
        "additional cost",
        total_usage_cost_per_asset.checked_mul(inputs.retained_risk_fraction()),
    )?;
    let monthly_advance_payment_per_asset = additional_cost / MONTHS_PER_YEAR;
    let monthly_advance_payment_total = checked(
        "monthly advance payment total",
        monthly_advance_payment_per_asset.checked_mul(Decimal::from(inputs.number_of_assets)),
    )?;

    Ok(CalculationResult {
        total_investment_cost,
        pay_per: inputs.billing_metric.to_string(),
        cost_per_unit: unit_price,
        total_usage_cost_per_asset,
        additional_cost,
        monthly_advance_payment_per_asset,
        monthly_advance_payment_total,
    })
}

/// Resale and worst-case usage present values.
///
/// Resale is discounted over a single period at the simple term rate
/// `market_interest_rate * term_years`. The worst case discounts the fleet's
/// guaranteed monthly payments (net of consumables) as an annuity-due over
/// the term in months at the annual market rate, and adds the offloaded
/// usage share as a lump at term end.
pub fn project_diagnostics(
    inputs: &PricingInputs,
    constants: &PricingConstants,
    term_years: Periods,
    unit_price: Money,
) -> PricingResult<BillingDiagnostics> {
    let resale_rate = checked(
        "resale discount rate",
        constants.market_interest_rate.checked_mul(term_years),
    )?;

    let pv_core_assets_resale_relative = pv(
        resale_rate,
        Decimal::ONE,
        Decimal::ZERO,
        inputs.residual_value_core / dec!(100),
        PaymentTiming::End,
    )?;
    let pv_accessories_resale_relative = pv(
        resale_rate,
        Decimal::ONE,
        Decimal::ZERO,
        inputs.residual_value_accessories / dec!(100),
        PaymentTiming::End,
    )?;
    let pv_core_assets_resale_absolute = checked(
        "core assets resale value",
        pv_core_assets_resale_relative.checked_mul(inputs.acquisition_cost_core),
    )?;
    let pv_accessories_resale_absolute = checked(
        "accessories resale value",
        pv_accessories_resale_relative.checked_mul(inputs.acquisition_cost_accessories),
    )?;

    let pv_usage_payments_worst_case =
        worst_case_usage_value(inputs, constants, resale_rate, unit_price)?;

    debug!(
        target: "ppu_pricing::billing",
        %pv_core_assets_resale_absolute,
        %pv_accessories_resale_absolute,
        %pv_usage_payments_worst_case,
        "projected diagnostic present values"
    );

    Ok(BillingDiagnostics {
        pv_core_assets_resale_relative,
        pv_core_assets_resale_absolute,
        pv_accessories_resale_relative,
        pv_accessories_resale_absolute,
        pv_usage_payments_worst_case,
    })
}

fn worst_case_usage_value(
    inputs: &PricingInputs,
    constants: &PricingConstants,
    resale_rate: Decimal,
    unit_price: Money,
) -> PricingResult<Money> {
    let consumption = inputs.expected_consumption;
    let assets = Decimal::from(inputs.number_of_assets);
    let retained = inputs.retained_risk_fraction();
    let offloaded = inputs.utilization_risk_offloading / dec!(100);
    let consumables_rate = checked(
        "marked-up consumables",
        Decimal::ONE
            .checked_add(constants.uplift_on_consumables)
            .and_then(|markup| inputs.consumables_cost.checked_mul(markup)),
    )?;

    let usage_per_asset = checked(
        "usage cost per asset",
        unit_price.checked_mul(consumption),
    )?;
    let guaranteed_per_asset = checked(
        "guaranteed usage per asset",
        usage_per_asset.checked_mul(retained),
    )?;

    let guaranteed_fleet_monthly = checked(
        "guaranteed monthly fleet payment",
        (guaranteed_per_asset / MONTHS_PER_YEAR).checked_mul(assets),
    )?;
    let consumables_fleet_monthly = checked(
        "guaranteed monthly consumables",
        (consumption / MONTHS_PER_YEAR)
            .checked_mul(assets)
            .and_then(|v| v.checked_mul(retained))
            .and_then(|v| v.checked_mul(consumables_rate)),
    )?;
    let guaranteed_payment = guaranteed_fleet_monthly - consumables_fleet_monthly;

    let offloaded_consumables = checked(
        "offloaded consumables",
        consumption
            .checked_mul(assets)
            .and_then(|v| v.checked_mul(offloaded))
            .and_then(|v| v.checked_mul(consumables_rate)),
    )?;
    let offloaded_lump = usage_per_asset - guaranteed_per_asset - offloaded_consumables;

    let guaranteed_value = pv(
        constants.market_interest_rate,
        inputs.minimum_usage_term,
        guaranteed_payment,
        Decimal::ZERO,
        PaymentTiming::Begin,
    )?;
    let offloaded_value = pv(
        resale_rate,
        Decimal::ONE,
        offloaded_lump,
        Decimal::ZERO,
        PaymentTiming::End,
    )?;

    checked(
        "worst-case usage value",
        (-guaranteed_value).checked_add(offloaded_value),
    )
}
