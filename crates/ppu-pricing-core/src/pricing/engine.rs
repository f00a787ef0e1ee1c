use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use super::amortization::{aggregate_costs, CostAggregation};
use super::billing::{project_billing, project_diagnostics, BillingDiagnostics, CalculationResult};
use super::inputs::PricingInputs;
use super::usage_price::{price_per_unit, UsagePrice};
use crate::config::PricingConstants;
use crate::types::{with_metadata, ComputationOutput};
use crate::PricingResult;

/// Intermediate quantities of one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    pub costs: CostAggregation,
    pub usage_price: UsagePrice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedPricing {
    pub result: CalculationResult,
    pub breakdown: PricingBreakdown,
    pub diagnostics: BillingDiagnostics,
}

/// Price an offer under the current pricing policy.
pub fn compute(inputs: &PricingInputs) -> PricingResult<CalculationResult> {
    compute_with(inputs, &PricingConstants::default())
}

/// Price an offer under explicit pricing constants.
pub fn compute_with(
    inputs: &PricingInputs,
    constants: &PricingConstants,
) -> PricingResult<CalculationResult> {
    let (_, result) = run_pipeline(inputs, constants)?;
    Ok(result)
}

/// Price an offer and keep every intermediate quantity, including the
/// resale and worst-case present values.
pub fn compute_detailed(
    inputs: &PricingInputs,
    constants: &PricingConstants,
) -> PricingResult<DetailedPricing> {
    let (breakdown, result) = run_pipeline(inputs, constants)?;
    let diagnostics = project_diagnostics(
        inputs,
        constants,
        breakdown.costs.term_years,
        breakdown.usage_price.unit_price,
    )?;
    Ok(DetailedPricing {
        result,
        breakdown,
        diagnostics,
    })
}

/// Detailed pricing wrapped in the standard computation envelope.
pub fn calculate_pricing(
    inputs: &PricingInputs,
) -> PricingResult<ComputationOutput<DetailedPricing>> {
    let start = Instant::now();
    let constants = PricingConstants::default();

    let detailed = compute_detailed(inputs, &constants)?;
    let warnings = inputs.warnings();

    let assumptions = serde_json::json!({
        "inputs": inputs,
        "constants": constants,
    });
    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Pay-per-use unit price via annuity amortization of capital outlays",
        &assumptions,
        warnings,
        elapsed,
        detailed,
    ))
}

fn run_pipeline(
    inputs: &PricingInputs,
    constants: &PricingConstants,
) -> PricingResult<(PricingBreakdown, CalculationResult)> {
    constants.validate()?;
    inputs.validate()?;

    let costs = aggregate_costs(inputs, constants)?;
    let usage_price = price_per_unit(costs.subtotal_per_asset, inputs, constants)?;
    let result = project_billing(inputs, usage_price.unit_price)?;

    debug!(
        target: "ppu_pricing::engine",
        pay_per = %result.pay_per,
        cost_per_unit = %result.cost_per_unit,
        additional_cost = %result.additional_cost,
        monthly_advance_payment_total = %result.monthly_advance_payment_total,
        "priced offer"
    );

    Ok((PricingBreakdown { costs, usage_price }, result))
}
