//! Pay-per-use pricing pipeline.
//!
//! inputs → [`amortization`] → [`usage_price`] → [`billing`]

pub mod amortization;
pub mod billing;
pub mod engine;
pub mod inputs;
pub mod usage_price;

use rust_decimal::Decimal;

use crate::error::PricingError;
use crate::PricingResult;

pub use billing::{BillingDiagnostics, CalculationResult};
pub use engine::{
    calculate_pricing, compute, compute_detailed, compute_with, DetailedPricing, PricingBreakdown,
};
pub use inputs::{BillingMetric, PricingInputs};

/// Unwraps a checked decimal operation; overflow fails the calculation.
pub(crate) fn checked(quantity: &str, value: Option<Decimal>) -> PricingResult<Decimal> {
    value.ok_or_else(|| PricingError::Computation(format!("arithmetic overflow in {quantity}")))
}
