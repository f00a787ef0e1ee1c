use clap::Args;
use serde_json::Value;

use ppu_pricing_core::pricing::{self, PricingInputs};
use ppu_pricing_core::request::{self, STATUS_OK};

use crate::input;

/// Arguments for pricing an offer
#[derive(Args)]
pub struct PriceArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the detailed pricing breakdown
#[derive(Args)]
pub struct BreakdownArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_price(args: PriceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let body = input::read_body(args.input.as_deref(), "pricing")?;
    let response = request::respond(&body);
    if response.status == STATUS_OK {
        return Ok(response.body);
    }
    let message = response.body["error"]
        .as_str()
        .unwrap_or("Calculation failed")
        .to_string();
    Err(format!("{} ({})", message, response.status).into())
}

pub fn run_breakdown(args: BreakdownArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let body = input::read_body(args.input.as_deref(), "breakdown")?;
    let inputs: PricingInputs = serde_json::from_value(body)?;
    let output = pricing::calculate_pricing(&inputs)?;
    Ok(serde_json::to_value(output)?)
}
