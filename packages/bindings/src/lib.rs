use napi::Result as NapiResult;
use napi_derive::napi;

use ppu_pricing_core::pricing::{self, PricingInputs};
use ppu_pricing_core::request;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Price a calculator form body.
///
/// Resolves with the serialized result. Rejects with the same message the
/// endpoint would put in its `error` field, prefixed by the status code.
#[napi]
pub fn calculate(body_json: String) -> NapiResult<String> {
    let body: serde_json::Value = serde_json::from_str(&body_json).map_err(to_napi_error)?;
    let response = request::respond(&body);
    if response.status != request::STATUS_OK {
        let message = response.body["error"].as_str().unwrap_or_default();
        return Err(to_napi_error(format!("{}: {}", response.status, message)));
    }
    serde_json::to_string(&response.body).map_err(to_napi_error)
}

#[napi]
pub fn pricing_breakdown(input_json: String) -> NapiResult<String> {
    let input: PricingInputs = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = pricing::calculate_pricing(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
