//! JSON request contract shared with the calculator form.
//!
//! The form posts a [`PricingInputs`]-shaped object and expects either a
//! [`CalculationResult`](crate::CalculationResult) or `{"error": "..."}`
//! with an HTTP status. Only validation failures explain themselves; every
//! other failure is reported as `Calculation failed`.

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::PricingError;
use crate::pricing::{compute, PricingInputs};
use crate::PricingResult;

/// Fields that must be present and truthy before the body is parsed.
pub const REQUIRED_FIELDS: [&str; 2] = ["numberOfAssets", "expectedConsumption"];

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_SERVER_ERROR: u16 = 500;

const OPAQUE_FAILURE: &str = "Calculation failed";

/// Status and body for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

/// Price a request body, returning the serialized result.
pub fn handle_request(body: &Value) -> PricingResult<Value> {
    check_required_fields(body)?;

    let inputs: PricingInputs =
        serde_json::from_value(body.clone()).map_err(|e| PricingError::InvalidInput {
            field: "body".into(),
            reason: e.to_string(),
        })?;

    let result = compute(&inputs)?;
    Ok(serde_json::to_value(result)?)
}

/// [`handle_request`] with errors folded into a status and error body.
pub fn respond(body: &Value) -> Response {
    match handle_request(body) {
        Ok(result) => Response {
            status: STATUS_OK,
            body: result,
        },
        Err(err) => {
            if err.is_validation() {
                debug!(target: "ppu_pricing::request", error = %err, "rejected request");
            } else {
                warn!(target: "ppu_pricing::request", error = %err, "calculation failed");
            }
            Response {
                status: status_code(&err),
                body: error_body(&err),
            }
        }
    }
}

pub fn status_code(err: &PricingError) -> u16 {
    if err.is_validation() {
        STATUS_BAD_REQUEST
    } else {
        STATUS_SERVER_ERROR
    }
}

/// `{"error": ...}` for a failed request. Internal failures stay opaque.
pub fn error_body(err: &PricingError) -> Value {
    let message = if err.is_validation() {
        err.to_string()
    } else {
        OPAQUE_FAILURE.to_string()
    };
    json!({ "error": message })
}

fn check_required_fields(body: &Value) -> PricingResult<()> {
    let present = REQUIRED_FIELDS
        .iter()
        .all(|field| body.get(field).is_some_and(is_truthy));
    if present {
        Ok(())
    } else {
        Err(PricingError::MissingRequiredFields)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
