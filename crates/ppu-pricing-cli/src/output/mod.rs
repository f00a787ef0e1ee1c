mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Minimal => print_minimal(value),
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

/// The unit price and what it is quoted per, e.g. `23.05 per kg`.
fn print_minimal(value: &Value) {
    let result = pricing_result(value);
    match (result.get("costPerUnit"), result.get("payPer")) {
        (Some(price), Some(Value::String(metric))) => println!("{} per {}", price, metric),
        (Some(price), _) => println!("{}", price),
        _ => println!("{}", value),
    }
}

/// The `CalculationResult` object inside either output shape.
pub(crate) fn pricing_result(value: &Value) -> &Value {
    let mut current = value;
    while let Some(inner) = current.get("result") {
        current = inner;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pricing_result_unwraps_envelope() {
        let envelope = json!({
            "result": { "result": { "costPerUnit": 23.05, "payPer": "kg" }, "breakdown": {} },
            "methodology": "m"
        });
        assert_eq!(pricing_result(&envelope)["payPer"], "kg");

        let plain = json!({ "costPerUnit": 23.05, "payPer": "kg" });
        assert_eq!(pricing_result(&plain)["costPerUnit"], 23.05);
    }
}
