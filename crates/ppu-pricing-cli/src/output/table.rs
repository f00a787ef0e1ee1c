use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

const RESULT_LABELS: [(&str, &str); 7] = [
    ("totalInvestmentCost", "Total investment cost"),
    ("payPer", "Pay per"),
    ("costPerUnit", "Cost per unit"),
    ("totalUsageCostPerAsset", "Usage cost per asset (annual)"),
    ("additionalCost", "Guaranteed cost per asset (annual)"),
    ("monthlyAdvancePaymentPerAsset", "Monthly advance per asset"),
    ("monthlyAdvancePaymentTotal", "Monthly advance, fleet"),
];

/// Priced offer as labelled tables, followed by warnings and methodology
/// when the value is a computation envelope.
pub fn print_table(value: &Value) {
    let Value::Object(map) = value else {
        println!("{}", value);
        return;
    };

    match map.get("result") {
        Some(Value::Object(detailed)) => print_envelope(detailed, map),
        _ => print_result(map),
    }
}

fn print_envelope(detailed: &Map<String, Value>, envelope: &Map<String, Value>) {
    if let Some(Value::Object(result)) = detailed.get("result") {
        print_result(result);
    }
    for (title, key) in [("Cost breakdown", "breakdown"), ("Diagnostics", "diagnostics")] {
        if let Some(section) = detailed.get(key) {
            println!("\n{}:", title);
            print_flattened(section);
        }
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_result(result: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, label) in RESULT_LABELS {
        if let Some(val) = result.get(key) {
            builder.push_record([label.to_string(), format_value(val)]);
        }
    }
    println!("{}", Table::from(builder));
}

fn print_flattened(section: &Value) {
    let mut rows = Vec::new();
    flatten("", section, &mut rows);

    let mut builder = Builder::default();
    builder.push_record(["Quantity", "Value"]);
    for (key, val) in rows {
        builder.push_record([key, val]);
    }
    println!("{}", Table::from(builder));
}

/// Nested objects become dotted keys, e.g. `costs.coreAssets.relative`.
fn flatten(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(&path, val, rows);
            }
        }
        other => rows.push((prefix.to_string(), format_value(other))),
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_uses_dotted_paths() {
        let mut rows = Vec::new();
        flatten(
            "",
            &json!({ "costs": { "coreAssets": { "relative": "0.2287" } }, "termYears": 5 }),
            &mut rows,
        );
        assert_eq!(
            rows,
            vec![
                ("costs.coreAssets.relative".to_string(), "0.2287".to_string()),
                ("termYears".to_string(), "5".to_string()),
            ]
        );
    }
}
