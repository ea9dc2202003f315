use serde_json::Value;

/// Print just the headline figure from the output.
///
/// Looks for well-known result fields in order of priority, descending one
/// level into nested objects (a quote's `buyout`, an assessment's
/// `assessment`), then falls back to the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "buyout_amount",
        "monthly_emi",
        "score_rating",
        "interest_rate_percent",
        "total",
    ];

    if let Value::Object(map) = result_obj {
        if let Some(val) = find_priority(map, &priority_keys) {
            println!("{}", format_minimal(val));
            return;
        }
        for nested in map.values() {
            if let Value::Object(inner) = nested {
                if let Some(val) = find_priority(inner, &priority_keys) {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    if let Value::Array(rows) = result_obj {
        for row in rows {
            if let Some(emi) = row.get("monthly_emi") {
                println!("{}", format_minimal(emi));
            }
        }
        return;
    }

    println!("{}", format_minimal(result_obj));
}

fn find_priority<'a>(
    map: &'a serde_json::Map<String, Value>,
    keys: &[&str],
) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|val| !val.is_null())
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
