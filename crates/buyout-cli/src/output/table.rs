use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::ROW_KEYS;

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_object(map);
            }
        }
        Value::Array(arr) => {
            print_array_table(arr);
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    if let Value::Object(res_map) = result {
        print_object(res_map);
    } else {
        print_flat_object(envelope);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Scalar fields as a Field/Value table, then each row list as its own table.
fn print_object(map: &serde_json::Map<String, Value>) {
    print_flat_object(map);
    for key in ROW_KEYS {
        if let Some(Value::Array(rows)) = map.get(key) {
            println!("\n{}:", key);
            if key == "matrix" {
                print_matrix(map, rows);
            } else {
                print_array_table(rows);
            }
        }
    }
}

fn print_flat_object(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if ROW_KEYS.contains(&key.as_str()) {
            continue;
        }
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    let table = Table::from(builder);
    println!("{}", table);
}

/// EMI grid: one row per rate, one column per tenure.
fn print_matrix(map: &serde_json::Map<String, Value>, rows: &[Value]) {
    let rates = map.get("rates").and_then(Value::as_array);
    let tenures = map.get("tenures").and_then(Value::as_array);

    let mut builder = Builder::default();
    let mut header = vec!["rate %".to_string()];
    if let Some(tenures) = tenures {
        header.extend(tenures.iter().map(|t| format!("{}m", format_value(t))));
    }
    builder.push_record(header);

    for (i, row) in rows.iter().enumerate() {
        let rate = rates
            .and_then(|r| r.get(i))
            .map(format_value)
            .unwrap_or_default();
        let mut record = vec![rate];
        if let Value::Array(cells) = row {
            record.extend(cells.iter().map(format_value));
        }
        builder.push_record(record);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        let table = Table::from(builder);
        println!("{}", table);
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
