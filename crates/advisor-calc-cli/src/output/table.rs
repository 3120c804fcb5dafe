use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::scalar;

/// Render the computation envelope as tables: headline figures first, then
/// one table per schedule/breakdown array, then warnings and methodology.
pub fn print_table(value: &Value) {
    let Some(envelope) = value.as_object() else {
        println!("{}", value);
        return;
    };

    let result = envelope.get("result").unwrap_or(value);
    match result {
        Value::Object(fields) => {
            print_headline_fields(fields);
            for (name, val) in fields {
                if let Value::Array(rows) = val {
                    if !rows.is_empty() {
                        println!("\n{}:", name);
                        print_record_table(rows);
                    }
                }
            }
        }
        other => println!("{}", scalar(other)),
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

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

/// Field/value rows for everything except the array fields.
fn print_headline_fields(fields: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (name, val) in fields {
        if !val.is_array() {
            builder.push_record([name.as_str(), &scalar(val)]);
        }
    }
    println!("{}", Table::from(builder));
}

/// One row per record, with the first record supplying the column order.
fn print_record_table(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            println!("{}", scalar(row));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for row in rows {
        if let Value::Object(fields) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| fields.get(h.as_str()).map(scalar).unwrap_or_default())
                .collect();
            builder.push_record(record);
        }
    }
    println!("{}", Table::from(builder));
}
