use serde_json::Value;
use std::io;

use super::scalar;

/// Write output as CSV to stdout.
///
/// When the result carries a schedule or breakdown (an array of records),
/// that array is the CSV payload; otherwise the headline figures are
/// written as field/value rows.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(fields) => {
            if let Some(Value::Array(rows)) = fields.values().find(|v| is_record_array(v)) {
                write_records(&mut wtr, rows);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (name, val) in fields {
                    let _ = wtr.write_record([name.as_str(), &scalar(val)]);
                }
            }
        }
        Value::Array(rows) => write_records(&mut wtr, rows),
        other => {
            let _ = wtr.write_record([&scalar(other)]);
        }
    }

    let _ = wtr.flush();
}

fn is_record_array(value: &Value) -> bool {
    matches!(value, Value::Array(rows) if matches!(rows.first(), Some(Value::Object(_))))
}

fn write_records(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            let _ = wtr.write_record([&scalar(row)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);
    for row in rows {
        if let Value::Object(fields) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| fields.get(*h).map(scalar).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&record);
        }
    }
}
