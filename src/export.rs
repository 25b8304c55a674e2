//! Export query results to CSV and JSON

use crate::types::{CellValue, RowSet};
use crate::Result;
use serde_json::{json, Value as JsonValue};
use std::io::Write;

/// Default download name for a table export
pub fn csv_file_name(table: &str) -> String {
    format!("{table}.csv")
}

fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Write a row set as CSV: header first, every field quoted with embedded
/// quotes doubled, lines joined by LF.
pub fn row_set_to_csv<W: Write>(rs: &RowSet, writer: &mut W) -> Result<()> {
    let header: Vec<String> = rs.columns.iter().map(|c| csv_quote(c)).collect();
    writeln!(writer, "{}", header.join(","))?;

    for row in &rs.rows {
        let fields: Vec<String> = row
            .values
            .iter()
            .map(|v| csv_quote(&v.display()))
            .collect();
        writeln!(writer, "{}", fields.join(","))?;
    }
    Ok(())
}

/// Export a row set to JSON: table name, column list, and rows as objects
/// keyed by column name.
pub fn row_set_to_json(rs: &RowSet) -> JsonValue {
    let rows: Vec<JsonValue> = rs
        .rows
        .iter()
        .map(|row| {
            let mut obj = serde_json::Map::new();
            for (col, val) in rs.columns.iter().zip(row.values.iter()) {
                let json_val = match val {
                    CellValue::Null => JsonValue::Null,
                    CellValue::Integer(i) => JsonValue::from(*i),
                    CellValue::Real(r) => {
                        serde_json::Number::from_f64(*r).map_or(JsonValue::Null, JsonValue::Number)
                    }
                    CellValue::Text(s) => JsonValue::String(s.clone()),
                    CellValue::Blob(b) => JsonValue::String(format!("[{} bytes]", b.len())),
                };
                obj.insert(col.clone(), json_val);
            }
            JsonValue::Object(obj)
        })
        .collect();

    json!({
        "table": rs.table,
        "columns": rs.columns,
        "rows": rows,
        "row_count": rs.rows.len(),
    })
}
