//! JSON array parser

use std::borrow::Cow;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use indexmap::IndexSet;
use serde_json::Value;

use crate::config::SourceType;
use crate::model::{CellValue, Column, Table, TableKind};

use super::Parser;

/// Parser for JSON files holding an array of objects
pub struct JsonParser;

impl Parser for JsonParser {
    fn parse(&self, path: &Path, _kind: TableKind) -> Result<Table> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open JSON file: {}", path.display()))?;
        let reader = BufReader::new(file);

        let value: Value = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse JSON file: {}", path.display()))?;

        parse_value(value)
    }

    fn supports(&self, source_type: SourceType) -> bool {
        source_type == SourceType::Json
    }
}

fn parse_value(value: Value) -> Result<Table> {
    // Handle both arrays and single objects
    let array = match value {
        Value::Array(arr) => arr,
        Value::Object(_) => vec![value],
        _ => bail!("JSON must be an array of objects or a single object"),
    };

    // Collect all unique keys across all objects to build column list
    let mut column_names: IndexSet<String> = IndexSet::new();
    for (i, item) in array.iter().enumerate() {
        match item {
            Value::Object(obj) => {
                for key in obj.keys() {
                    column_names.insert(key.clone());
                }
            }
            _ => bail!("JSON record {} is not an object", i + 1),
        }
    }

    let columns: Vec<Column> = column_names
        .iter()
        .enumerate()
        .map(|(i, name)| Column::new(name.clone(), i))
        .collect();

    let mut table = Table::new(columns);

    for (line_num, item) in array.iter().enumerate() {
        if let Value::Object(obj) = item {
            let cells = column_names
                .iter()
                .map(|key| json_value_to_cell(obj.get(key)))
                .collect();
            table.add_row(cells, line_num + 1);
        }
    }

    Ok(table)
}

fn json_value_to_cell(value: Option<&Value>) -> CellValue {
    match value {
        None | Some(Value::Null) => CellValue::Null,
        Some(Value::Bool(b)) => CellValue::Bool(*b),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                CellValue::Int(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(Cow::Owned(n.to_string()))
            }
        }
        Some(Value::String(s)) => CellValue::String(Cow::Owned(s.clone())),
        Some(Value::Array(items)) => match join_scalars(items) {
            Some(joined) => CellValue::String(Cow::Owned(joined)),
            None => CellValue::String(Cow::Owned(Value::Array(items.clone()).to_string())),
        },
        // Objects are kept as their JSON text
        Some(nested @ Value::Object(_)) => CellValue::String(Cow::Owned(nested.to_string())),
    }
}

/// Comma-join an array of scalars, the list form CSV and XLSX sources use
/// (e.g. `groups`). Returns `None` if any item is an array or object.
fn join_scalars(items: &[Value]) -> Option<String> {
    let parts = items
        .iter()
        .map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        })
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join(","))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_columns_are_union_in_first_seen_order() {
        let table = parse_value(json!([
            {"name": "r1", "hostname": "10.0.0.1"},
            {"name": "r2", "platform": "ios"},
        ]))
        .unwrap();

        let names: Vec<_> = table.column_names().collect();
        assert_eq!(names, vec!["name", "hostname", "platform"]);

        let records = table.to_records();
        assert_eq!(records[0]["platform"], CellValue::Null);
        assert_eq!(records[1]["hostname"], CellValue::Null);
    }

    #[test]
    fn test_scalar_conversion() {
        let table = parse_value(json!([
            {"port": 22, "ratio": 0.5, "enabled": true, "tags": {"a": 1}, "note": null}
        ]))
        .unwrap();
        let record = &table.to_records()[0];
        assert_eq!(record["port"], CellValue::Int(22));
        assert_eq!(record["ratio"], CellValue::Float(0.5));
        assert_eq!(record["enabled"], CellValue::Bool(true));
        assert_eq!(record["tags"], CellValue::from(r#"{"a":1}"#));
        assert!(record["note"].is_null());
    }

    #[test]
    fn test_scalar_arrays_are_comma_joined() {
        let table = parse_value(json!([
            {"groups": ["ios", "dc1"]},
            {"groups": [100, "core"]},
            {"groups": [["nested"]]},
            {"groups": []},
        ]))
        .unwrap();
        let records = table.to_records();
        assert_eq!(records[0]["groups"], CellValue::from("ios,dc1"));
        assert_eq!(records[1]["groups"], CellValue::from("100,core"));
        assert_eq!(records[2]["groups"], CellValue::from(r#"[["nested"]]"#));
        assert_eq!(records[3]["groups"], CellValue::from(""));
    }

    #[test]
    fn test_empty_array_is_an_empty_table() {
        let table = parse_value(json!([])).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_single_object_is_one_record() {
        let table = parse_value(json!({"name": "core"})).unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_non_object_items_are_rejected() {
        assert!(parse_value(json!([{"name": "r1"}, 5])).is_err());
        assert!(parse_value(json!("inventory")).is_err());
    }
}
