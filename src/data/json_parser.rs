//! JSON data parsing
//!
//! Parses JSON arrays of objects into DataSource structs.

use crate::constants::{MAX_CSV_ROWS, TYPE_INFERENCE_SAMPLE};
use crate::data::error::{DataError, DataResult};
use crate::types::{DataCell, DataColumn, DataOrigin, DataRow, DataSource, DataType};
use serde_json::Value;
use std::path::Path;

/// Parse a JSON file into a DataSource
pub fn parse_json_file(path: &Path) -> DataResult<DataSource> {
    let content = std::fs::read_to_string(path)?;

    let mut ds = parse_json_content(&content)?;

    ds.name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Data")
        .to_string();

    ds.origin = DataOrigin::Json {
        path: Some(path.to_path_buf()),
    };

    Ok(ds)
}

/// Parse JSON content from a string
///
/// Columns are the union of keys over all objects, in first-seen order.
/// Objects missing a key leave that field absent in the row.
pub fn parse_json_content(json: &str) -> DataResult<DataSource> {
    let value: Value = serde_json::from_str(json)?;

    let array = extract_array(&value)?;
    if array.len() > MAX_CSV_ROWS {
        return Err(DataError::TooManyRows {
            rows: array.len(),
            max_rows: MAX_CSV_ROWS,
        });
    }

    let mut column_names: Vec<&str> = Vec::new();
    for item in array {
        let obj = item
            .as_object()
            .ok_or_else(|| DataError::InvalidData("Array elements must be objects".into()))?;
        for key in obj.keys() {
            if !column_names.contains(&key.as_str()) {
                column_names.push(key);
            }
        }
    }

    let columns: Vec<DataColumn> = column_names
        .iter()
        .map(|name| DataColumn::new(name, infer_json_column_type(array, name)))
        .collect();

    let rows: Vec<DataRow> = array
        .iter()
        .filter_map(Value::as_object)
        .map(|obj| {
            columns
                .iter()
                .filter_map(|col| {
                    obj.get(&col.name)
                        .map(|v| (col.name.clone(), json_value_to_cell(v, &col.data_type)))
                })
                .collect()
        })
        .collect();

    Ok(DataSource {
        name: "Data".to_string(),
        columns,
        rows,
        origin: DataOrigin::Json { path: None },
    })
}

/// Extract the array from JSON value, handling common wrapper patterns
fn extract_array(value: &Value) -> DataResult<&Vec<Value>> {
    match value {
        Value::Array(arr) => Ok(arr),
        Value::Object(obj) => {
            let wrapper_keys = ["data", "rows", "items", "records", "results"];
            wrapper_keys
                .iter()
                .find_map(|key| match obj.get(*key) {
                    Some(Value::Array(arr)) => Some(arr),
                    _ => None,
                })
                .ok_or_else(|| {
                    DataError::InvalidData(
                        "JSON must be an array or have a data/rows/items/records/results array"
                            .into(),
                    )
                })
        }
        _ => Err(DataError::InvalidData(
            "JSON must be an array of objects".into(),
        )),
    }
}

/// Infer the data type for a column from the first non-null sampled value
fn infer_json_column_type(array: &[Value], key: &str) -> DataType {
    for item in array.iter().take(TYPE_INFERENCE_SAMPLE) {
        let Some(value) = item.as_object().and_then(|obj| obj.get(key)) else {
            continue;
        };
        match value {
            Value::Number(_) => return DataType::Number,
            Value::Bool(_) => return DataType::Boolean,
            Value::String(s) if s.is_empty() => continue,
            Value::String(s) => {
                if looks_like_date(s) {
                    return DataType::Date;
                }
                if s.parse::<f64>().is_ok() {
                    return DataType::Number;
                }
                return DataType::Text;
            }
            Value::Null => continue,
            _ => return DataType::Text,
        }
    }
    DataType::Text
}

/// Check if a string looks like an ISO date (`YYYY-MM-DD`, optionally with a time part)
fn looks_like_date(s: &str) -> bool {
    let date = match s.split_once('T') {
        Some((date, _)) => date,
        None => s,
    };
    let parts: Vec<&str> = date.split('-').collect();
    parts.len() == 3
        && parts[0].len() == 4
        && parts[1].len() == 2
        && parts[2].len() == 2
        && parts.iter().all(|p| p.parse::<u32>().is_ok())
}

/// Convert a JSON value to a DataCell
fn json_value_to_cell(value: &Value, expected_type: &DataType) -> DataCell {
    match value {
        Value::Null => DataCell::Empty,
        Value::Bool(b) => DataCell::Boolean(*b),
        Value::Number(n) => n.as_f64().map(DataCell::Number).unwrap_or(DataCell::Empty),
        Value::String(s) => DataCell::parse(s, expected_type),
        Value::Array(arr) => DataCell::Text(
            arr.iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Object(_) => DataCell::Text(value.to_string()),
    }
}
