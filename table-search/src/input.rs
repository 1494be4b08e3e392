//! Readers for command line input files and arguments.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::Value;
use table_search_shared::{Document, SearchCondition};

use crate::AppError;

/// Read table rows from CSV with a header line.
///
/// Each row becomes a document keyed by column header. Values are kept as
/// strings; empty cells are stored as `null`.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<Document>, AppError> {
    let mut csv = csv::Reader::from_reader(reader);
    let headers = csv.headers()?.clone();

    let mut rows = Vec::new();
    for record in csv.records() {
        let record = record?;
        let row: Document = headers
            .iter()
            .zip(record.iter())
            .map(|(column, cell)| {
                let value = if cell.is_empty() {
                    Value::Null
                } else {
                    Value::String(cell.to_string())
                };
                (column.to_string(), value)
            })
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Read table rows from a CSV file.
pub fn read_rows_from_path(path: &Path) -> Result<Vec<Document>, AppError> {
    read_rows(File::open(path)?)
}

/// Read an advanced search condition from JSON.
pub fn read_condition<R: Read>(reader: R) -> Result<SearchCondition, AppError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Read an advanced search condition from a JSON file.
pub fn read_condition_from_path(path: &Path) -> Result<SearchCondition, AppError> {
    read_condition(File::open(path)?)
}

/// Parse a `NAME:TYPE` column argument.
pub fn parse_column(arg: &str) -> Result<(String, String), AppError> {
    match arg.split_once(':') {
        Some((name, column_type)) if !name.trim().is_empty() && !column_type.trim().is_empty() => {
            Ok((name.trim().to_string(), column_type.trim().to_string()))
        }
        _ => Err(AppError::input(format!(
            "column must be written as NAME:TYPE, got '{}'",
            arg
        ))),
    }
}
