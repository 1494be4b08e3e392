//! Single-field clause construction.
//!
//! Each supported (class, operator) pair maps onto one clause:
//!
//! | Class   | `=` / `!=`              | `>` `<` `>=` `<=` | `range`            | `contains`     | `like`           |
//! |---------|-------------------------|-------------------|--------------------|----------------|------------------|
//! | numeric | `term`                  | `range`           | -                  | -              | -                |
//! | string  | `term`                  | -                 | -                  | `match_phrase` | `wildcard *v*`   |
//! | date    | `range [t, t]`          | `range` from `t`  | `range [t0, t1]`   | -              | -                |
//!
//! `!=` produces the same clause as `=`. Negation is applied by the compiler.

use chrono::NaiveDateTime;
use serde_json::{json, Value};

use crate::errors::SearchError;
use crate::query::classifier::{classify, ColumnClass};
use table_search_shared::{FieldSpec, Operator};

/// Timestamp format accepted for date fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Why a field produced no clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The column type is not numeric, date or string.
    UnknownType(String),
    /// The operator is not wired for the column's class.
    UnsupportedOperator { class: ColumnClass, operator: Operator },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::UnknownType(type_name) => write!(f, "unknown column type {}", type_name),
            SkipReason::UnsupportedOperator { class, operator } => {
                write!(f, "operator {} is not supported for {:?} columns", operator, class)
            }
        }
    }
}

/// Result of translating one field.
#[derive(Debug, Clone, PartialEq)]
pub enum ClauseOutcome {
    Clause(Value),
    Skipped(SkipReason),
}

impl ClauseOutcome {
    fn unsupported(class: ColumnClass, operator: Operator) -> Self {
        ClauseOutcome::Skipped(SkipReason::UnsupportedOperator { class, operator })
    }
}

/// Translate one field into a clause.
///
/// Fields whose type or operator cannot be translated come back as
/// [`ClauseOutcome::Skipped`]. Date fields with an unparseable value, or a
/// date `range` without an end, fail with [`SearchError::ParseError`].
pub fn build_clause(field: &FieldSpec) -> Result<ClauseOutcome, SearchError> {
    let type_name = field.normalized_type();
    match classify(&type_name) {
        ColumnClass::Numeric => Ok(numeric_clause(field)),
        ColumnClass::String => Ok(string_clause(field)),
        ColumnClass::Date => date_clause(field),
        ColumnClass::Unknown => Ok(ClauseOutcome::Skipped(SkipReason::UnknownType(type_name))),
    }
}

fn numeric_clause(field: &FieldSpec) -> ClauseOutcome {
    let name = field.field_name.as_str();
    let value = numeric_value(&field.value);
    match field.operator {
        Operator::Eq | Operator::Neq => ClauseOutcome::Clause(term(name, value)),
        Operator::Gt => ClauseOutcome::Clause(range(name, "gt", value)),
        Operator::Lt => ClauseOutcome::Clause(range(name, "lt", value)),
        Operator::Gte => ClauseOutcome::Clause(range(name, "gte", value)),
        Operator::Lte => ClauseOutcome::Clause(range(name, "lte", value)),
        op => ClauseOutcome::unsupported(ColumnClass::Numeric, op),
    }
}

fn string_clause(field: &FieldSpec) -> ClauseOutcome {
    let name = field.field_name.as_str();
    match field.operator {
        Operator::Eq | Operator::Neq => ClauseOutcome::Clause(term(name, json!(field.value))),
        Operator::Contains => ClauseOutcome::Clause(json!({
            "match_phrase": { name: field.value }
        })),
        Operator::Like => ClauseOutcome::Clause(json!({
            "wildcard": { name: format!("*{}*", field.value) }
        })),
        op => ClauseOutcome::unsupported(ColumnClass::String, op),
    }
}

fn date_clause(field: &FieldSpec) -> Result<ClauseOutcome, SearchError> {
    let name = field.field_name.as_str();
    let begin = || parse_timestamp(field, &field.value);

    let clause = match field.operator {
        Operator::Eq | Operator::Neq => {
            let at = begin()?;
            json!({ "range": { name: { "gte": at, "lte": at } } })
        }
        Operator::Gt => range(name, "gt", json!(begin()?)),
        Operator::Lt => range(name, "lt", json!(begin()?)),
        Operator::Gte => range(name, "gte", json!(begin()?)),
        Operator::Lte => range(name, "lte", json!(begin()?)),
        Operator::Range => {
            let from = begin()?;
            let raw_end = field.range_end.as_deref().ok_or_else(|| {
                SearchError::parse(format!(
                    "range on date field {} requires a range end",
                    field.field_name
                ))
            })?;
            let to = parse_timestamp(field, raw_end)?;
            json!({ "range": { name: { "gte": from, "lte": to } } })
        }
        Operator::Contains | Operator::Like => {
            return Ok(ClauseOutcome::unsupported(ColumnClass::Date, field.operator));
        }
    };
    Ok(ClauseOutcome::Clause(clause))
}

fn term(name: &str, value: Value) -> Value {
    json!({ "term": { name: value } })
}

fn range(name: &str, bound: &str, value: Value) -> Value {
    json!({ "range": { name: { bound: value } } })
}

/// Epoch milliseconds of a `yyyy-MM-dd HH:mm:ss` timestamp, read as UTC.
fn parse_timestamp(field: &FieldSpec, raw: &str) -> Result<i64, SearchError> {
    NaiveDateTime::parse_from_str(raw.trim(), DATE_FORMAT)
        .map(|ts| ts.and_utc().timestamp_millis())
        .map_err(|e| {
            SearchError::parse(format!(
                "invalid timestamp {:?} for field {}: {}",
                raw, field.field_name, e
            ))
        })
}

/// Numbers are sent as JSON numbers when they parse, otherwise as given.
fn numeric_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return json!(n);
    }
    if let Ok(n) = trimmed.parse::<u64>() {
        return json!(n);
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => json!(n),
        _ => json!(trimmed),
    }
}
