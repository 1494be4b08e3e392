//! Combining field clauses into one boolean query.

use serde_json::{json, Value};
use tracing::debug;

use crate::errors::SearchError;
use crate::query::clause::{build_clause, ClauseOutcome};
use table_search_shared::{FieldSpec, Operator};

/// What the compiler does with a field that yields no clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkipPolicy {
    /// Drop the field and keep compiling.
    #[default]
    Lenient,
    /// Fail compilation with [`SearchError::InvalidQuery`].
    Strict,
}

/// A fully assembled `bool` query, ready for the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery(Value);

impl CompiledQuery {
    /// The query as the engine's JSON DSL.
    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn into_json(self) -> Value {
        self.0
    }
}

/// Compile fields with [`SkipPolicy::Lenient`].
pub fn compile(fields: &[FieldSpec]) -> Result<CompiledQuery, SearchError> {
    compile_with(fields, SkipPolicy::Lenient)
}

/// Compile fields into `{"bool": {"must": [...], "must_not": [...]}}`.
///
/// Clauses keep the order of `fields`. A `!=` field lands under `must_not`,
/// everything else under `must`. Parse failures abort compilation regardless
/// of the policy.
pub fn compile_with(fields: &[FieldSpec], policy: SkipPolicy) -> Result<CompiledQuery, SearchError> {
    let mut must = Vec::new();
    let mut must_not = Vec::new();

    for field in fields {
        match build_clause(field)? {
            ClauseOutcome::Clause(clause) => {
                if field.operator == Operator::Neq {
                    must_not.push(clause);
                } else {
                    must.push(clause);
                }
            }
            ClauseOutcome::Skipped(reason) => match policy {
                SkipPolicy::Lenient => {
                    debug!(field = %field.field_name, reason = %reason, "Skipping field");
                }
                SkipPolicy::Strict => {
                    return Err(SearchError::invalid_query(format!(
                        "field {}: {}",
                        field.field_name, reason
                    )));
                }
            },
        }
    }

    Ok(CompiledQuery(json!({
        "bool": {
            "must": must,
            "must_not": must_not
        }
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn must(query: &CompiledQuery) -> &Vec<Value> {
        query.as_json()["bool"]["must"].as_array().unwrap()
    }

    fn must_not(query: &CompiledQuery) -> &Vec<Value> {
        query.as_json()["bool"]["must_not"].as_array().unwrap()
    }

    #[test]
    fn test_greater_than_goes_under_must() {
        let query = compile(&[FieldSpec::new("AA_PK", "BIGINT", Operator::Gt, "3")]).unwrap();

        assert_eq!(must(&query).len(), 1);
        assert!(must_not(&query).is_empty());
        assert_eq!(must(&query)[0]["range"]["AA_PK"]["gt"], 3);
    }

    #[test]
    fn test_neq_goes_under_must_not_for_every_class() {
        let fields = vec![
            FieldSpec::new("count", "INTEGER", Operator::Neq, "1"),
            FieldSpec::new("name", "VARCHAR", Operator::Neq, "jack"),
            FieldSpec::new("created", "DATE", Operator::Neq, "2024-01-01 00:00:00"),
        ];
        let query = compile(&fields).unwrap();

        assert!(must(&query).is_empty());
        assert_eq!(must_not(&query).len(), 3);
        assert!(must_not(&query)[0]["term"]["count"].is_number());
        assert_eq!(must_not(&query)[1]["term"]["name"], "jack");
        assert!(must_not(&query)[2]["range"]["created"]["gte"].is_number());
    }

    #[test]
    fn test_clause_order_follows_fields() {
        let fields = vec![
            FieldSpec::new("b", "INTEGER", Operator::Eq, "2"),
            FieldSpec::new("a", "VARCHAR", Operator::Like, "x"),
            FieldSpec::new("c", "INTEGER", Operator::Neq, "3"),
            FieldSpec::new("d", "CHAR", Operator::Contains, "y"),
        ];
        let query = compile(&fields).unwrap();

        let must = must(&query);
        assert_eq!(must.len(), 3);
        assert!(must[0]["term"]["b"].is_number());
        assert!(must[1]["wildcard"]["a"].is_string());
        assert!(must[2]["match_phrase"]["d"].is_string());
        assert_eq!(must_not(&query).len(), 1);
    }

    #[test]
    fn test_all_unknown_fields_compile_to_empty_bool() {
        let fields = vec![
            FieldSpec::new("flag", "BOOLEAN", Operator::Eq, "true"),
            FieldSpec::new("blob", "VARBINARY", Operator::Neq, "00"),
        ];
        let query = compile(&fields).unwrap();

        assert!(must(&query).is_empty());
        assert!(must_not(&query).is_empty());
    }

    #[test]
    fn test_empty_fields() {
        let query = compile(&[]).unwrap();
        assert_eq!(
            query.into_json(),
            json!({ "bool": { "must": [], "must_not": [] } })
        );
    }

    #[test]
    fn test_strict_policy_rejects_skipped_fields() {
        let fields = vec![
            FieldSpec::new("count", "INTEGER", Operator::Eq, "1"),
            FieldSpec::new("name", "VARCHAR", Operator::Gt, "m"),
        ];

        assert!(compile_with(&fields, SkipPolicy::Lenient).is_ok());

        let err = compile_with(&fields, SkipPolicy::Strict).unwrap_err();
        assert!(matches!(err, SearchError::InvalidQuery(_)));
    }

    #[test]
    fn test_parse_error_aborts_compilation() {
        let fields = vec![
            FieldSpec::new("count", "INTEGER", Operator::Eq, "1"),
            FieldSpec::new("created", "DATE", Operator::Gte, "yesterday"),
        ];

        let err = compile(&fields).unwrap_err();
        assert!(matches!(err, SearchError::ParseError(_)));
    }
}
