//! OpenSearch request bodies.
//!
//! This module wraps keyword searches and compiled advanced-search queries
//! into complete search request bodies.

use serde_json::{json, Value};

use crate::query::CompiledQuery;
use table_search_shared::SortField;

/// Build a keyword search body.
///
/// The keyword is wrapped in `*...*` and matched with `query_string` across
/// all fields of the index.
pub fn build_keyword_query(keyword: &str) -> Value {
    json!({
        "query": {
            "query_string": {
                "query": format!("*{}*", keyword)
            }
        }
    })
}

/// Build an advanced search body from a compiled query and optional sort.
pub fn build_advanced_query(query: CompiledQuery, sort: Option<&SortField>) -> Value {
    let mut body = json!({ "query": query.into_json() });
    if let Some(sort) = sort {
        body["sort"] = json!([
            { sort.field_name.as_str(): { "order": sort.direction.as_str() } }
        ]);
    }
    body
}
