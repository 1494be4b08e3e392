//! OpenSearch index settings and mappings.
//!
//! This module maps relational column types onto engine field types and
//! builds the body of index creation requests.

use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::types::IndexDefinition;

/// Relational column type to engine field type.
///
/// Only these column types can be mapped when creating an index for a table.
pub const TYPE_CATALOG: [(&str, &str); 7] = [
    ("VARCHAR", "text"),
    ("CHAR", "keyword"),
    ("DATE", "date"),
    ("INTEGER", "long"),
    ("BIGINT", "long"),
    ("BOOLEAN", "boolean"),
    ("DOUBLE", "double"),
];

/// Look up the engine field type for a relational column type.
///
/// The column type is upper-cased and trimmed before lookup.
pub fn engine_type_for(column_type: &str) -> Option<&'static str> {
    let normalized = column_type.trim().to_uppercase();
    TYPE_CATALOG
        .iter()
        .find(|(relational, _)| *relational == normalized)
        .map(|(_, engine)| *engine)
}

/// Generate a unique index name for a table.
///
/// Uses format: `{database}_{table}_{uuid}` in lower case, with the uuid
/// written without hyphens.
pub fn unique_index_name(database: &str, table: &str) -> String {
    format!(
        "{}_{}_{}",
        database.to_lowercase(),
        table.to_lowercase(),
        Uuid::new_v4().simple()
    )
}

/// Build the body of an index creation request.
///
/// The `mappings` section is only present when the definition has fields.
pub fn index_body(definition: &IndexDefinition) -> Value {
    let mut body = json!({
        "settings": {
            "number_of_shards": definition.number_of_shards,
            "number_of_replicas": definition.number_of_replicas
        }
    });

    if !definition.properties.is_empty() {
        let properties: Map<String, Value> = definition
            .properties
            .iter()
            .map(|(field, engine_type)| (field.clone(), json!({ "type": engine_type })))
            .collect();
        body["mappings"] = json!({ "properties": properties });
    }

    body
}
