//! Advanced search conditions.

use serde::{Deserialize, Serialize};

use crate::field::FieldSpec;

/// Sort order for a sorted search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The engine's name for this order.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Field and direction to sort results by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    pub field_name: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortField {
    pub fn asc(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// One advanced-search request.
///
/// All `fields` are combined with AND (or AND-NOT for `!=`). Their order is
/// kept so the compiled query is deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchCondition {
    /// Indexes to search.
    pub target_indexes: Vec<String>,
    /// Leaf conditions.
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    /// Optional sort.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortField>,
}

impl SearchCondition {
    /// Create a condition over the given indexes with no fields.
    pub fn new<I, S>(target_indexes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target_indexes: target_indexes.into_iter().map(Into::into).collect(),
            fields: Vec::new(),
            sort: None,
        }
    }

    /// Append a field constraint.
    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Set the sort.
    pub fn with_sort(mut self, sort: SortField) -> Self {
        self.sort = Some(sort);
        self
    }
}
