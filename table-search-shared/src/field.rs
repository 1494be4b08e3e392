//! Leaf conditions of a structured search.

use serde::{Deserialize, Serialize};

use crate::operator::Operator;

/// One user-specified search constraint on a single column.
///
/// `type_name` is the relational column type (e.g. `BIGINT`, `VARCHAR`) and
/// decides how the constraint is translated. `range_end` is only read by the
/// `range` operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// The indexed field name.
    pub field_name: String,
    /// Relational type name of the column.
    pub type_name: String,
    /// Comparison operator.
    #[serde(alias = "method")]
    pub operator: Operator,
    /// The compared value, or the range begin.
    pub value: String,
    /// End of the range for the `range` operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_end: Option<String>,
}

impl FieldSpec {
    /// Create a field spec without a range end.
    pub fn new(
        field_name: impl Into<String>,
        type_name: impl Into<String>,
        operator: Operator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            type_name: type_name.into(),
            operator,
            value: value.into(),
            range_end: None,
        }
    }

    /// Create a `range` field spec covering `[begin, end]`.
    pub fn range(
        field_name: impl Into<String>,
        type_name: impl Into<String>,
        begin: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self::new(field_name, type_name, Operator::Range, begin).with_range_end(end)
    }

    /// Set the range end.
    pub fn with_range_end(mut self, end: impl Into<String>) -> Self {
        self.range_end = Some(end.into());
        self
    }

    /// The type name upper-cased and trimmed, ready for classification.
    pub fn normalized_type(&self) -> String {
        self.type_name.trim().to_uppercase()
    }
}
