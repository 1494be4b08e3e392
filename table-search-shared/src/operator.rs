//! Comparison operators for structured field searches.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Comparison operator applied to a single field.
///
/// The set is closed. On the wire each operator is written with its symbolic
/// form (`=`, `!=`, `>`, `<`, `>=`, `<=`, `range`, `contains`, `like`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operator {
    Eq,
    Neq,
    Gt,
    Lt,
    Gte,
    Lte,
    Range,
    Contains,
    Like,
}

/// Returned when a string does not name a known operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown operator: {0}")]
pub struct ParseOperatorError(pub String);

impl Operator {
    /// All operators, in declaration order.
    pub const ALL: [Operator; 9] = [
        Operator::Eq,
        Operator::Neq,
        Operator::Gt,
        Operator::Lt,
        Operator::Gte,
        Operator::Lte,
        Operator::Range,
        Operator::Contains,
        Operator::Like,
    ];

    /// The symbolic form of the operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Neq => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Gte => ">=",
            Operator::Lte => "<=",
            Operator::Range => "range",
            Operator::Contains => "contains",
            Operator::Like => "like",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ParseOperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Operator::ALL
            .iter()
            .copied()
            .find(|op| op.symbol().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseOperatorError(s.to_string()))
    }
}

impl TryFrom<String> for Operator {
    type Error = ParseOperatorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.symbol().to_string()
    }
}
