//! # Table Search Shared
//!
//! Plain data types shared between the table search repository and its
//! callers: structured search conditions, page windows and result sets.

mod condition;
mod field;
mod operator;
mod page;

pub use condition::{SearchCondition, SortDirection, SortField};
pub use field::FieldSpec;
pub use operator::{Operator, ParseOperatorError};
pub use page::{Document, PageWindow, PageWindowError, ResultSet};
