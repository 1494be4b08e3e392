//! Translation of structured field conditions into engine queries.
//!
//! A condition passes through three steps:
//!
//! 1. **Classifier**: the column type name is bucketed into numeric, date or string
//! 2. **Clause builder**: one field becomes one clause (or is skipped)
//! 3. **Compiler**: clauses are combined into a `bool` query, `!=` fields under `must_not`

mod classifier;
mod clause;
mod compiler;

pub use classifier::{classify, ColumnClass};
pub use clause::{build_clause, ClauseOutcome, SkipReason, DATE_FORMAT};
pub use compiler::{compile, compile_with, CompiledQuery, SkipPolicy};
