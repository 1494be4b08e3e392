//! Error types for the table search repository.

mod search_error;

pub use search_error::SearchError;
