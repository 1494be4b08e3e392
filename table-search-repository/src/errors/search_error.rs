//! Search error types.
//!
//! This module defines the error types that can occur while translating
//! conditions and talking to the search engine.

use table_search_shared::PageWindowError;
use thiserror::Error;

/// Errors that can occur during search engine operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Failed to establish connection to the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A request could not be sent or its response could not be read.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// Search query execution failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// Bulk indexing request failed.
    #[error("Bulk index error: {0}")]
    BulkIndexError(String),

    /// Failed to create an index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to delete an index.
    #[error("Index deletion error: {0}")]
    IndexDeletionError(String),

    /// A value or a response body could not be parsed.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The request cannot be turned into a valid query.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// A column type has no engine field type.
    #[error("Unsupported column type {type_name} for column {column}")]
    UnsupportedColumnType { column: String, type_name: String },

    /// Batch size exceeds configured maximum.
    #[error("Batch size {provided} exceeds maximum {max}")]
    BatchSizeExceeded { provided: usize, max: usize },

    /// Page number or page size out of range.
    #[error("Invalid page window: {0}")]
    InvalidPageWindow(#[from] PageWindowError),
}

impl SearchError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a bulk index error.
    pub fn bulk_index(msg: impl Into<String>) -> Self {
        Self::BulkIndexError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create an invalid query error.
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// Create an unsupported column type error.
    pub fn unsupported_column_type(column: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::UnsupportedColumnType {
            column: column.into(),
            type_name: type_name.into(),
        }
    }

    /// Create a batch size exceeded error.
    pub fn batch_size_exceeded(provided: usize, max: usize) -> Self {
        Self::BatchSizeExceeded { provided, max }
    }
}

impl From<opensearch::Error> for SearchError {
    fn from(err: opensearch::Error) -> Self {
        Self::TransportError(err.to_string())
    }
}
