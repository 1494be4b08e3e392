//! # Table Search Repository
//!
//! This crate translates table-oriented search requests into search engine
//! queries and pages through the results. It includes definitions for errors,
//! interfaces, the query translator, the scroll cursor walker, and a concrete
//! implementation for OpenSearch.

pub mod client;
pub mod config;
pub mod cursor;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod query;
pub mod types;

pub use client::TableSearchClient;
pub use config::SearchClientConfig;
pub use cursor::CursorWalker;
pub use errors::SearchError;
pub use interfaces::SearchEngineClient;
pub use opensearch::OpenSearchClient;
pub use query::{compile, compile_with, CompiledQuery, SkipPolicy};
pub use types::{BulkFailure, BulkSummary, IndexDefinition, SearchPage, SearchRequest};
