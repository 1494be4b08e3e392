//! OpenSearch implementation of the search engine client.
//!
//! This module provides a concrete implementation of `SearchEngineClient`
//! using OpenSearch as the backend, plus the index mappings and request
//! bodies it sends.

mod client;
pub mod index_config;
pub mod queries;

pub use client::OpenSearchClient;
pub use index_config::{engine_type_for, unique_index_name, TYPE_CATALOG};
