//! Search engine client trait definition.
//!
//! This module defines the abstract interface for search engine operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;

use crate::errors::SearchError;
use crate::types::{BulkSummary, IndexDefinition, SearchPage, SearchRequest};
use table_search_shared::Document;

/// Abstract interface for search engine operations.
///
/// Each method maps onto one request to the engine. Nothing here retries;
/// every failure is returned to the caller as is.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so a single client can be shared
/// between concurrent callers.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Create an index with the given settings and mappings.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the engine acknowledged the creation
    /// * `Ok(false)` - If the request succeeded but was not acknowledged in time
    /// * `Err(SearchError)` - If the creation fails
    async fn create_index(&self, definition: &IndexDefinition) -> Result<bool, SearchError>;

    /// Delete an index.
    ///
    /// # Returns
    ///
    /// * `Ok(bool)` - The engine's acknowledgement
    /// * `Err(SearchError)` - If the deletion fails (including a missing index)
    async fn delete_index(&self, name: &str) -> Result<bool, SearchError>;

    /// Index documents in a single bulk request.
    ///
    /// Document ids are assigned by the engine.
    ///
    /// # Returns
    ///
    /// * `Ok(BulkSummary)` - Per-document outcome, including rejected documents
    /// * `Err(SearchError)` - If the bulk request itself fails
    async fn bulk_write(&self, index: &str, documents: &[Document])
        -> Result<BulkSummary, SearchError>;

    /// Execute a query.
    ///
    /// When `request.scroll` is set the engine opens a cursor and the returned
    /// page carries its id. The caller owns that cursor and must release it
    /// with [`clear_scroll`](Self::clear_scroll).
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, SearchError>;

    /// Fetch the next page of an open cursor.
    ///
    /// The returned page carries the refreshed cursor id.
    async fn scroll(&self, scroll_id: &str, keep_alive: &str) -> Result<SearchPage, SearchError>;

    /// Release an open cursor.
    async fn clear_scroll(&self, scroll_id: &str) -> Result<(), SearchError>;

    /// Fetch a single document by id.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(document))` - The document source
    /// * `Ok(None)` - If the document does not exist
    /// * `Err(SearchError)` - If the lookup fails
    async fn get_document(&self, index: &str, id: &str) -> Result<Option<Document>, SearchError>;

    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the search engine is healthy
    /// * `Ok(false)` - If the search engine is unhealthy
    /// * `Err(SearchError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SearchError>;
}
