//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use std::time::Duration;

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::request::JsonBody,
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesDeleteParts},
    BulkParts, ClearScrollParts, GetParts, OpenSearch, ScrollParts, SearchParts,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::opensearch::index_config::index_body;
use crate::types::{BulkFailure, BulkSummary, IndexDefinition, SearchPage, SearchRequest};
use table_search_shared::Document;

/// OpenSearch client implementation.
///
/// Holds one transport for the lifetime of the client. The transport is safe
/// to share between concurrent callers.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// let client = OpenSearchClient::new("http://localhost:9200", Duration::from_secs(60))?;
/// let healthy = client.health_check().await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    timeout: String,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `request_timeout` - Timeout applied to every request
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If connection setup fails
    pub fn new(url: &str, request_timeout: Duration) -> Result<Self, SearchError> {
        let parsed_url = Url::parse(url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .timeout(request_timeout)
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            timeout_secs = request_timeout.as_secs(),
            "Created OpenSearch client"
        );

        Ok(Self {
            client,
            timeout: format!("{}s", request_timeout.as_secs().max(1)),
        })
    }

    /// Read a response body as JSON, turning non-success statuses into the
    /// error built by `on_status`.
    async fn read_json(
        response: Response,
        on_status: impl FnOnce(String) -> SearchError,
    ) -> Result<Value, SearchError> {
        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Request failed");
            return Err(on_status(format!(
                "Request failed with status {}: {}",
                status, error_body
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SearchError::parse(format!("Failed to read response body: {}", e)))
    }

    /// Parse a search or scroll response into a page.
    ///
    /// Handles both `hits.total` as an object (`{"value": n}`) and as a bare
    /// number.
    fn parse_page(body: &Value) -> Result<SearchPage, SearchError> {
        let hits = body
            .get("hits")
            .ok_or_else(|| SearchError::parse("Response has no hits section"))?;

        let total = match hits.get("total") {
            Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
            Some(total) => total.get("value").and_then(Value::as_u64).unwrap_or(0),
            None => 0,
        };

        let documents = hits
            .get("hits")
            .and_then(Value::as_array)
            .map(|hits| hits.iter().filter_map(Self::parse_hit).collect())
            .unwrap_or_default();

        let scroll_id = body
            .get("_scroll_id")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(SearchPage {
            total,
            hits: documents,
            scroll_id,
        })
    }

    /// Extract the source document of a hit.
    fn parse_hit(hit: &Value) -> Option<Document> {
        hit.get("_source").and_then(Value::as_object).cloned()
    }

    /// Parse the items of a bulk response into a summary.
    fn parse_bulk_items(body: &Value, total: usize) -> BulkSummary {
        let failures: Vec<BulkFailure> = body
            .get("items")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(position, item)| {
                        let error = item.get("index").and_then(|i| i.get("error"))?;
                        let reason = error
                            .get("reason")
                            .and_then(Value::as_str)
                            .map(str::to_string)
                            .unwrap_or_else(|| error.to_string());
                        Some(BulkFailure { position, reason })
                    })
                    .collect()
            })
            .unwrap_or_default();

        BulkSummary {
            total,
            succeeded: total.saturating_sub(failures.len()),
            failed: failures.len(),
            failures,
        }
    }

    fn acknowledged(body: &Value) -> bool {
        body.get("acknowledged")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    #[instrument(skip(self, definition), fields(index = %definition.name))]
    async fn create_index(&self, definition: &IndexDefinition) -> Result<bool, SearchError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&definition.name))
            .timeout(&self.timeout)
            .body(index_body(definition))
            .send()
            .await?;

        let body = Self::read_json(response, SearchError::IndexCreationError).await?;
        let acknowledged = Self::acknowledged(&body);

        info!(acknowledged, "Index created");
        Ok(acknowledged)
    }

    #[instrument(skip(self))]
    async fn delete_index(&self, name: &str) -> Result<bool, SearchError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[name]))
            .timeout(&self.timeout)
            .send()
            .await?;

        let body = Self::read_json(response, SearchError::IndexDeletionError).await?;
        let acknowledged = Self::acknowledged(&body);

        info!(acknowledged, "Index deleted");
        Ok(acknowledged)
    }

    #[instrument(skip(self, documents), fields(count = documents.len()))]
    async fn bulk_write(
        &self,
        index: &str,
        documents: &[Document],
    ) -> Result<BulkSummary, SearchError> {
        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(documents.len() * 2);
        for document in documents {
            body.push(json!({ "index": {} }).into());
            body.push(Value::Object(document.clone()).into());
        }

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .timeout(&self.timeout)
            .body(body)
            .send()
            .await?;

        let body = Self::read_json(response, SearchError::BulkIndexError).await?;
        let summary = Self::parse_bulk_items(&body, documents.len());

        if summary.has_failures() {
            error!(
                failed = summary.failed,
                total = summary.total,
                "Bulk write had failures"
            );
        } else {
            debug!(total = summary.total, "Bulk write completed");
        }
        Ok(summary)
    }

    #[instrument(skip(self, request), fields(indexes = ?request.indexes, size = ?request.size))]
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, SearchError> {
        let indexes: Vec<&str> = request.indexes.iter().map(String::as_str).collect();

        let mut search = self
            .client
            .search(SearchParts::Index(&indexes))
            .body(request.body.clone());
        if let Some(size) = request.size {
            search = search.size(size as i64);
        }
        if let Some(keep_alive) = request.scroll.as_deref() {
            search = search.scroll(keep_alive);
        }

        let response = search.send().await?;
        let body = Self::read_json(response, SearchError::QueryError).await?;
        let page = Self::parse_page(&body)?;

        debug!(total = page.total, hits = page.hits.len(), "Search completed");
        Ok(page)
    }

    #[instrument(skip(self, scroll_id))]
    async fn scroll(&self, scroll_id: &str, keep_alive: &str) -> Result<SearchPage, SearchError> {
        let response = self
            .client
            .scroll(ScrollParts::None)
            .body(json!({
                "scroll": keep_alive,
                "scroll_id": scroll_id
            }))
            .send()
            .await?;

        let body = Self::read_json(response, SearchError::QueryError).await?;
        let page = Self::parse_page(&body)?;

        debug!(hits = page.hits.len(), "Scroll continued");
        Ok(page)
    }

    #[instrument(skip(self, scroll_id))]
    async fn clear_scroll(&self, scroll_id: &str) -> Result<(), SearchError> {
        let response = self
            .client
            .clear_scroll(ClearScrollParts::None)
            .body(json!({ "scroll_id": [scroll_id] }))
            .send()
            .await?;

        Self::read_json(response, SearchError::QueryError).await?;
        debug!("Scroll released");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_document(&self, index: &str, id: &str) -> Result<Option<Document>, SearchError> {
        let response = self.client.get(GetParts::IndexId(index, id)).send().await?;

        // 404 is acceptable - document may not exist
        if response.status_code().as_u16() == 404 {
            debug!("Document not found");
            return Ok(None);
        }

        let body = Self::read_json(response, SearchError::QueryError).await?;
        Ok(Self::parse_hit(&body))
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        if !response.status_code().is_success() {
            return Ok(false);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;
        let status = body.get("status").and_then(Value::as_str).unwrap_or("red");

        debug!(status = %status, "Cluster health");
        Ok(matches!(status, "green" | "yellow"))
    }
}
