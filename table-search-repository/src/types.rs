//! Request and response types for search engine operations.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use table_search_shared::{Document, ResultSet};

/// Settings and field mappings for a new index.
///
/// `properties` maps each field name to the engine's native field type
/// (`text`, `keyword`, `long`, ...). An empty map creates the index with
/// settings only.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDefinition {
    /// Name of the index to create.
    pub name: String,
    /// Number of primary shards.
    pub number_of_shards: u32,
    /// Number of replicas per primary shard.
    pub number_of_replicas: u32,
    /// Field name to engine field type.
    pub properties: BTreeMap<String, String>,
}

impl IndexDefinition {
    /// Create a definition with settings only.
    pub fn new(name: impl Into<String>, number_of_shards: u32, number_of_replicas: u32) -> Self {
        Self {
            name: name.into(),
            number_of_shards,
            number_of_replicas,
            properties: BTreeMap::new(),
        }
    }

    /// Add a field mapping.
    pub fn with_property(mut self, field: impl Into<String>, engine_type: impl Into<String>) -> Self {
        self.properties.insert(field.into(), engine_type.into());
        self
    }
}

/// A query to execute against one or more indexes.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Indexes to search.
    pub indexes: Vec<String>,
    /// Request body (`query`, `sort`, ...).
    pub body: Value,
    /// Page size. `None` leaves the engine default.
    pub size: Option<usize>,
    /// Scroll keep-alive. When set, the engine opens a cursor and returns its id.
    pub scroll: Option<String>,
}

impl SearchRequest {
    pub fn new(indexes: Vec<String>, body: Value) -> Self {
        Self {
            indexes,
            body,
            size: None,
            scroll: None,
        }
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_scroll(mut self, keep_alive: impl Into<String>) -> Self {
        self.scroll = Some(keep_alive.into());
        self
    }
}

/// One page of hits as returned by the engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchPage {
    /// Total number of matching documents.
    pub total: u64,
    /// Source documents of the hits on this page.
    pub hits: Vec<Document>,
    /// Cursor id, present when a scroll was requested.
    pub scroll_id: Option<String>,
}

impl From<SearchPage> for ResultSet {
    fn from(page: SearchPage) -> Self {
        ResultSet {
            total_matched: page.total,
            records: page.hits,
        }
    }
}

/// A single document rejected by a bulk write.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkFailure {
    /// Position of the document in the submitted batch.
    pub position: usize,
    /// Reason reported by the engine.
    pub reason: String,
}

/// Summary of a bulk write.
///
/// Individual rejections are reported here rather than as an error so that
/// callers can handle partial failures.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BulkSummary {
    /// Total number of documents in the batch.
    pub total: usize,
    /// Number of documents indexed.
    pub succeeded: usize,
    /// Number of documents rejected.
    pub failed: usize,
    /// Details for each rejected document.
    pub failures: Vec<BulkFailure>,
}

impl BulkSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
