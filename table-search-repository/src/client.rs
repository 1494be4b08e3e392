//! Table search client implementation.
//!
//! This module provides the main client for interacting with the search engine.
//! Application code uses this to create indexes for tables, dump rows, and run
//! keyword or advanced searches.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::config::SearchClientConfig;
use crate::cursor::CursorWalker;
use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::opensearch::index_config::{engine_type_for, unique_index_name};
use crate::opensearch::queries::{build_advanced_query, build_keyword_query};
use crate::query::compile_with;
use crate::types::{BulkSummary, IndexDefinition, SearchRequest};
use table_search_shared::{Document, PageWindow, ResultSet, SearchCondition};

/// The main client for interacting with the search engine.
/// Application code uses this to manage indexes, load rows and search them.
pub struct TableSearchClient {
    engine: Arc<dyn SearchEngineClient>,
    config: SearchClientConfig,
}

impl TableSearchClient {
    /// Create a new TableSearchClient with default configuration.
    pub fn new(engine: Arc<dyn SearchEngineClient>) -> Self {
        Self {
            engine,
            config: SearchClientConfig::default(),
        }
    }

    /// Create a new TableSearchClient with custom configuration.
    pub fn with_config(engine: Arc<dyn SearchEngineClient>, config: SearchClientConfig) -> Self {
        Self { engine, config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchClientConfig {
        &self.config
    }

    /// Check if batch size exceeds the configured limit.
    fn validate_batch_size(&self, size: usize) -> Result<(), SearchError> {
        if let Some(max) = self.config.max_batch_size {
            if size > max {
                return Err(SearchError::batch_size_exceeded(size, max));
            }
        }
        Ok(())
    }

    fn validate_index_name(name: &str) -> Result<(), SearchError> {
        if name.trim().is_empty() {
            return Err(SearchError::invalid_query("index name is required"));
        }
        Ok(())
    }

    fn walker(&self) -> CursorWalker<'_> {
        CursorWalker::new(self.engine.as_ref(), &self.config.scroll_keep_alive)
    }

    /// Create an index for a relational table.
    /// Input: database and table names, column name to relational column type
    /// Output: Result<String, SearchError> (the generated index name)
    ///
    /// Every column type must be in the type catalog; otherwise nothing is
    /// sent and the first unsupported column is reported.
    #[instrument(skip(self, columns), fields(columns = columns.len()))]
    pub async fn create_table_index(
        &self,
        database: &str,
        table: &str,
        columns: &BTreeMap<String, String>,
    ) -> Result<String, SearchError> {
        if database.trim().is_empty() || table.trim().is_empty() {
            return Err(SearchError::invalid_query("database and table are required"));
        }

        let name = unique_index_name(database, table);
        let mut definition = IndexDefinition::new(
            &name,
            self.config.number_of_shards,
            self.config.number_of_replicas,
        );
        for (column, column_type) in columns {
            let engine_type = engine_type_for(column_type)
                .ok_or_else(|| SearchError::unsupported_column_type(column, column_type))?;
            definition = definition.with_property(column, engine_type);
        }

        self.engine.create_index(&definition).await?;

        info!(index = %name, "Created index for table");
        Ok(name)
    }

    /// Create an index with settings only.
    /// Output: Result<bool, SearchError> (the engine's acknowledgement)
    pub async fn create_index(&self, name: &str) -> Result<bool, SearchError> {
        Self::validate_index_name(name)?;

        let definition = IndexDefinition::new(
            name,
            self.config.number_of_shards,
            self.config.number_of_replicas,
        );
        self.engine.create_index(&definition).await
    }

    /// Delete an index.
    /// Output: Result<bool, SearchError> (the engine's acknowledgement)
    pub async fn delete_index(&self, name: &str) -> Result<bool, SearchError> {
        Self::validate_index_name(name)?;
        self.engine.delete_index(name).await
    }

    /// Dump rows into an index with a single bulk request.
    /// Input: index name, rows as flat documents
    /// Output: Result<BulkSummary, SearchError>
    ///
    /// Individual rejections are reported in the summary.
    ///
    /// The batch size is limited by the configured max_batch_size (default: 1000).
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub async fn dump(&self, index: &str, rows: Vec<Document>) -> Result<BulkSummary, SearchError> {
        Self::validate_index_name(index)?;

        if rows.is_empty() {
            return Ok(BulkSummary::default());
        }

        self.validate_batch_size(rows.len())?;

        self.engine.bulk_write(index, &rows).await
    }

    /// Keyword search across several indexes.
    /// Input: keyword, index names
    /// Output: Result<BTreeMap<index, ResultSet>, SearchError>
    ///
    /// Each index is searched separately and returns its first page at the
    /// engine's default size.
    #[instrument(skip(self))]
    pub async fn comprehensive_search(
        &self,
        keyword: &str,
        indexes: &[String],
    ) -> Result<BTreeMap<String, ResultSet>, SearchError> {
        let body = Self::keyword_body(keyword)?;

        let mut results = BTreeMap::new();
        for index in indexes {
            let request = SearchRequest::new(vec![index.clone()], body.clone());
            let page = self.engine.search(&request).await?;

            debug!(index = %index, total = page.total, "Keyword search completed");
            results.insert(index.clone(), page.into());
        }
        Ok(results)
    }

    /// Keyword search over one index, returning the page described by `window`.
    #[instrument(skip(self))]
    pub async fn comprehensive_page_search(
        &self,
        keyword: &str,
        index: &str,
        window: PageWindow,
    ) -> Result<ResultSet, SearchError> {
        Self::validate_index_name(index)?;
        let body = Self::keyword_body(keyword)?;

        self.walker().walk(vec![index.to_string()], body, window).await
    }

    /// Structured search, returning the page described by `window`.
    /// Input: SearchCondition (target indexes, field constraints, optional sort)
    /// Output: Result<ResultSet, SearchError>
    ///
    /// The condition is compiled before any request is sent, so an
    /// unparseable date value never reaches the engine.
    #[instrument(skip(self, condition), fields(indexes = ?condition.target_indexes, fields = condition.fields.len()))]
    pub async fn advanced_search(
        &self,
        condition: &SearchCondition,
        window: PageWindow,
    ) -> Result<ResultSet, SearchError> {
        if condition.target_indexes.is_empty() {
            return Err(SearchError::invalid_query("at least one target index is required"));
        }
        for index in &condition.target_indexes {
            Self::validate_index_name(index)?;
        }

        let compiled = compile_with(&condition.fields, self.config.skip_policy)?;
        let body = build_advanced_query(compiled, condition.sort.as_ref());

        self.walker()
            .walk(condition.target_indexes.clone(), body, window)
            .await
    }

    /// Fetch one document by id.
    /// Output: Result<Option<Document>, SearchError> (None if it doesn't exist)
    pub async fn get_document(&self, index: &str, id: &str) -> Result<Option<Document>, SearchError> {
        Self::validate_index_name(index)?;
        if id.is_empty() {
            return Err(SearchError::invalid_query("document id is required"));
        }
        self.engine.get_document(index, id).await
    }

    /// Check if the search engine is healthy.
    pub async fn health_check(&self) -> Result<bool, SearchError> {
        self.engine.health_check().await
    }

    fn keyword_body(keyword: &str) -> Result<serde_json::Value, SearchError> {
        if keyword.trim().is_empty() {
            return Err(SearchError::invalid_query("keyword is required"));
        }
        Ok(build_keyword_query(keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchClientConfig;
    use crate::cursor::tests::{page, Call, ScriptedEngine};
    use crate::query::SkipPolicy;
    use async_trait::async_trait;
    use serde_json::json;
    use table_search_shared::{FieldSpec, Operator, SortField};
    use tokio::sync::Mutex;

    /// Mock engine recording index administration and bulk calls.
    struct MockEngine {
        created: Arc<Mutex<Vec<IndexDefinition>>>,
        deleted: Arc<Mutex<Vec<String>>>,
        written: Arc<Mutex<Vec<(String, usize)>>>,
        searched: Arc<Mutex<Vec<SearchRequest>>>,
    }

    impl MockEngine {
        fn new() -> Self {
            Self {
                created: Arc::new(Mutex::new(Vec::new())),
                deleted: Arc::new(Mutex::new(Vec::new())),
                written: Arc::new(Mutex::new(Vec::new())),
                searched: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl SearchEngineClient for MockEngine {
        async fn create_index(&self, definition: &IndexDefinition) -> Result<bool, SearchError> {
            self.created.lock().await.push(definition.clone());
            Ok(true)
        }

        async fn delete_index(&self, name: &str) -> Result<bool, SearchError> {
            self.deleted.lock().await.push(name.to_string());
            Ok(true)
        }

        async fn bulk_write(
            &self,
            index: &str,
            documents: &[Document],
        ) -> Result<BulkSummary, SearchError> {
            self.written
                .lock()
                .await
                .push((index.to_string(), documents.len()));
            Ok(BulkSummary {
                total: documents.len(),
                succeeded: documents.len(),
                failed: 0,
                failures: vec![],
            })
        }

        async fn search(&self, request: &SearchRequest) -> Result<crate::types::SearchPage, SearchError> {
            self.searched.lock().await.push(request.clone());
            page(1, &["jackPan"], "unused")
        }

        async fn scroll(
            &self,
            _scroll_id: &str,
            _keep_alive: &str,
        ) -> Result<crate::types::SearchPage, SearchError> {
            Err(SearchError::query("not scripted"))
        }

        async fn clear_scroll(&self, _scroll_id: &str) -> Result<(), SearchError> {
            Ok(())
        }

        async fn get_document(&self, index: &str, id: &str) -> Result<Option<Document>, SearchError> {
            if index == "jack_pan_test" && id == "1" {
                return Ok(json!({ "full_name": "jackPan" }).as_object().cloned());
            }
            Ok(None)
        }

        async fn health_check(&self) -> Result<bool, SearchError> {
            Ok(true)
        }
    }

    fn row(name: &str) -> Document {
        json!({ "name": name }).as_object().cloned().unwrap()
    }

    fn columns(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(column, column_type)| (column.to_string(), column_type.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_create_table_index() {
        let engine = Arc::new(MockEngine::new());
        let client = TableSearchClient::new(engine.clone());

        let name = client
            .create_table_index("Shop", "Orders", &columns(&[("NAME", "VARCHAR"), ("AA_PK", "BIGINT")]))
            .await
            .unwrap();

        assert!(name.starts_with("shop_orders_"));
        let created = engine.created.lock().await;
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].name, name);
        assert_eq!(created[0].number_of_shards, 3);
        assert_eq!(created[0].number_of_replicas, 2);
        assert_eq!(created[0].properties["NAME"], "text");
        assert_eq!(created[0].properties["AA_PK"], "long");
    }

    #[tokio::test]
    async fn test_create_table_index_rejects_unsupported_type() {
        let engine = Arc::new(MockEngine::new());
        let client = TableSearchClient::new(engine.clone());

        let err = client
            .create_table_index("shop", "orders", &columns(&[("CREATED", "TIMESTAMP")]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SearchError::UnsupportedColumnType { ref column, .. } if column == "CREATED"
        ));
        assert!(engine.created.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_and_delete_index() {
        let engine = Arc::new(MockEngine::new());
        let config = SearchClientConfig::default().shards(1, 0);
        let client = TableSearchClient::with_config(engine.clone(), config);

        assert!(client.create_index("jack_create").await.unwrap());
        assert!(client.delete_index("jack_create").await.unwrap());

        let created = engine.created.lock().await;
        assert_eq!(created[0].name, "jack_create");
        assert_eq!(created[0].number_of_shards, 1);
        assert!(created[0].properties.is_empty());
        assert_eq!(*engine.deleted.lock().await, vec!["jack_create".to_string()]);
    }

    #[tokio::test]
    async fn test_index_name_required() {
        let client = TableSearchClient::new(Arc::new(MockEngine::new()));

        assert!(matches!(
            client.create_index(" ").await,
            Err(SearchError::InvalidQuery(_))
        ));
        assert!(matches!(
            client.delete_index("").await,
            Err(SearchError::InvalidQuery(_))
        ));
    }

    #[tokio::test]
    async fn test_dump() {
        let engine = Arc::new(MockEngine::new());
        let client = TableSearchClient::new(engine.clone());

        let summary = client
            .dump("jack_pan_test", vec![row("jackPan"), row("rose")])
            .await
            .unwrap();

        assert_eq!(summary.total, 2);
        assert!(!summary.has_failures());
        assert_eq!(
            *engine.written.lock().await,
            vec![("jack_pan_test".to_string(), 2)]
        );
    }

    #[tokio::test]
    async fn test_dump_empty_sends_nothing() {
        let engine = Arc::new(MockEngine::new());
        let client = TableSearchClient::new(engine.clone());

        let summary = client.dump("jack_pan_test", vec![]).await.unwrap();

        assert_eq!(summary.total, 0);
        assert!(engine.written.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_dump_batch_size_exceeded() {
        let engine = Arc::new(MockEngine::new());
        let config = SearchClientConfig::with_max_batch_size(5);
        let client = TableSearchClient::with_config(engine.clone(), config);

        let rows: Vec<Document> = (0..10).map(|i| row(&format!("row {}", i))).collect();
        let result = client.dump("jack_pan_test", rows).await;

        assert!(matches!(
            result.unwrap_err(),
            SearchError::BatchSizeExceeded {
                provided: 10,
                max: 5
            }
        ));
        assert!(engine.written.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_dump_unlimited() {
        let engine = Arc::new(MockEngine::new());
        let client = TableSearchClient::with_config(engine.clone(), SearchClientConfig::unlimited());

        let rows: Vec<Document> = (0..5000).map(|i| row(&format!("row {}", i))).collect();
        let summary = client.dump("big", rows).await.unwrap();

        assert_eq!(summary.succeeded, 5000);
    }

    #[tokio::test]
    async fn test_comprehensive_search_per_index() {
        let engine = Arc::new(MockEngine::new());
        let client = TableSearchClient::new(engine.clone());

        let indexes = vec!["a".to_string(), "b".to_string()];
        let results = client.comprehensive_search("jack", &indexes).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results["a"].total_matched, 1);
        assert_eq!(results["b"].records[0]["name"], "jackPan");

        let searched = engine.searched.lock().await;
        assert_eq!(searched.len(), 2);
        assert_eq!(searched[0].indexes, vec!["a".to_string()]);
        assert_eq!(searched[0].body["query"]["query_string"]["query"], "*jack*");
        assert!(searched[0].scroll.is_none());
    }

    #[tokio::test]
    async fn test_keyword_required() {
        let client = TableSearchClient::new(Arc::new(MockEngine::new()));

        let err = client
            .comprehensive_search("  ", &["a".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn test_comprehensive_page_search_walks_cursor() {
        let engine = Arc::new(ScriptedEngine::new(vec![
            page(4, &["a", "b"], "s1"),
            page(4, &["c", "d"], "s2"),
        ]));
        let client = TableSearchClient::new(engine.clone());

        let window = PageWindow::new(2, 2).unwrap();
        let result = client
            .comprehensive_page_search("jack", "jack_pan_test", window)
            .await
            .unwrap();

        assert_eq!(result.records[0]["name"], "c");
        assert_eq!(
            *engine.calls.lock().await,
            vec![
                Call::Search {
                    size: Some(2),
                    scroll: Some("1m".to_string())
                },
                Call::Scroll("s1".to_string()),
                Call::ClearScroll("s2".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_advanced_search() {
        let engine = Arc::new(ScriptedEngine::new(vec![page(1, &["jackPan"], "s1")]));
        let config = SearchClientConfig::default().scroll_keep_alive("30s");
        let client = TableSearchClient::with_config(engine.clone(), config);

        let condition = SearchCondition::new(["orders", "archive"])
            .with_field(FieldSpec::new("AA_PK", "BIGINT", Operator::Gt, "3"))
            .with_field(FieldSpec::new("NAME", "VARCHAR", Operator::Neq, "rose"))
            .with_sort(SortField::asc("AA_PK"));

        let result = client
            .advanced_search(&condition, PageWindow::first(10).unwrap())
            .await
            .unwrap();
        assert_eq!(result.total_matched, 1);

        let requests = engine.requests.lock().await;
        let request = &requests[0];
        assert_eq!(request.indexes, vec!["orders".to_string(), "archive".to_string()]);
        assert_eq!(request.scroll.as_deref(), Some("30s"));
        assert_eq!(request.body["query"]["bool"]["must"][0]["range"]["AA_PK"]["gt"], 3);
        assert_eq!(request.body["query"]["bool"]["must_not"][0]["term"]["NAME"], "rose");
        assert_eq!(request.body["sort"][0]["AA_PK"]["order"], "asc");
    }

    #[tokio::test]
    async fn test_advanced_search_parse_error_sends_nothing() {
        let engine = Arc::new(ScriptedEngine::new(vec![]));
        let client = TableSearchClient::new(engine.clone());

        let condition = SearchCondition::new(["orders"]).with_field(FieldSpec::new(
            "CREATED",
            "DATE",
            Operator::Gt,
            "last tuesday",
        ));

        let err = client
            .advanced_search(&condition, PageWindow::first(10).unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::ParseError(_)));
        assert!(engine.calls.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_advanced_search_strict_policy() {
        let engine = Arc::new(ScriptedEngine::new(vec![]));
        let config = SearchClientConfig::default().skip_policy(SkipPolicy::Strict);
        let client = TableSearchClient::with_config(engine.clone(), config);

        let condition = SearchCondition::new(["orders"])
            .with_field(FieldSpec::new("FLAG", "BOOLEAN", Operator::Eq, "true"));

        let err = client
            .advanced_search(&condition, PageWindow::first(10).unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::InvalidQuery(_)));
        assert!(engine.calls.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_advanced_search_requires_index() {
        let client = TableSearchClient::new(Arc::new(ScriptedEngine::new(vec![])));

        let err = client
            .advanced_search(&SearchCondition::default(), PageWindow::first(10).unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn test_health_check() {
        let client = TableSearchClient::new(Arc::new(MockEngine::new()));
        assert!(client.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_get_document() {
        let client = TableSearchClient::new(Arc::new(MockEngine::new()));

        let document = client.get_document("jack_pan_test", "1").await.unwrap().unwrap();
        assert_eq!(document["full_name"], "jackPan");

        assert!(client.get_document("jack_pan_test", "2").await.unwrap().is_none());
        assert!(client.get_document("jack_pan_test", "").await.is_err());
    }
}
