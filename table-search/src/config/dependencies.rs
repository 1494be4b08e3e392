//! Dependency initialization and wiring for the table search binary.

use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::AppError;
use table_search_repository::{OpenSearchClient, SearchClientConfig, SkipPolicy, TableSearchClient};

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Settings read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OpenSearch server URL.
    pub opensearch_url: String,
    /// Client settings passed to the `TableSearchClient`.
    pub search: SearchClientConfig,
}

impl AppConfig {
    /// Load settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `SEARCH_MAX_BATCH_SIZE`: rows allowed per dump, or `unlimited` (default: 1000)
    /// - `SEARCH_SCROLL_KEEP_ALIVE`: scroll cursor keep-alive (default: 1m)
    /// - `SEARCH_REQUEST_TIMEOUT_SECS`: request timeout in seconds (default: 60)
    /// - `SEARCH_STRICT_FIELDS`: fail advanced searches on untranslatable fields (default: false)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through `lookup`, which returns the value of a variable if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let opensearch_url =
            lookup("OPENSEARCH_URL").unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string());

        let mut search = SearchClientConfig::default();

        if let Some(value) = lookup("SEARCH_MAX_BATCH_SIZE") {
            search.max_batch_size = parse_batch_size(&value)?;
        }

        if let Some(value) = lookup("SEARCH_SCROLL_KEEP_ALIVE") {
            if value.trim().is_empty() {
                return Err(AppError::config("SEARCH_SCROLL_KEEP_ALIVE must not be empty"));
            }
            search = search.scroll_keep_alive(value.trim());
        }

        if let Some(value) = lookup("SEARCH_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = value.trim().parse().map_err(|_| {
                AppError::config(format!("SEARCH_REQUEST_TIMEOUT_SECS is not a number: {}", value))
            })?;
            search.request_timeout = Duration::from_secs(secs);
        }

        if let Some(value) = lookup("SEARCH_STRICT_FIELDS") {
            if parse_flag(&value)? {
                search = search.skip_policy(SkipPolicy::Strict);
            }
        }

        Ok(Self {
            opensearch_url,
            search,
        })
    }

    /// Replace the OpenSearch URL, e.g. from a command line flag.
    pub fn with_opensearch_url(mut self, url: impl Into<String>) -> Self {
        self.opensearch_url = url.into();
        self
    }
}

fn parse_batch_size(value: &str) -> Result<Option<usize>, AppError> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("unlimited") {
        return Ok(None);
    }
    match value.parse::<usize>() {
        Ok(0) | Err(_) => Err(AppError::config(format!(
            "SEARCH_MAX_BATCH_SIZE must be a positive number or 'unlimited': {}",
            value
        ))),
        Ok(max) => Ok(Some(max)),
    }
}

fn parse_flag(value: &str) -> Result<bool, AppError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => Err(AppError::config(format!("Invalid boolean flag: {}", other))),
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured client ready to use.
    pub client: TableSearchClient,
}

impl Dependencies {
    /// Initialize all dependencies from `config`.
    ///
    /// No request is sent here; reachability is checked by the `health` command.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AppError)` - If the OpenSearch client cannot be built
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        info!(
            opensearch_url = %config.opensearch_url,
            max_batch_size = ?config.search.max_batch_size,
            scroll_keep_alive = %config.search.scroll_keep_alive,
            skip_policy = ?config.search.skip_policy,
            "Initializing dependencies"
        );

        let engine = OpenSearchClient::new(&config.opensearch_url, config.search.request_timeout)
            .map_err(|e| AppError::config(format!("Failed to create OpenSearch client: {}", e)))?;

        let client = TableSearchClient::with_config(Arc::new(engine), config.search);

        Ok(Self { client })
    }
}
