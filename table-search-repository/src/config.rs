//! Configuration types for the TableSearchClient.

use std::time::Duration;

use crate::query::SkipPolicy;

/// Configuration for the TableSearchClient.
#[derive(Debug, Clone)]
pub struct SearchClientConfig {
    /// Maximum number of rows allowed in a single dump.
    /// Set to None to disable the limit (not recommended for production).
    pub max_batch_size: Option<usize>,
    /// Primary shards for newly created indexes.
    pub number_of_shards: u32,
    /// Replicas for newly created indexes.
    pub number_of_replicas: u32,
    /// Timeout applied to every request sent to the engine.
    pub request_timeout: Duration,
    /// How long the engine keeps a scroll cursor alive between continuations,
    /// in the engine's time unit syntax.
    pub scroll_keep_alive: String,
    /// What to do with fields that cannot be translated into a clause.
    pub skip_policy: SkipPolicy,
}

impl Default for SearchClientConfig {
    fn default() -> Self {
        Self {
            max_batch_size: Some(1000),
            number_of_shards: 3,
            number_of_replicas: 2,
            request_timeout: Duration::from_secs(60),
            scroll_keep_alive: "1m".to_string(),
            skip_policy: SkipPolicy::Lenient,
        }
    }
}

impl SearchClientConfig {
    /// Create a config with no batch size limit (use with caution).
    pub fn unlimited() -> Self {
        Self {
            max_batch_size: None,
            ..Self::default()
        }
    }

    /// Create a config with a custom batch size limit.
    pub fn with_max_batch_size(max_batch_size: usize) -> Self {
        Self {
            max_batch_size: Some(max_batch_size),
            ..Self::default()
        }
    }

    /// Set the scroll keep-alive.
    pub fn scroll_keep_alive(mut self, keep_alive: impl Into<String>) -> Self {
        self.scroll_keep_alive = keep_alive.into();
        self
    }

    /// Set the skip policy.
    pub fn skip_policy(mut self, policy: SkipPolicy) -> Self {
        self.skip_policy = policy;
        self
    }

    /// Set the shard and replica counts for created indexes.
    pub fn shards(mut self, number_of_shards: u32, number_of_replicas: u32) -> Self {
        self.number_of_shards = number_of_shards;
        self.number_of_replicas = number_of_replicas;
        self
    }
}
