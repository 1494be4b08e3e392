//! # Table Search
//!
//! Main library for the table search command line tool.
//!
//! This crate provides the configuration, dependency wiring and input
//! readers used by the `table-search` binary.

pub mod config;
pub mod input;

pub use config::{AppConfig, Dependencies};

use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid command line input.
    #[error("Invalid input: {0}")]
    InputError(String),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] table_search_repository::SearchError),

    /// CSV error.
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create an input error.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::InputError(msg.into())
    }
}
