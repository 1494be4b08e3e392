//! Configuration and dependency wiring for the table search binary.

mod dependencies;

pub use dependencies::{AppConfig, Dependencies};
