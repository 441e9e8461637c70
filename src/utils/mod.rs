//! Utility modules for common functionality.
//!
//! - logging: Logging setup
//! - metrics: Prometheus metrics and the metrics server
//! - tests: Builders for test fixtures

pub mod logging;
pub mod metrics;
