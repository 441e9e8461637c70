//! Multi-chain watched-address monitoring.
//!
//! Every configured chain runs an isolated pipeline:
//!
//! ```text
//! RangeCoordinator -> FetchPool -> FilterService -> EventSink
//! ```
//!
//! connected by bounded queues and stopped through one shared cancellation
//! token. Matches against the watch-list become [`models::FilteredEvent`]s
//! carrying an estimated network fee.

pub mod bootstrap;
pub mod models;
pub mod services;
pub mod utils;
