//! Watch-list filtering.
//!
//! - `service`: the per-chain filter stage
//! - `fee`: fee estimation from referenced prior outputs

mod fee;
mod service;

pub use fee::calculate_fee;
pub use service::FilterService;
