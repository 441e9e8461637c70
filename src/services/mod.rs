//! Core services implementing the ingestion pipeline.
//!
//! - `blockchain`: chain adapters and their transport
//! - `blockwatcher`: range coordination, block fetching and pipeline assembly
//! - `filter`: watch-list matching and fee resolution
//! - `sink`: event delivery

pub mod blockchain;
pub mod blockwatcher;
pub mod filter;
pub mod sink;
