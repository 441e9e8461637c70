//! Metrics module for the application.
//!
//! - This module contains the global Prometheus registry.
//! - Defines pipeline metrics labelled by chain, plus host gauges.

pub mod server;
use lazy_static::lazy_static;
use prometheus::{Encoder, Gauge, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder};
use sysinfo::System;

lazy_static! {
	// Global Prometheus registry.
	pub static ref REGISTRY: Registry = Registry::new();

	// Gauge for CPU usage percentage.
	pub static ref CPU_USAGE: Gauge = {
		let gauge = Gauge::new("cpu_usage_percentage", "Current CPU usage percentage").unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};

	// Gauge for memory usage percentage.
	pub static ref MEMORY_USAGE_PERCENT: Gauge = {
		let gauge = Gauge::new("memory_usage_percentage", "Memory usage percentage").unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};

	// Gauge for memory usage in bytes.
	pub static ref MEMORY_USAGE: Gauge = {
		let gauge = Gauge::new("memory_usage_bytes", "Memory usage in bytes").unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};

	// Gauge for total memory in bytes.
	pub static ref TOTAL_MEMORY: Gauge = {
		let gauge = Gauge::new("total_memory_bytes", "Total memory in bytes").unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};

	// Number of chains with a running pipeline
	pub static ref CHAINS_MONITORED: Gauge = {
		let gauge = Gauge::new("chains_monitored", "Number of chains being monitored").unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};

	// Next block each coordinator will schedule
	pub static ref CHAIN_CURSOR: IntGaugeVec = {
		let gauge = IntGaugeVec::new(
			Opts::new("chain_cursor", "Next block number scheduled per chain"),
			&["chain"]
		).unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};

	pub static ref RANGES_DISPATCHED: IntCounterVec = {
		let counter = IntCounterVec::new(
			Opts::new("ranges_dispatched_total", "Block ranges handed to the fetch pool"),
			&["chain"]
		).unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	pub static ref BLOCKS_FETCHED: IntCounterVec = {
		let counter = IntCounterVec::new(
			Opts::new("blocks_fetched_total", "Blocks fetched successfully"),
			&["chain"]
		).unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	// Blocks dropped after a failed fetch; they are never retried
	pub static ref BLOCKS_SKIPPED: IntCounterVec = {
		let counter = IntCounterVec::new(
			Opts::new("blocks_skipped_total", "Blocks skipped after a failed fetch"),
			&["chain"]
		).unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	pub static ref EVENTS_EMITTED: IntCounterVec = {
		let counter = IntCounterVec::new(
			Opts::new("events_emitted_total", "Filtered events produced for watched addresses"),
			&["chain"]
		).unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	pub static ref FEE_RESOLUTION_FAILURES: IntCounterVec = {
		let counter = IntCounterVec::new(
			Opts::new("fee_resolution_failures_total", "Transactions whose fee fell back to zero"),
			&["chain"]
		).unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	pub static ref SINK_FAILURES: IntCounterVec = {
		let counter = IntCounterVec::new(
			Opts::new("sink_failures_total", "Events the sink failed to publish"),
			&["chain"]
		).unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};
}

/// Gather all metrics and encode into the provided format.
pub fn gather_metrics() -> Result<Vec<u8>, Box<dyn std::error::Error>> {
	let encoder = TextEncoder::new();
	let metric_families = REGISTRY.gather();
	let mut buffer = Vec::new();
	encoder.encode(&metric_families, &mut buffer)?;
	Ok(buffer)
}

/// Updates the system metrics for CPU and memory usage.
pub fn update_system_metrics() {
	let mut sys = System::new_all();
	sys.refresh_all();

	CPU_USAGE.set(sys.global_cpu_usage() as f64);

	let total_memory = sys.total_memory();
	let memory_usage = sys.used_memory();
	TOTAL_MEMORY.set(total_memory as f64);
	MEMORY_USAGE.set(memory_usage as f64);

	let memory_percentage = if total_memory > 0 {
		(memory_usage as f64 / total_memory as f64) * 100.0
	} else {
		0.0
	};
	MEMORY_USAGE_PERCENT.set(memory_percentage);
}
