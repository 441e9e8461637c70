//! Event emitted for every watched output.

use serde::{Deserialize, Serialize};

use super::ChainType;

/// Normalized event handed to the event sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredEvent {
	pub chain: ChainType,
	pub tx_id: String,
	/// Provenance of the funds: the first input's referenced transaction id,
	/// or its address on account-model chains
	pub from_address: String,
	pub to_address: String,
	pub amount: f64,
	/// Estimated network fee, never negative
	pub fee: f64,
	pub owner_id: String,
}
