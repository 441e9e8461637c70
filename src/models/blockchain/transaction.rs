//! Normalized transaction data structures.

use serde::{Deserialize, Serialize};

/// Transaction input, pointing at the output of an earlier transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TxInput {
	/// Id of the transaction whose output is spent; empty for coinbase and
	/// account-model inputs
	pub referenced_tx_id: String,
	/// Index of the spent output within the referenced transaction
	pub referenced_output_index: u32,
	/// Spending address, when the chain exposes it without a lookup
	pub address: Option<String>,
}

/// Transaction output credited to an address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TxOutput {
	/// Amount in whole native units
	pub value: f64,
	pub index: u32,
	/// Receiving address; empty when the chain reports none
	pub address: String,
}

/// Chain-agnostic view of a transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
	pub id: String,
	pub inputs: Vec<TxInput>,
	pub outputs: Vec<TxOutput>,
}

impl RawTransaction {
	/// Sum of all output values
	pub fn output_total(&self) -> f64 {
		self.outputs.iter().map(|output| output.value).sum()
	}

	/// Finds the output with the given index
	pub fn output(&self, index: u32) -> Option<&TxOutput> {
		self.outputs.iter().find(|output| output.index == index)
	}
}
