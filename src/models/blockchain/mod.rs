//! Chain-agnostic blockchain model types.
//!
//! Every chain adapter converts its native wire format into these types so the
//! ingestion pipeline never needs to know which chain it is processing.

use serde::{Deserialize, Serialize};
use std::fmt;

mod block;
mod event;
mod transaction;

pub use block::{BlockRange, TransactionBatch};
pub use event::FilteredEvent;
pub use transaction::{RawTransaction, TxInput, TxOutput};

/// Supported blockchain types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChainType {
	/// UTXO-model chain with input provenance
	Bitcoin,
	/// Account-model EVM chain
	Ethereum,
	/// Balance-delta chain
	Solana,
}

impl ChainType {
	/// Lowercase identifier used in configuration, logs and metric labels
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Bitcoin => "bitcoin",
			Self::Ethereum => "ethereum",
			Self::Solana => "solana",
		}
	}
}

impl fmt::Display for ChainType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
