//! Block range and per-block transaction batch types.

use super::RawTransaction;

/// Inclusive interval of block numbers scheduled as one unit of work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
	pub from: u64,
	pub to: u64,
}

impl BlockRange {
	/// Creates a range, returning `None` when `from > to`
	pub fn new(from: u64, to: u64) -> Option<Self> {
		(from <= to).then_some(Self { from, to })
	}

	/// Number of blocks covered by the range
	pub fn len(&self) -> u64 {
		self.to - self.from + 1
	}

	/// A valid range always covers at least one block
	pub fn is_empty(&self) -> bool {
		false
	}

	/// Iterates block numbers in ascending order
	pub fn blocks(&self) -> std::ops::RangeInclusive<u64> {
		self.from..=self.to
	}
}

/// Non-empty transaction list fetched for a single block
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBatch {
	pub block_number: u64,
	pub transactions: Vec<RawTransaction>,
}
