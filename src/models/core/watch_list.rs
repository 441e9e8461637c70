use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Read-only mapping from watched address to owner identifier
///
/// Built once at startup and shared by reference across every chain pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WatchList {
	addresses: HashMap<String, String>,
}

impl WatchList {
	pub fn new(addresses: HashMap<String, String>) -> Self {
		Self { addresses }
	}

	/// Returns the owner of `address`; empty addresses never match
	pub fn owner_of(&self, address: &str) -> Option<&str> {
		if address.is_empty() {
			return None;
		}
		self.addresses.get(address).map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.addresses.len()
	}

	pub fn is_empty(&self) -> bool {
		self.addresses.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.addresses
			.iter()
			.map(|(address, owner)| (address.as_str(), owner.as_str()))
	}
}

impl<A: Into<String>, O: Into<String>> FromIterator<(A, O)> for WatchList {
	fn from_iter<I: IntoIterator<Item = (A, O)>>(iter: I) -> Self {
		Self {
			addresses: iter
				.into_iter()
				.map(|(address, owner)| (address.into(), owner.into()))
				.collect(),
		}
	}
}
