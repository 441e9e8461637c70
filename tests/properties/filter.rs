use std::sync::Arc;

use crate::properties::strategies::{
	transaction_strategy, watch_list_strategy, UniformFunding,
};
use address_watch::{
	models::ChainType,
	services::filter::{calculate_fee, FilterService},
};
use proptest::{prelude::*, test_runner::Config};

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_events_only_for_watched_outputs(
		transaction in transaction_strategy(),
		watch_list in watch_list_strategy(),
		funding in prop::collection::vec(0.0f64..100.0, 4),
	) {
		let runtime = tokio::runtime::Runtime::new().unwrap();
		let watch_list = Arc::new(watch_list);
		let filter = FilterService::new(
			ChainType::Bitcoin,
			Arc::new(UniformFunding { outputs: funding }),
			watch_list.clone(),
		);

		let events = runtime.block_on(filter.filter_transaction(&transaction));

		let watched: Vec<_> = transaction
			.outputs
			.iter()
			.filter(|output| watch_list.owner_of(&output.address).is_some())
			.collect();
		prop_assert_eq!(events.len(), watched.len());

		for (event, output) in events.iter().zip(watched) {
			prop_assert_eq!(&event.to_address, &output.address);
			prop_assert_eq!(event.amount, output.value);
			prop_assert_eq!(Some(event.owner_id.as_str()), watch_list.owner_of(&output.address));
			prop_assert_eq!(&event.tx_id, &transaction.id);
			prop_assert!(event.fee >= 0.0);
		}

		if let Some(first) = events.first() {
			prop_assert!(events.iter().all(|event| event.fee == first.fee));
		}
	}

	#[test]
	fn test_fee_is_never_negative(
		transaction in transaction_strategy(),
		funding in prop::collection::vec(0.0f64..100.0, 4),
	) {
		let runtime = tokio::runtime::Runtime::new().unwrap();
		let client = UniformFunding { outputs: funding };

		let fee = runtime.block_on(calculate_fee(&client, &transaction)).unwrap();
		prop_assert!(fee >= 0.0);
	}
}
