use std::{
	sync::{
		atomic::{AtomicUsize, Ordering},
		Arc,
	},
	time::Duration,
};

use crate::integration::mocks::MockBlockChainClient;
use address_watch::{
	models::{BlockRange, ChainType},
	services::{
		blockchain::FetchError,
		blockwatcher::{RangeCoordinator, TickOutcome},
	},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_first_tick_of_example_scenario() {
	let mut client = MockBlockChainClient::new();
	client
		.expect_get_latest_block_number()
		.times(1)
		.returning(|| Ok(105));

	let mut coordinator = RangeCoordinator::new(
		ChainType::Bitcoin,
		Arc::new(client),
		100,
		3,
		Duration::from_secs(10),
	);
	let (tx, mut rx) = mpsc::channel(1);

	let outcome = coordinator.tick(&tx, &CancellationToken::new()).await;

	assert_eq!(outcome, TickOutcome::Dispatched(BlockRange { from: 100, to: 102 }));
	assert_eq!(coordinator.cursor(), 103);
	assert_eq!(rx.try_recv().unwrap(), BlockRange { from: 100, to: 102 });
}

#[tokio::test]
async fn test_run_recovers_from_height_failures() {
	let mut client = MockBlockChainClient::new();
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = calls.clone();
	// The first two height queries fail, every later one reports 4
	client.expect_get_latest_block_number().returning(move || {
		match counter.fetch_add(1, Ordering::SeqCst) {
			0 | 1 => Err(FetchError::connection_error("node down")),
			_ => Ok(4),
		}
	});

	let coordinator = RangeCoordinator::new(
		ChainType::Ethereum,
		Arc::new(client),
		0,
		2,
		Duration::from_millis(10),
	);
	let (tx, mut rx) = mpsc::channel(8);
	let shutdown = CancellationToken::new();
	let handle = tokio::spawn(coordinator.run(tx, shutdown.clone()));

	let mut ranges = Vec::new();
	for _ in 0..3 {
		let range = tokio::time::timeout(Duration::from_secs(1), rx.recv())
			.await
			.unwrap()
			.unwrap();
		ranges.push(range);
	}

	assert_eq!(
		ranges,
		vec![
			BlockRange { from: 0, to: 1 },
			BlockRange { from: 2, to: 3 },
			BlockRange { from: 4, to: 4 },
		]
	);

	// Two skipped ticks, then one tick per range
	assert!(calls.load(Ordering::SeqCst) >= 5);

	shutdown.cancel();
	tokio::time::timeout(Duration::from_secs(1), handle)
		.await
		.expect("coordinator should stop on cancellation")
		.unwrap();
}

#[tokio::test]
async fn test_run_stops_promptly_when_cancelled_during_wait() {
	let mut client = MockBlockChainClient::new();
	client
		.expect_get_latest_block_number()
		.returning(|| Ok(0));

	// Long interval: after the first tick the coordinator waits on the timer
	let coordinator = RangeCoordinator::new(
		ChainType::Solana,
		Arc::new(client),
		10,
		5,
		Duration::from_secs(3600),
	);
	let (tx, _rx) = mpsc::channel(1);
	let shutdown = CancellationToken::new();
	let handle = tokio::spawn(coordinator.run(tx, shutdown.clone()));

	tokio::time::sleep(Duration::from_millis(50)).await;
	shutdown.cancel();

	tokio::time::timeout(Duration::from_secs(1), handle)
		.await
		.expect("coordinator should observe cancellation")
		.unwrap();
}
