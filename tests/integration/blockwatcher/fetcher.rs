use std::{sync::Arc, time::Duration};

use crate::integration::mocks::MockBlockChainClient;
use address_watch::{
	models::{BlockRange, ChainType, TransactionBatch},
	services::{blockchain::FetchError, blockwatcher::FetchPool},
	utils::tests::TransactionBuilder,
};
use mockall::predicate;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

async fn drain(mut rx: mpsc::Receiver<TransactionBatch>) -> Vec<TransactionBatch> {
	let mut batches = Vec::new();
	while let Some(batch) = rx.recv().await {
		batches.push(batch);
	}
	batches.sort_by_key(|batch| batch.block_number);
	batches
}

#[tokio::test]
async fn test_failed_block_does_not_abort_range() {
	let mut client = MockBlockChainClient::new();
	client
		.expect_get_block_transactions()
		.with(predicate::eq(100))
		.times(1)
		.returning(|_| Ok(vec![TransactionBuilder::new().id("a").output("x", 1.0).build()]));
	client
		.expect_get_block_transactions()
		.with(predicate::eq(101))
		.times(1)
		.returning(|n| Err(FetchError::block_not_found(n)));
	client
		.expect_get_block_transactions()
		.with(predicate::eq(102))
		.times(1)
		.returning(|_| Ok(vec![TransactionBuilder::new().id("c").output("y", 1.0).build()]));

	let (range_tx, range_rx) = mpsc::channel(1);
	let (batch_tx, batch_rx) = mpsc::channel(8);
	let handles = FetchPool::new(ChainType::Bitcoin, Arc::new(client), 1).spawn(
		range_rx,
		batch_tx,
		CancellationToken::new(),
	);

	range_tx.send(BlockRange { from: 100, to: 102 }).await.unwrap();
	drop(range_tx);

	let batches = tokio::time::timeout(Duration::from_secs(1), drain(batch_rx))
		.await
		.unwrap();
	let blocks: Vec<_> = batches.iter().map(|b| b.block_number).collect();
	assert_eq!(blocks, vec![100, 102]);
	assert_eq!(batches[0].transactions[0].id, "a");

	for handle in handles {
		handle.await.unwrap();
	}
}

#[tokio::test]
async fn test_every_block_fetched_once_across_workers() {
	let mut client = MockBlockChainClient::new();
	client
		.expect_get_block_transactions()
		.times(20)
		.returning(|n| {
			Ok(vec![TransactionBuilder::new()
				.id(&format!("tx-{}", n))
				.build()])
		});

	let (range_tx, range_rx) = mpsc::channel(2);
	let (batch_tx, batch_rx) = mpsc::channel(2);
	let handles = FetchPool::new(ChainType::Ethereum, Arc::new(client), 4).spawn(
		range_rx,
		batch_tx,
		CancellationToken::new(),
	);

	let producer = tokio::spawn(async move {
		for from in (0..20).step_by(5) {
			range_tx
				.send(BlockRange { from, to: from + 4 })
				.await
				.unwrap();
		}
	});

	let batches = tokio::time::timeout(Duration::from_secs(2), drain(batch_rx))
		.await
		.unwrap();
	producer.await.unwrap();

	let blocks: Vec<_> = batches.iter().map(|b| b.block_number).collect();
	assert_eq!(blocks, (0..20).collect::<Vec<u64>>());

	for handle in handles {
		handle.await.unwrap();
	}
}

#[tokio::test]
async fn test_cancel_unblocks_worker_waiting_on_full_queue() {
	let mut client = MockBlockChainClient::new();
	client
		.expect_get_block_transactions()
		.returning(|n| Ok(vec![TransactionBuilder::new().id(&n.to_string()).build()]));

	let (range_tx, range_rx) = mpsc::channel(1);
	// Nobody reads the batch queue, so the second send blocks
	let (batch_tx, _batch_rx) = mpsc::channel(1);
	let shutdown = CancellationToken::new();
	let handles = FetchPool::new(ChainType::Bitcoin, Arc::new(client), 1).spawn(
		range_rx,
		batch_tx,
		shutdown.clone(),
	);

	range_tx.send(BlockRange { from: 0, to: 50 }).await.unwrap();
	tokio::time::sleep(Duration::from_millis(50)).await;
	shutdown.cancel();

	for handle in handles {
		tokio::time::timeout(Duration::from_secs(1), handle)
			.await
			.expect("worker should observe cancellation")
			.unwrap();
	}
}
