// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end pipeline tests over the mock chain client and the in-memory
//! store.

mod helpers;

use std::num::{NonZeroU64, NonZeroUsize};
use std::sync::Arc;

use helpers::MockChainClient;
use semioindex::ingest::gaps;
use semioindex::store::MemoryStore;
use semioindex::{
    BlockRange, IndexerConfigBuilder, IngestOptions, Pipeline, SemioindexError,
};

fn workers(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

fn pipeline_with(
    client: MockChainClient,
    store: Arc<MemoryStore>,
    worker_count: usize,
) -> Pipeline {
    let config = IndexerConfigBuilder::new()
        .worker_count(workers(worker_count))
        .chunk_size(NonZeroU64::new(1000).unwrap())
        .build();
    Pipeline::new(Arc::new(client), store, config)
}

#[tokio::test]
async fn test_full_range_ingested_and_gap_free() {
    let client = MockChainClient::new().with_blocks(100..=103, 0);
    let store = Arc::new(MemoryStore::new());
    let pipeline = pipeline_with(client, Arc::clone(&store), 2);

    let range = BlockRange::new(100, 103).unwrap();
    let report = pipeline.run(range, IngestOptions::default()).await.unwrap();

    assert_eq!(report.blocks_written, 4);
    assert_eq!(report.transactions_written, 0);
    assert_eq!(report.blocks_skipped, 0);

    // Every block landed exactly once, whatever the worker interleaving.
    let numbers: Vec<u64> = (100..=103).collect();
    let missing = gaps::missing_blocks(store.as_ref(), &numbers).await.unwrap();
    assert!(missing.is_empty());
}

#[tokio::test]
async fn test_single_block_with_transactions() {
    let client = MockChainClient::new().with_payload(helpers::make_payload(100, 3));
    let store = Arc::new(MemoryStore::new());
    let pipeline = pipeline_with(client, Arc::clone(&store), 2);

    let range = BlockRange::new(100, 100).unwrap();
    let report = pipeline
        .run(
            range,
            IngestOptions {
                fetch_transactions: true,
                skip_existing: false,
            },
        )
        .await
        .unwrap();

    assert_eq!(report.blocks_written, 1);
    assert_eq!(report.transactions_written, 3);

    let transactions = store.transactions(100).unwrap();
    assert_eq!(transactions.len(), 3);
    assert!(transactions.iter().all(|tx| tx.block_number == 100));
}

#[tokio::test]
async fn test_transactions_not_fetched_by_default() {
    let client = MockChainClient::new().with_payload(helpers::make_payload(100, 3));
    let store = Arc::new(MemoryStore::new());
    let pipeline = pipeline_with(client, Arc::clone(&store), 1);

    let range = BlockRange::new(100, 100).unwrap();
    let report = pipeline.run(range, IngestOptions::default()).await.unwrap();

    assert_eq!(report.blocks_written, 1);
    assert_eq!(report.transactions_written, 0);
    assert!(store.transactions(100).unwrap().is_empty());
}

#[tokio::test]
async fn test_worker_stops_at_first_failure() {
    // One worker owns the whole list [100, 101, 102]; 101 fails.
    let client = MockChainClient::new()
        .with_blocks(100..=102, 0)
        .failing_on(101);
    let store = Arc::new(MemoryStore::new());
    let pipeline = pipeline_with(client, Arc::clone(&store), 1);

    let range = BlockRange::new(100, 102).unwrap();
    let error = pipeline
        .run(range, IngestOptions::default())
        .await
        .unwrap_err();

    // Block before the failure stays committed; blocks after are never
    // attempted.
    assert!(store.block(100).is_some());
    assert!(store.block(101).is_none());
    assert!(store.block(102).is_none());

    let SemioindexError::Ingest(aggregate) = error else {
        panic!("expected aggregate ingest error, got: {error}");
    };
    assert_eq!(aggregate.failed_blocks(), vec![101]);
    assert!(aggregate.to_string().contains("block 101"));
}

#[tokio::test]
async fn test_sibling_workers_unaffected_by_failure() {
    // Two workers: worker 0 gets [100, 102], worker 1 gets [101, 103].
    // Worker 0 dies on 100; worker 1 still commits its whole list.
    let client = MockChainClient::new()
        .with_blocks(100..=103, 0)
        .failing_on(100);
    let store = Arc::new(MemoryStore::new());
    let pipeline = pipeline_with(client, Arc::clone(&store), 2);

    let range = BlockRange::new(100, 103).unwrap();
    let error = pipeline
        .run(range, IngestOptions::default())
        .await
        .unwrap_err();

    assert!(store.block(101).is_some());
    assert!(store.block(103).is_some());
    assert!(store.block(100).is_none());
    assert!(store.block(102).is_none());

    let SemioindexError::Ingest(aggregate) = error else {
        panic!("expected aggregate ingest error, got: {error}");
    };
    assert_eq!(aggregate.failed_blocks(), vec![100]);
}

#[tokio::test]
async fn test_check_skips_already_ingested_blocks() {
    let client = MockChainClient::new().with_blocks(100..=103, 0);
    let store = Arc::new(MemoryStore::new());

    // First pass ingests everything.
    let pipeline = pipeline_with(client, Arc::clone(&store), 2);
    let range = BlockRange::new(100, 103).unwrap();
    pipeline.run(range, IngestOptions::default()).await.unwrap();

    // Second pass with --check writes nothing new.
    let report = pipeline
        .run(
            range,
            IngestOptions {
                fetch_transactions: false,
                skip_existing: true,
            },
        )
        .await
        .unwrap();

    assert_eq!(report.blocks_written, 0);
    assert_eq!(report.blocks_skipped, 4);
}

#[tokio::test]
async fn test_rerun_without_check_hits_uniqueness_constraint() {
    let client = MockChainClient::new().with_blocks(100..=100, 0);
    let store = Arc::new(MemoryStore::new());
    let pipeline = pipeline_with(client, Arc::clone(&store), 1);

    let range = BlockRange::new(100, 100).unwrap();
    pipeline.run(range, IngestOptions::default()).await.unwrap();
    let stored = store.block(100).unwrap();

    // Re-running without --check attempts a duplicate insert, which the
    // uniqueness constraint rejects without corrupting the stored row.
    let error = pipeline
        .run(range, IngestOptions::default())
        .await
        .unwrap_err();

    let SemioindexError::Ingest(aggregate) = error else {
        panic!("expected aggregate ingest error, got: {error}");
    };
    assert_eq!(aggregate.failed_blocks(), vec![100]);
    assert_eq!(store.block(100).unwrap(), stored);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_recovery_after_partial_run() {
    let store = Arc::new(MemoryStore::new());
    let range = BlockRange::new(100, 103).unwrap();

    // First run: 102 fails, leaving a hole.
    let broken = MockChainClient::new()
        .with_blocks(100..=103, 0)
        .failing_on(102);
    let pipeline = pipeline_with(broken, Arc::clone(&store), 2);
    pipeline
        .run(range, IngestOptions::default())
        .await
        .unwrap_err();

    let numbers: Vec<u64> = (100..=103).collect();
    let missing = gaps::missing_blocks(store.as_ref(), &numbers).await.unwrap();
    assert_eq!(missing, vec![102]);

    // Retry with --check only touches the hole.
    let healthy = MockChainClient::new().with_blocks(100..=103, 0);
    let pipeline = pipeline_with(healthy, Arc::clone(&store), 2);
    let report = pipeline
        .run(
            range,
            IngestOptions {
                fetch_transactions: false,
                skip_existing: true,
            },
        )
        .await
        .unwrap();

    assert_eq!(report.blocks_written, 1);
    assert_eq!(report.blocks_skipped, 3);
    let missing = gaps::missing_blocks(store.as_ref(), &numbers).await.unwrap();
    assert!(missing.is_empty());
}

#[tokio::test]
async fn test_range_spanning_multiple_chunks() {
    let client = MockChainClient::new().with_blocks(0..=24, 0);
    let store = Arc::new(MemoryStore::new());
    let config = IndexerConfigBuilder::new()
        .worker_count(workers(3))
        .chunk_size(NonZeroU64::new(10).unwrap())
        .build();
    let pipeline = Pipeline::new(
        Arc::new(client),
        Arc::clone(&store) as Arc<dyn semioindex::store::BlockStore>,
        config,
    );

    let range = BlockRange::new(0, 24).unwrap();
    let report = pipeline.run(range, IngestOptions::default()).await.unwrap();

    assert_eq!(report.blocks_written, 25);
    assert_eq!(store.len(), 25);
}

#[tokio::test]
async fn test_block_not_found_is_reported() {
    // The node has no block 101 at all.
    let client = MockChainClient::new()
        .with_blocks(100..=100, 0)
        .with_blocks(102..=102, 0);
    let store = Arc::new(MemoryStore::new());
    let pipeline = pipeline_with(client, Arc::clone(&store), 1);

    let range = BlockRange::new(100, 102).unwrap();
    let error = pipeline
        .run(range, IngestOptions::default())
        .await
        .unwrap_err();

    let SemioindexError::Ingest(aggregate) = error else {
        panic!("expected aggregate ingest error, got: {error}");
    };
    assert_eq!(aggregate.failed_blocks(), vec![101]);
    assert!(aggregate.to_string().contains("Block not found"));
}
