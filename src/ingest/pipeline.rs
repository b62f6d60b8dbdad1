// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Worker-pool orchestration and collect-then-raise error aggregation.
//!
//! The pipeline walks the requested range one super-chunk at a time,
//! optionally gap-checks the chunk, deals the surviving block numbers
//! round-robin across the configured worker count, and joins all workers
//! before moving on. Per-block failures are recorded, never re-raised
//! mid-run, so one worker's failure cannot cancel its siblings' progress.
//! After the final chunk the recorded failures - if any - surface as a
//! single [`AggregateIngestError`].

use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn, Instrument};

use crate::client::ChainClient;
use crate::config::{IndexerConfig, IngestOptions};
use crate::errors::{AggregateIngestError, IngestError, SemioindexError};
use crate::ingest::gaps;
use crate::ingest::worker::{Worker, WorkerReport};
use crate::range::{partition_round_robin, BlockRange};
use crate::spans;
use crate::store::BlockStore;

/// Counters for a completed ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Blocks committed across all workers.
    pub blocks_written: u64,
    /// Transactions committed across all workers.
    pub transactions_written: u64,
    /// Blocks skipped because the gap checker found them already stored.
    pub blocks_skipped: u64,
}

impl IngestReport {
    fn absorb(&mut self, worker: WorkerReport) {
        self.blocks_written += worker.blocks_written;
        self.transactions_written += worker.transactions_written;
    }
}

/// The block-range ingestion pipeline.
///
/// # Examples
///
/// ```rust,ignore
/// use semioindex::{BlockRange, IndexerConfig, IngestOptions, Pipeline};
///
/// let pipeline = Pipeline::new(client, store, IndexerConfig::default());
/// let range: BlockRange = "18000000-18009999".parse()?;
///
/// let report = pipeline
///     .run(range, IngestOptions { fetch_transactions: true, skip_existing: true })
///     .await?;
/// println!("wrote {} blocks", report.blocks_written);
/// ```
pub struct Pipeline {
    client: Arc<dyn ChainClient>,
    store: Arc<dyn BlockStore>,
    config: IndexerConfig,
}

impl Pipeline {
    /// Assemble a pipeline from its collaborators.
    pub fn new(
        client: Arc<dyn ChainClient>,
        store: Arc<dyn BlockStore>,
        config: IndexerConfig,
    ) -> Self {
        Self {
            client,
            store,
            config,
        }
    }

    /// Ingest every block in `range`.
    ///
    /// Super-chunks are processed sequentially; within a chunk, workers run
    /// concurrently on disjoint round-robin partitions. A worker stops at
    /// its first failure; its siblings and subsequent chunks continue.
    ///
    /// Blocks committed before a failure stay committed. On any recorded
    /// failure the run returns an [`AggregateIngestError`] naming every
    /// failed block; callers re-run with `skip_existing` to retry just the
    /// holes.
    ///
    /// # Errors
    ///
    /// - [`SemioindexError::Store`] if a gap-check query fails
    /// - [`SemioindexError::Ingest`] with the aggregated per-block failures
    pub async fn run(
        &self,
        range: BlockRange,
        options: IngestOptions,
    ) -> Result<IngestReport, SemioindexError> {
        let span = spans::ingest_range(range.bottom(), range.top(), self.config.worker_count.get());
        self.run_range(range, options).instrument(span).await
    }

    async fn run_range(
        &self,
        range: BlockRange,
        options: IngestOptions,
    ) -> Result<IngestReport, SemioindexError> {
        info!(
            range = %range,
            workers = self.config.worker_count.get(),
            chunk_size = self.config.chunk_size.get(),
            transactions = options.fetch_transactions,
            check = options.skip_existing,
            "Starting ingestion"
        );

        let mut report = IngestReport::default();
        let mut failures: Vec<IngestError> = Vec::new();

        for chunk in range.super_chunks(self.config.chunk_size) {
            let span = spans::ingest_chunk(chunk.bottom(), chunk.top());
            self.run_chunk(chunk, options, &mut report, &mut failures)
                .instrument(span)
                .await?;
        }

        if failures.is_empty() {
            info!(
                blocks_written = report.blocks_written,
                transactions_written = report.transactions_written,
                blocks_skipped = report.blocks_skipped,
                "Ingestion complete"
            );
            Ok(report)
        } else {
            warn!(
                failures = failures.len(),
                blocks_written = report.blocks_written,
                "Ingestion finished with failures; committed blocks remain persisted"
            );
            Err(AggregateIngestError::new(failures).into())
        }
    }

    async fn run_chunk(
        &self,
        chunk: BlockRange,
        options: IngestOptions,
        report: &mut IngestReport,
        failures: &mut Vec<IngestError>,
    ) -> Result<(), SemioindexError> {
        let mut numbers: Vec<u64> = chunk.numbers().collect();
        if options.skip_existing {
            let before = numbers.len();
            numbers = gaps::missing_blocks(self.store.as_ref(), &numbers).await?;
            report.blocks_skipped += (before - numbers.len()) as u64;
        }
        if numbers.is_empty() {
            return Ok(());
        }

        let partitions = partition_round_robin(&numbers, self.config.worker_count);

        let handles: Vec<_> = partitions
            .into_iter()
            .enumerate()
            .filter(|(_, list)| !list.is_empty())
            .map(|(id, list)| {
                let worker = Worker::new(
                    id,
                    Arc::clone(&self.client),
                    Arc::clone(&self.store),
                    options.fetch_transactions,
                );
                (id, tokio::spawn(worker.run(list)))
            })
            .collect();

        let (ids, joins): (Vec<_>, Vec<_>) = handles.into_iter().unzip();
        for (id, joined) in ids.into_iter().zip(join_all(joins).await) {
            match joined {
                Ok(Ok(worker_report)) => report.absorb(worker_report),
                Ok(Err(error)) => failures.push(error),
                Err(join_error) => {
                    failures.push(IngestError::worker_panicked(id, join_error.to_string()));
                }
            }
        }

        Ok(())
    }
}
