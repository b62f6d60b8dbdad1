// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-worker fetch-and-write loop.

use std::sync::Arc;

use tracing::{debug, warn, Instrument};

use crate::client::ChainClient;
use crate::errors::IngestError;
use crate::spans;
use crate::store::BlockStore;

/// Counters accumulated by a worker over its assigned list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerReport {
    /// Blocks committed by this worker.
    pub blocks_written: u64,
    /// Transactions committed by this worker.
    pub transactions_written: u64,
}

/// One ingestion worker.
///
/// Owns shared handles to the chain client and the store; the underlying
/// transport and pool hand each in-flight call its own connection, so
/// workers never share a session at runtime.
pub(crate) struct Worker {
    id: usize,
    client: Arc<dyn ChainClient>,
    store: Arc<dyn BlockStore>,
    fetch_transactions: bool,
}

impl Worker {
    pub(crate) fn new(
        id: usize,
        client: Arc<dyn ChainClient>,
        store: Arc<dyn BlockStore>,
        fetch_transactions: bool,
    ) -> Self {
        Self {
            id,
            client,
            store,
            fetch_transactions,
        }
    }

    /// Process the assigned block numbers in order.
    ///
    /// Fetches, maps, and commits one block per iteration. The first
    /// failure wraps the cause in a block-scoped [`IngestError`] and stops
    /// this worker: blocks already committed stay committed, blocks later
    /// in the list are never attempted. There is no retry.
    pub(crate) async fn run(self, numbers: Vec<u64>) -> Result<WorkerReport, IngestError> {
        let span = spans::ingest_worker(self.id, numbers.len());
        self.process(numbers).instrument(span).await
    }

    async fn process(self, numbers: Vec<u64>) -> Result<WorkerReport, IngestError> {
        let mut report = WorkerReport::default();

        for number in numbers {
            let payload = self
                .client
                .block_by_number(number, self.fetch_transactions)
                .await
                .map_err(|source| {
                    warn!(worker = self.id, block_number = number, "Fetch failed");
                    IngestError::fetch(number, source)
                })?;

            self.store
                .insert_block(&payload.block, &payload.transactions)
                .await
                .map_err(|source| {
                    warn!(worker = self.id, block_number = number, "Persist failed");
                    IngestError::store(number, source)
                })?;

            report.blocks_written += 1;
            report.transactions_written += payload.transactions.len() as u64;
            debug!(
                worker = self.id,
                block_number = number,
                transactions = payload.transactions.len(),
                "Ingested block"
            );
        }

        Ok(report)
    }
}
