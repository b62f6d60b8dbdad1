//! Error types for the ingestion pipeline.
//!
//! Per-block failures are wrapped in [`IngestError`] carrying the block
//! number; the pipeline collects them across all workers and raises a single
//! [`AggregateIngestError`] after every worker has finished.

use std::error::Error as _;

use super::{RpcError, StoreError};

/// A block-scoped ingestion failure.
///
/// Each variant names the block the worker was processing when it failed.
/// A worker stops at its first failure: blocks earlier in its assigned list
/// stay committed, blocks after it are never attempted.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The RPC fetch failed or the node returned malformed data.
    #[error("failed to fetch block {block_number}")]
    Fetch {
        /// The block number being fetched
        block_number: u64,
        /// The underlying RPC error
        #[source]
        source: RpcError,
    },

    /// The insert or commit failed; the block's local transaction was
    /// rolled back.
    #[error("failed to persist block {block_number}")]
    Store {
        /// The block number being written
        block_number: u64,
        /// The underlying store error
        #[source]
        source: StoreError,
    },

    /// A worker task died without returning a result.
    #[error("worker {worker} panicked: {reason}")]
    WorkerPanicked {
        /// Index of the worker in the partition
        worker: usize,
        /// Panic payload or join error text
        reason: String,
    },
}

impl IngestError {
    /// Wrap an RPC failure for a specific block.
    pub fn fetch(block_number: u64, source: RpcError) -> Self {
        IngestError::Fetch {
            block_number,
            source,
        }
    }

    /// Wrap a persistence failure for a specific block.
    pub fn store(block_number: u64, source: StoreError) -> Self {
        IngestError::Store {
            block_number,
            source,
        }
    }

    /// Record a worker task that panicked instead of returning.
    pub fn worker_panicked(worker: usize, reason: impl Into<String>) -> Self {
        IngestError::WorkerPanicked {
            worker,
            reason: reason.into(),
        }
    }

    /// The block number this failure is scoped to, if any.
    #[must_use]
    pub fn block_number(&self) -> Option<u64> {
        match self {
            IngestError::Fetch { block_number, .. } | IngestError::Store { block_number, .. } => {
                Some(*block_number)
            }
            IngestError::WorkerPanicked { .. } => None,
        }
    }
}

/// The single error surfaced to the top-level caller after a failed run.
///
/// Workers never abort their siblings: every per-block failure is recorded
/// and the pipeline raises this aggregate once all workers have joined.
/// Blocks ingested by other workers remain committed; callers are expected
/// to re-run the gap checker and retry the reported blocks.
#[derive(Debug, thiserror::Error)]
#[error("ingestion completed with {} failure(s): {}", .failures.len(), render_failures(.failures))]
pub struct AggregateIngestError {
    failures: Vec<IngestError>,
}

impl AggregateIngestError {
    /// Build an aggregate from the failures recorded during a run.
    ///
    /// Callers should only construct this when `failures` is non-empty; an
    /// empty aggregate renders as zero failures but is never raised by the
    /// pipeline.
    #[must_use]
    pub fn new(failures: Vec<IngestError>) -> Self {
        Self { failures }
    }

    /// The recorded per-block failures, in worker completion order.
    #[must_use]
    pub fn failures(&self) -> &[IngestError] {
        &self.failures
    }

    /// Block numbers named by the recorded failures.
    #[must_use]
    pub fn failed_blocks(&self) -> Vec<u64> {
        self.failures
            .iter()
            .filter_map(IngestError::block_number)
            .collect()
    }
}

fn render_failures(failures: &[IngestError]) -> String {
    failures
        .iter()
        .map(|e| match e.source() {
            Some(cause) => format!("{e}: {cause}"),
            None => e.to_string(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}
