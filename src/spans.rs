//! Span creation helpers for ingestion operations.
//!
//! This module provides span creation functions following an orthogonal
//! design pattern where telemetry concerns are separated from business
//! logic. Instead of using `#[instrument]` attributes directly on
//! functions, each instrumented operation has a corresponding span helper
//! function in this module.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     let span = spans::my_operation(param_value);
//!     self.my_operation_inner(param).instrument(span).await
//! }
//! ```

use tracing::Span;

/// Create span for a full ingestion run over a block range.
///
/// Parent: None (root span for this operation)
/// Children: ingest_chunk spans (one per super-chunk)
#[inline]
pub(crate) fn ingest_range(bottom: u64, top: u64, workers: usize) -> Span {
    tracing::info_span!(
        "semioindex.ingest_range",
        bottom = bottom,
        top = top,
        workers = workers,
        block_count = top.saturating_sub(bottom) + 1,
    )
}

/// Create span for one super-chunk of an ingestion run.
///
/// Parent: ingest_range span
/// Children: worker spans (one per partition)
#[inline]
pub(crate) fn ingest_chunk(bottom: u64, top: u64) -> Span {
    tracing::debug_span!("semioindex.ingest_chunk", bottom = bottom, top = top,)
}

/// Create span for one worker's pass over its assigned block list.
///
/// Parent: ingest_chunk span
/// Children: RPC fetches and store commits, one pair per block
#[inline]
pub(crate) fn ingest_worker(worker: usize, assigned: usize) -> Span {
    tracing::debug_span!(
        "semioindex.ingest_worker",
        worker = worker,
        assigned = assigned,
    )
}

/// Create span for a gap check against the persisted block set.
///
/// Parent: ingest_chunk span when run by the pipeline, root for the
/// standalone `gaps` command
/// Children: the store's range query
#[inline]
pub(crate) fn check_gaps(bottom: u64, top: u64, requested: usize) -> Span {
    tracing::debug_span!(
        "semioindex.check_gaps",
        bottom = bottom,
        top = top,
        requested = requested,
    )
}
