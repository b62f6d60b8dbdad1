//! Error types for the semioindex library.
//!
//! This module provides strongly-typed errors for all public APIs in
//! semioindex. It follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained error handling
//!   ([`RangeError`], [`RpcError`], [`StoreError`], [`IngestError`])
//! - **Unified error type** ([`SemioindexError`]) for convenience when you
//!   don't need to distinguish between error sources
//!
//! # Architecture
//!
//! - [`RangeError`] - Malformed block-range input; nothing was attempted
//! - [`RpcError`] - Chain-node fetch failures and malformed responses
//! - [`StoreError`] - Insert/commit/query failures, including duplicates
//!   rejected by the uniqueness constraint
//! - [`IngestError`] - A per-block failure wrapper carrying the block number
//! - [`AggregateIngestError`] - The collect-then-raise summary of a run
//!
//! Errors are never silently swallowed: a per-block failure is either
//! re-raised within its worker (terminating that worker's remaining list)
//! or captured and included in the final aggregate. There is no automatic
//! retry at any layer.

mod ingest;
mod range;
mod rpc;
mod store;

pub use ingest::{AggregateIngestError, IngestError};
pub use range::RangeError;
pub use rpc::RpcError;
pub use store::StoreError;

/// Unified error type for all semioindex operations.
///
/// All module-specific error types automatically convert to
/// `SemioindexError` via `From` implementations, so you can use `?` to
/// propagate errors naturally.
///
/// # Examples
///
/// ```rust,ignore
/// use semioindex::{BlockRange, SemioindexError};
///
/// async fn backfill(pipeline: &Pipeline) -> Result<(), SemioindexError> {
///     let range: BlockRange = "100-200".parse()?;
///     pipeline.run(range, IngestOptions::default()).await?;
///     Ok(())
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SemioindexError {
    /// Error parsing or validating a block range argument.
    #[error("Block range error: {0}")]
    Range(#[from] RangeError),

    /// Error from chain-node RPC operations.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Error from the persistence layer.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Aggregate of per-block failures from an ingestion run.
    #[error("Ingestion error: {0}")]
    Ingest(#[from] AggregateIngestError),
}
