// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Persistence backends for ingested chain data.
//!
//! This module provides the storage seam for the pipeline:
//!
//! - [`SqlStore`]: relational persistence over `sqlx` (PostgreSQL in
//!   production, SQLite for local runs and tests)
//! - [`MemoryStore`]: in-memory store for unit and pipeline tests
//!
//! # Examples
//!
//! ```rust,ignore
//! use semioindex::store::SqlStore;
//!
//! let store = SqlStore::connect("postgres://localhost/chaindata", 8).await?;
//! store.ensure_schema().await?;
//! ```

use async_trait::async_trait;

use crate::errors::StoreError;
use crate::types::{BlockRecord, TransactionRecord};

mod memory;
mod sql;

pub use memory::MemoryStore;
pub use sql::SqlStore;

/// Transactional storage for blocks and their transactions.
///
/// Implementations must uphold two invariants the pipeline depends on:
///
/// - **Per-block atomicity**: a block row and its transaction rows become
///   visible together or not at all. A failed insert leaves no partial
///   state behind.
/// - **Uniqueness on block number**: inserting an already-stored block
///   number fails with [`StoreError::Duplicate`] and must not alter the
///   existing row. This is the only cross-worker coordination the pipeline
///   relies on.
///
/// # Thread Safety
///
/// Implementations are shared across concurrent worker tasks via `Arc` and
/// must be safe for concurrent inserts.
#[async_trait]
pub trait BlockStore: Send + Sync {
    /// Insert a block and its transactions as a single unit of work.
    ///
    /// Commits exactly once on success. On any failure the unit is rolled
    /// back and the error returned; a uniqueness violation surfaces as
    /// [`StoreError::Duplicate`].
    async fn insert_block(
        &self,
        block: &BlockRecord,
        transactions: &[TransactionRecord],
    ) -> Result<(), StoreError>;

    /// Block numbers already persisted within `bottom..=top`, ascending.
    ///
    /// Used by the gap checker to compute the set of blocks still missing
    /// from a requested range.
    async fn existing_in_range(&self, bottom: u64, top: u64) -> Result<Vec<u64>, StoreError>;

    /// A human-readable name for this backend, used in logs.
    fn name(&self) -> &'static str;
}
