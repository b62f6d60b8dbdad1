// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Chain-node access for the ingestion pipeline.
//!
//! The pipeline consumes the node through a single capability - "fetch
//! block by number, optionally with full transaction objects" - expressed
//! as the [`ChainClient`] trait. The production implementation,
//! [`RpcChainClient`], wraps any Alloy provider; tests substitute a mock
//! without touching the network.

use async_trait::async_trait;

use crate::errors::RpcError;
use crate::types::BlockPayload;

mod rpc;

pub use rpc::RpcChainClient;

/// The one chain capability the pipeline needs.
///
/// Implementations return fully-validated [`BlockPayload`]s: malformed node
/// responses are rejected at this boundary rather than propagating partial
/// data into persistence code.
///
/// # Thread Safety
///
/// Clients are shared across concurrent worker tasks via `Arc`; the
/// underlying transport hands each in-flight request its own connection.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Fetch the block at `number`.
    ///
    /// When `full_transactions` is set, the payload carries one decoded
    /// [`crate::TransactionRecord`] per transaction in the block; otherwise
    /// the transaction list is empty.
    ///
    /// # Errors
    ///
    /// - [`RpcError::BlockNotFound`] when the node has no block at `number`
    /// - [`RpcError::GetBlockFailed`] when the RPC call itself fails
    /// - [`RpcError::InvalidBlockData`] when the response fails validation
    async fn block_by_number(
        &self,
        number: u64,
        full_transactions: bool,
    ) -> Result<BlockPayload, RpcError>;

    /// The node's current head block number.
    ///
    /// Used once per run to resolve a `latest` upper bound.
    async fn latest_block_number(&self) -> Result<u64, RpcError>;
}
