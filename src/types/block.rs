// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Typed row record for a persisted block.

use alloy_primitives::{Address, Bloom, B256, B64, U256};
use serde::{Deserialize, Serialize};

use crate::types::TransactionRecord;

/// A fully-decoded block header, ready for persistence.
///
/// Every numeric field is an exact integer decoded from the node's native
/// representation; no floating point is involved anywhere. Records are
/// immutable once written: a block number maps to exactly one stored row and
/// there is no overwrite path.
///
/// # Examples
///
/// ```rust,ignore
/// use semioindex::BlockRecord;
///
/// let record: BlockRecord = client.block_by_number(19_000_000, false).await?.block;
/// assert_eq!(record.number, 19_000_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    /// Block height. Unique key in storage.
    pub number: u64,
    /// Block hash.
    pub hash: B256,
    /// Hash of the parent block.
    pub parent_hash: B256,
    /// Unix timestamp (seconds) the block was sealed at.
    pub timestamp: u64,
    /// Proof-of-work difficulty. Zero on post-merge and OP-stack chains.
    pub difficulty: U256,
    /// Total gas consumed by the block's transactions.
    pub gas_used: u64,
    /// Gas limit of the block.
    pub gas_limit: u64,
    /// Beneficiary (coinbase) address.
    pub miner: Address,
    /// Proof-of-work nonce. Absent on some post-merge RPC responses.
    pub nonce: Option<B64>,
    /// RLP-encoded size in bytes, when the node reports it.
    pub size: Option<U256>,
    /// State trie root after executing the block.
    pub state_root: B256,
    /// Receipts trie root.
    pub receipts_root: B256,
    /// Transactions trie root.
    pub transactions_root: B256,
    /// Aggregated log bloom filter.
    pub logs_bloom: Bloom,
}

/// A validated block together with its decoded transactions.
///
/// This is the unit the chain client hands to the ingestion workers: the
/// header record plus one [`TransactionRecord`] per transaction when full
/// transaction objects were requested, empty otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockPayload {
    /// The block header record.
    pub block: BlockRecord,
    /// Decoded transactions, in block order. Empty unless full transactions
    /// were requested from the node.
    pub transactions: Vec<TransactionRecord>,
}

impl BlockPayload {
    /// Block height this payload belongs to.
    #[must_use]
    pub fn number(&self) -> u64 {
        self.block.number
    }
}
