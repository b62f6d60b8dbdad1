// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for semioindex integration tests
//!
//! Provides a mock implementation of the chain-client trait to enable
//! testing without real blockchain connections.

use std::collections::{HashMap, HashSet};

use alloy_primitives::{Address, Bloom, Bytes, B256, U256};
use async_trait::async_trait;
use semioindex::client::ChainClient;
use semioindex::{BlockPayload, BlockRecord, RpcError, TransactionRecord};

/// A deterministic block record for `number`.
pub fn make_block(number: u64) -> BlockRecord {
    BlockRecord {
        number,
        hash: B256::repeat_byte(number as u8),
        parent_hash: B256::repeat_byte(number.wrapping_sub(1) as u8),
        timestamp: 1_700_000_000 + number * 12,
        difficulty: U256::ZERO,
        gas_used: 12_345_678,
        gas_limit: 30_000_000,
        miner: Address::repeat_byte(0x42),
        nonce: None,
        size: Some(U256::from(40_000u64)),
        state_root: B256::repeat_byte(0xa1),
        receipts_root: B256::repeat_byte(0xa2),
        transactions_root: B256::repeat_byte(0xa3),
        logs_bloom: Bloom::ZERO,
    }
}

/// A deterministic transaction record for `number` at `index`.
pub fn make_transaction(number: u64, index: u64) -> TransactionRecord {
    TransactionRecord {
        hash: B256::repeat_byte((number as u8).wrapping_add(index as u8).wrapping_add(1)),
        block_number: number,
        from: Address::repeat_byte(0x11),
        to: Some(Address::repeat_byte(0x22)),
        gas: 21_000,
        gas_price: Some(30_000_000_000),
        nonce: index,
        input: Bytes::new(),
        transaction_index: index,
        value: U256::from(1_000_000_000_000_000_000u128),
    }
}

/// A payload carrying `tx_count` transactions for `number`.
pub fn make_payload(number: u64, tx_count: u64) -> BlockPayload {
    BlockPayload {
        block: make_block(number),
        transactions: (0..tx_count)
            .map(|index| make_transaction(number, index))
            .collect(),
    }
}

/// Mock [`ChainClient`] for pipeline tests.
///
/// Serves payloads from a fixed map and injects RPC failures for selected
/// block numbers, giving complete control over fetch behavior without a
/// node.
///
/// # Example
///
/// ```rust,ignore
/// let client = MockChainClient::new()
///     .with_blocks(100..=103, 0)
///     .failing_on(101);
/// ```
pub struct MockChainClient {
    blocks: HashMap<u64, BlockPayload>,
    fail_on: HashSet<u64>,
    latest: u64,
}

impl Default for MockChainClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChainClient {
    /// Create a mock with no blocks.
    pub fn new() -> Self {
        Self {
            blocks: HashMap::new(),
            fail_on: HashSet::new(),
            latest: 0,
        }
    }

    /// Serve blocks for every number in `range`, each with `tx_count`
    /// transactions.
    pub fn with_blocks(mut self, range: std::ops::RangeInclusive<u64>, tx_count: u64) -> Self {
        for number in range {
            self.blocks.insert(number, make_payload(number, tx_count));
            self.latest = self.latest.max(number);
        }
        self
    }

    /// Serve an explicit payload for its block number.
    pub fn with_payload(mut self, payload: BlockPayload) -> Self {
        self.latest = self.latest.max(payload.number());
        self.blocks.insert(payload.number(), payload);
        self
    }

    /// Inject an RPC failure for `number`.
    pub fn failing_on(mut self, number: u64) -> Self {
        self.fail_on.insert(number);
        self
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn block_by_number(
        &self,
        number: u64,
        full_transactions: bool,
    ) -> Result<BlockPayload, RpcError> {
        if self.fail_on.contains(&number) {
            return Err(RpcError::get_block_failed(
                number,
                std::io::Error::other("simulated RPC outage"),
            ));
        }

        let payload = self
            .blocks
            .get(&number)
            .cloned()
            .ok_or(RpcError::BlockNotFound {
                block_number: number,
            })?;

        if full_transactions {
            Ok(payload)
        } else {
            Ok(BlockPayload {
                block: payload.block,
                transactions: Vec::new(),
            })
        }
    }

    async fn latest_block_number(&self) -> Result<u64, RpcError> {
        Ok(self.latest)
    }
}
