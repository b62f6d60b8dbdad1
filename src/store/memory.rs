// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory store backend.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::StoreError;
use crate::store::BlockStore;
use crate::types::{BlockRecord, TransactionRecord};

#[derive(Debug, Clone)]
struct StoredBlock {
    block: BlockRecord,
    transactions: Vec<TransactionRecord>,
}

/// In-memory [`BlockStore`] keyed by block number.
///
/// Mirrors the relational backend's contract - per-block atomicity and
/// duplicate rejection on the block-number key - without any I/O. Intended
/// for unit and pipeline tests; nothing persists across instances.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<BTreeMap<u64, StoredBlock>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored record for `number`, if present.
    #[must_use]
    pub fn block(&self, number: u64) -> Option<BlockRecord> {
        self.inner
            .lock()
            .expect("memory store lock poisoned")
            .get(&number)
            .map(|stored| stored.block.clone())
    }

    /// The stored transactions for `number`, if the block is present.
    #[must_use]
    pub fn transactions(&self, number: u64) -> Option<Vec<TransactionRecord>> {
        self.inner
            .lock()
            .expect("memory store lock poisoned")
            .get(&number)
            .map(|stored| stored.transactions.clone())
    }

    /// Number of stored blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().expect("memory store lock poisoned").len()
    }

    /// True when nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BlockStore for MemoryStore {
    async fn insert_block(
        &self,
        block: &BlockRecord,
        transactions: &[TransactionRecord],
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("memory store lock poisoned");
        if inner.contains_key(&block.number) {
            return Err(StoreError::Duplicate {
                block_number: block.number,
            });
        }
        inner.insert(
            block.number,
            StoredBlock {
                block: block.clone(),
                transactions: transactions.to_vec(),
            },
        );
        Ok(())
    }

    async fn existing_in_range(&self, bottom: u64, top: u64) -> Result<Vec<u64>, StoreError> {
        let inner = self.inner.lock().expect("memory store lock poisoned");
        Ok(inner.range(bottom..=top).map(|(number, _)| *number).collect())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, Bloom, B256, U256};

    use super::*;

    fn block(number: u64) -> BlockRecord {
        BlockRecord {
            number,
            hash: B256::with_last_byte(number as u8),
            parent_hash: B256::with_last_byte(number.wrapping_sub(1) as u8),
            timestamp: 1_700_000_000 + number,
            difficulty: U256::ZERO,
            gas_used: 21_000,
            gas_limit: 30_000_000,
            miner: Address::with_last_byte(0xaa),
            nonce: None,
            size: Some(U256::from(512u64)),
            state_root: B256::with_last_byte(0x01),
            receipts_root: B256::with_last_byte(0x02),
            transactions_root: B256::with_last_byte(0x03),
            logs_bloom: Bloom::ZERO,
        }
    }

    #[tokio::test]
    async fn test_insert_and_query_range() {
        let store = MemoryStore::new();
        for number in [100, 102, 105] {
            store.insert_block(&block(number), &[]).await.unwrap();
        }

        let existing = store.existing_in_range(100, 104).await.unwrap();
        assert_eq!(existing, vec![100, 102]);
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected_and_row_untouched() {
        let store = MemoryStore::new();
        let original = block(100);
        store.insert_block(&original, &[]).await.unwrap();

        let mut imposter = block(100);
        imposter.gas_used = 99;
        let err = store.insert_block(&imposter, &[]).await.unwrap_err();
        assert!(err.is_duplicate());

        // The first write wins; the stored row is not corrupted.
        assert_eq!(store.block(100).unwrap(), original);
    }

    #[tokio::test]
    async fn test_empty_range_query() {
        let store = MemoryStore::new();
        assert!(store.existing_in_range(0, 1000).await.unwrap().is_empty());
    }
}
