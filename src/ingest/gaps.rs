// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Gap detection against the persisted block set.

use std::collections::HashSet;

use tracing::{debug, Instrument};

use crate::errors::StoreError;
use crate::spans;
use crate::store::BlockStore;

/// The subset of `numbers` not yet persisted, in the caller's order.
///
/// Computes `bottom = min`, `top = max`, queries the persisted block
/// numbers in that closed range, and returns the complement. Used before a
/// fetch pass to skip already-ingested blocks, and by the `gaps` command to
/// report holes left by incomplete runs.
///
/// This is a pure set difference: it does not by itself prevent duplicate
/// inserts when partitioned runs race between check and insert. The store's
/// uniqueness constraint on the block-number key remains the safety net.
///
/// # Errors
///
/// Returns [`StoreError`] if the range query fails.
pub async fn missing_blocks(
    store: &dyn BlockStore,
    numbers: &[u64],
) -> Result<Vec<u64>, StoreError> {
    let (Some(bottom), Some(top)) = (
        numbers.iter().min().copied(),
        numbers.iter().max().copied(),
    ) else {
        return Ok(Vec::new());
    };

    let span = spans::check_gaps(bottom, top, numbers.len());
    async move {
        let existing: HashSet<u64> = store
            .existing_in_range(bottom, top)
            .await?
            .into_iter()
            .collect();

        let missing: Vec<u64> = numbers
            .iter()
            .copied()
            .filter(|number| !existing.contains(number))
            .collect();

        debug!(
            bottom = bottom,
            top = top,
            requested = numbers.len(),
            stored = existing.len(),
            missing = missing.len(),
            "Gap check complete"
        );

        Ok(missing)
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use alloy_primitives::{Address, Bloom, B256, U256};

    use super::*;
    use crate::store::MemoryStore;
    use crate::types::BlockRecord;

    fn block(number: u64) -> BlockRecord {
        BlockRecord {
            number,
            hash: B256::with_last_byte(number as u8),
            parent_hash: B256::ZERO,
            timestamp: 0,
            difficulty: U256::ZERO,
            gas_used: 0,
            gas_limit: 30_000_000,
            miner: Address::ZERO,
            nonce: None,
            size: None,
            state_root: B256::ZERO,
            receipts_root: B256::ZERO,
            transactions_root: B256::ZERO,
            logs_bloom: Bloom::ZERO,
        }
    }

    #[tokio::test]
    async fn test_empty_input_yields_empty_output() {
        let store = Arc::new(MemoryStore::new());
        let missing = missing_blocks(store.as_ref(), &[]).await.unwrap();
        assert!(missing.is_empty());
    }

    #[tokio::test]
    async fn test_all_missing_when_store_empty() {
        let store = Arc::new(MemoryStore::new());
        let missing = missing_blocks(store.as_ref(), &[100, 101, 102])
            .await
            .unwrap();
        assert_eq!(missing, vec![100, 101, 102]);
    }

    #[tokio::test]
    async fn test_returns_complement_in_caller_order() {
        let store = Arc::new(MemoryStore::new());
        for number in [101, 103] {
            store.insert_block(&block(number), &[]).await.unwrap();
        }

        // Caller order is preserved, including non-ascending input.
        let missing = missing_blocks(store.as_ref(), &[103, 102, 101, 100])
            .await
            .unwrap();
        assert_eq!(missing, vec![102, 100]);
    }

    #[tokio::test]
    async fn test_fully_ingested_range_has_no_gaps() {
        let store = Arc::new(MemoryStore::new());
        for number in 100..=103 {
            store.insert_block(&block(number), &[]).await.unwrap();
        }

        let numbers: Vec<u64> = (100..=103).collect();
        let missing = missing_blocks(store.as_ref(), &numbers).await.unwrap();
        assert!(missing.is_empty());
    }
}
