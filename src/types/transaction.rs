// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Typed row record for a persisted transaction.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

/// A fully-decoded transaction, ready for persistence.
///
/// Written only together with its parent block: the store commits a block
/// and its transactions in a single database transaction, so a transaction
/// row can never be visible without its block row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction hash. Unique key in storage.
    pub hash: B256,
    /// Height of the block containing this transaction.
    pub block_number: u64,
    /// Sender address, recovered from the signature.
    pub from: Address,
    /// Recipient address. `None` for contract creations.
    pub to: Option<Address>,
    /// Gas limit supplied with the transaction.
    pub gas: u64,
    /// Gas price in wei. `None` for EIP-1559 transactions that only carry
    /// fee caps.
    pub gas_price: Option<u128>,
    /// Sender account nonce.
    pub nonce: u64,
    /// Calldata payload.
    pub input: Bytes,
    /// Position of the transaction within its block.
    pub transaction_index: u64,
    /// Transferred value in wei, exact.
    pub value: U256,
}
