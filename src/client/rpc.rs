// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Alloy-backed [`ChainClient`] implementation.
//!
//! Decodes `AnyNetwork` block responses into the crate's typed records,
//! validating required fields at the boundary. Numeric fields come through
//! as exact integers (`u64`/`u128`/`U256`); no floating point anywhere.

use alloy_consensus::Transaction as _;
use alloy_network::{AnyNetwork, AnyRpcBlock, AnyRpcTransaction, TransactionResponse};
use alloy_provider::Provider;
use alloy_rpc_types::BlockNumberOrTag;
use alloy_transport::TransportError;
use async_trait::async_trait;
use tracing::trace;

use crate::client::ChainClient;
use crate::errors::RpcError;
use crate::types::{BlockPayload, BlockRecord, TransactionRecord};

/// [`ChainClient`] over any Alloy `AnyNetwork` provider.
///
/// # Examples
///
/// ```rust,ignore
/// use semioindex::client::RpcChainClient;
/// use semioindex::provider::{create_http_provider, ProviderConfig};
///
/// let provider = create_http_provider(ProviderConfig::new("https://eth.llamarpc.com"))?;
/// let client = RpcChainClient::new(provider);
/// let payload = client.block_by_number(19_000_000, true).await?;
/// ```
#[derive(Debug, Clone)]
pub struct RpcChainClient<P> {
    provider: P,
}

impl<P> RpcChainClient<P> {
    /// Wrap a provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// A reference to the inner provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[async_trait]
impl<P> ChainClient for RpcChainClient<P>
where
    P: Provider<AnyNetwork>,
{
    async fn block_by_number(
        &self,
        number: u64,
        full_transactions: bool,
    ) -> Result<BlockPayload, RpcError> {
        let request = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(number));
        let request = if full_transactions {
            request.full()
        } else {
            request
        };

        let block = request
            .await
            .map_err(|e| classify_fetch_error(number, e))?
            .ok_or(RpcError::BlockNotFound {
                block_number: number,
            })?;

        trace!(block_number = number, "Fetched block");
        decode_block(number, block, full_transactions)
    }

    async fn latest_block_number(&self) -> Result<u64, RpcError> {
        self.provider
            .get_block_number()
            .await
            .map_err(RpcError::get_block_number_failed)
    }
}

fn classify_fetch_error(number: u64, error: TransportError) -> RpcError {
    RpcError::get_block_failed(number, error)
}

/// Decode and validate a raw node response into typed records.
fn decode_block(
    requested: u64,
    block: AnyRpcBlock,
    full_transactions: bool,
) -> Result<BlockPayload, RpcError> {
    let header = &block.header;
    let inner = &header.inner;

    if inner.number != requested {
        return Err(RpcError::invalid_block_data(
            requested,
            format!("node returned block {} instead", inner.number),
        ));
    }

    let record = BlockRecord {
        number: inner.number,
        hash: header.hash,
        parent_hash: inner.parent_hash,
        timestamp: inner.timestamp,
        difficulty: inner.difficulty,
        gas_used: inner.gas_used,
        gas_limit: inner.gas_limit,
        miner: inner.beneficiary,
        nonce: inner.nonce,
        size: header.size,
        state_root: inner.state_root,
        receipts_root: inner.receipts_root,
        transactions_root: inner.transactions_root,
        logs_bloom: inner.logs_bloom,
    };

    let transactions = if full_transactions {
        let txs = block.transactions.as_transactions().ok_or_else(|| {
            RpcError::invalid_block_data(
                requested,
                "full transactions requested but node returned hashes only",
            )
        })?;
        txs.iter()
            .map(|tx| decode_transaction(requested, tx))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        Vec::new()
    };

    Ok(BlockPayload {
        block: record,
        transactions,
    })
}

fn decode_transaction(
    block_number: u64,
    tx: &AnyRpcTransaction,
) -> Result<TransactionRecord, RpcError> {
    let tx = &tx.inner;
    // Recovered signer + signed envelope; consensus fields live on the
    // envelope, response-level fields on the outer rpc transaction.
    let envelope = &tx.inner;

    let transaction_index = tx.transaction_index.ok_or_else(|| {
        RpcError::invalid_block_data(
            block_number,
            format!(
                "transaction {} is missing its index within the block",
                TransactionResponse::tx_hash(tx)
            ),
        )
    })?;

    Ok(TransactionRecord {
        hash: TransactionResponse::tx_hash(tx),
        block_number,
        from: envelope.signer(),
        to: envelope.to(),
        gas: envelope.gas_limit(),
        gas_price: envelope.gas_price(),
        nonce: envelope.nonce(),
        input: envelope.input().clone(),
        transaction_index,
        value: envelope.value(),
    })
}
