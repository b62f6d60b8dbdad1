// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block-range ingestion for EVM chains.
//!
//! semioindex pulls block (and optionally full transaction) data from an
//! Ethereum-compatible node over JSON-RPC and persists it into a relational
//! database. A requested interval is chopped into super-chunks, each chunk
//! dealt round-robin across a fixed set of concurrent workers, and every
//! block committed together with its transactions in one database
//! transaction. Failures are collected per block and raised once, in
//! aggregate, after all workers finish; committed progress stays committed
//! and the gap checker reconciles the holes on the next run.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use semioindex::{
//!     client::RpcChainClient, provider::{connect_provider, ProviderConfig},
//!     store::SqlStore, BlockRange, IndexerConfig, IngestOptions, Pipeline,
//! };
//!
//! let provider = connect_provider(ProviderConfig::new("https://eth.llamarpc.com")).await?;
//! let store = SqlStore::connect("postgres://localhost/chaindata", 4).await?;
//! store.ensure_schema().await?;
//!
//! let pipeline = Pipeline::new(
//!     Arc::new(RpcChainClient::new(provider)),
//!     Arc::new(store),
//!     IndexerConfig::default(),
//! );
//!
//! let range: BlockRange = "18000000-18000999".parse()?;
//! let report = pipeline.run(range, IngestOptions::default()).await?;
//! ```

pub mod bootstrap;
pub mod cli;
pub mod client;
mod config;
pub mod errors;
pub mod ingest;
pub mod provider;
mod range;
pub(crate) mod spans;
pub mod store;
pub mod transport;
pub mod types;

pub use config::{
    IndexerConfig, IndexerConfigBuilder, IngestOptions, DEFAULT_CHUNK_SIZE, DEFAULT_WORKER_COUNT,
};
pub use errors::{
    AggregateIngestError, IngestError, RangeError, RpcError, SemioindexError, StoreError,
};
pub use ingest::{IngestReport, Pipeline, WorkerReport};
pub use range::{partition_round_robin, BlockRange, RangeEnd, RangeSpec, SuperChunks};
pub use types::{BlockPayload, BlockRecord, TransactionRecord};
