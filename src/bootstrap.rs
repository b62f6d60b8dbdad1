// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Application wiring: environment, collaborators, and command dispatch.
//!
//! The `--blocks` argument is validated before anything else happens: a
//! malformed range is reported and the process exits without opening a node
//! or database connection. Collaborators are then built per command - the
//! `gaps` command is a pure store query and only dials the node when the
//! range's upper bound is `latest`.

use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use tracing::{error, info};

use crate::cli::{Cli, Command};
use crate::client::{ChainClient, RpcChainClient};
use crate::config::{IndexerConfig, IngestOptions};
use crate::ingest::{gaps, Pipeline};
use crate::provider::{connect_provider, ProviderConfig};
use crate::range::{BlockRange, RangeSpec};
use crate::store::{BlockStore, SqlStore};

/// Main entry point for the application.
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let cli = Cli::parse();
    let config = IndexerConfig::from_env();

    match cli.command {
        Command::Ingest {
            blocks,
            transactions,
            check,
        } => {
            let Some(range_spec) = parse_blocks_arg(&blocks) else {
                return Ok(());
            };

            let client = connect_client(&config).await?;
            let store = connect_store(&config).await?;
            let range = resolve_range(range_spec, client.as_ref()).await?;

            let pipeline = Pipeline::new(client, store, config);
            let report = pipeline
                .run(
                    range,
                    IngestOptions {
                        fetch_transactions: transactions,
                        skip_existing: check,
                    },
                )
                .await?;

            info!(
                blocks_written = report.blocks_written,
                transactions_written = report.transactions_written,
                blocks_skipped = report.blocks_skipped,
                "Run finished"
            );
        }

        Command::Gaps { blocks } => {
            let Some(range_spec) = parse_blocks_arg(&blocks) else {
                return Ok(());
            };

            // Reporting holes is a store-only query; the node is consulted
            // solely to pin a `latest` upper bound.
            let range = if range_spec.needs_head() {
                let client = connect_client(&config).await?;
                range_spec.resolve(client.latest_block_number().await?)?
            } else {
                range_spec.resolve(0)?
            };
            let store = connect_store(&config).await?;

            // Walk the range in chunks so a huge interval never materializes
            // as one allocation.
            let mut missing: Vec<u64> = Vec::new();
            for chunk in range.super_chunks(config.chunk_size) {
                let numbers: Vec<u64> = chunk.numbers().collect();
                missing.extend(gaps::missing_blocks(store.as_ref(), &numbers).await?);
            }

            info!(range = %range, missing = missing.len(), "Gap scan finished");
            println!("{}", serde_json::to_string(&missing)?);
        }
    }

    Ok(())
}

/// Dial the chain node named by `NODE_URL` (HTTP(S) URL or IPC socket path).
async fn connect_client(config: &IndexerConfig) -> anyhow::Result<Arc<dyn ChainClient>> {
    let node_url = dotenvy::var("NODE_URL")
        .map_err(|_| anyhow::anyhow!("NODE_URL must be set to an HTTP(S) URL or IPC path"))?;

    let provider_config =
        ProviderConfig::new(node_url).with_rate_limit_opt(config.rate_limit_per_second);
    let provider = connect_provider(provider_config).await?;
    Ok(Arc::new(RpcChainClient::new(provider)))
}

/// Open the block store named by `DATABASE_URL` and ensure its tables exist.
async fn connect_store(config: &IndexerConfig) -> anyhow::Result<Arc<dyn BlockStore>> {
    let database_url = dotenvy::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set to a postgres:// or sqlite: URL"))?;

    // Size the pool to the worker fan-out so each worker can hold its own
    // connection during a per-block transaction.
    let store = SqlStore::connect(&database_url, config.worker_count.get() as u32).await?;
    store.ensure_schema().await?;
    Ok(Arc::new(store))
}

/// Fix a range's upper bound, asking the node for its head only when the
/// argument used `latest`.
async fn resolve_range(spec: RangeSpec, client: &dyn ChainClient) -> anyhow::Result<BlockRange> {
    let range = if spec.needs_head() {
        spec.resolve(client.latest_block_number().await?)?
    } else {
        spec.resolve(0)?
    };
    Ok(range)
}

/// Parse `--blocks`, reporting malformed input as a usage message.
///
/// A bad range is an operator typo, not a pipeline failure: print what was
/// wrong and the expected shape, then return `None` so the caller exits
/// cleanly without touching the node or the store.
fn parse_blocks_arg(raw: &str) -> Option<RangeSpec> {
    match raw.parse::<RangeSpec>() {
        Ok(spec) => Some(spec),
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            eprintln!("usage: --blocks BOTTOM-TOP (inclusive), e.g. --blocks 18000000-18009999");
            None
        }
    }
}
