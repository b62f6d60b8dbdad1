// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definitions.

use clap::{Parser, Subcommand};

/// Block and transaction ingestion for EVM chains.
#[derive(Debug, Parser)]
#[command(name = "semioindex", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ingest a range of blocks into the store.
    Ingest {
        /// Inclusive block range, e.g. "18000000-18009999" or "18000000-latest".
        #[arg(long, value_name = "BOTTOM-TOP")]
        blocks: String,

        /// Also fetch and persist full transaction objects.
        #[arg(long)]
        transactions: bool,

        /// Skip blocks the store already holds (gap check first).
        #[arg(long)]
        check: bool,
    },

    /// Report block numbers missing from the store in a range.
    Gaps {
        /// Inclusive block range, e.g. "18000000-18009999" or "18000000-latest".
        #[arg(long, value_name = "BOTTOM-TOP")]
        blocks: String,
    },
}
