// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for ingestion runs
//!
//! This module provides a typed configuration layer for controlling the
//! pipeline's concurrency and chunking behavior.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use semioindex::IndexerConfig;
//!
//! let config = IndexerConfig::default();
//! assert_eq!(config.worker_count.get(), 4);
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use std::num::{NonZeroU64, NonZeroUsize};
//! use semioindex::IndexerConfigBuilder;
//!
//! let config = IndexerConfigBuilder::new()
//!     .worker_count(NonZeroUsize::new(8).unwrap())
//!     .chunk_size(NonZeroU64::new(500).unwrap())
//!     .build();
//! ```

use std::num::{NonZeroU64, NonZeroUsize};

use tracing::warn;

/// Default number of concurrent ingestion workers.
pub const DEFAULT_WORKER_COUNT: NonZeroUsize = match NonZeroUsize::new(4) {
    Some(n) => n,
    None => panic!("default worker count must be non-zero"),
};

/// Default super-chunk size in blocks.
///
/// Large intervals are chopped into chunks of this many blocks, processed
/// sequentially, bounding per-run memory and limiting the blast radius of a
/// crash to one chunk.
pub const DEFAULT_CHUNK_SIZE: NonZeroU64 = match NonZeroU64::new(1000) {
    Some(n) => n,
    None => panic!("default chunk size must be non-zero"),
};

/// Configuration for the ingestion pipeline
///
/// Controls worker fan-out, super-chunking, and RPC pacing. Use
/// [`IndexerConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    /// Number of concurrent workers per super-chunk
    pub worker_count: NonZeroUsize,

    /// Maximum number of blocks handled per super-chunk
    pub chunk_size: NonZeroU64,

    /// Provider rate limit in requests per second
    /// Default: None (no pacing)
    pub rate_limit_per_second: Option<u32>,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            chunk_size: DEFAULT_CHUNK_SIZE,
            rate_limit_per_second: None,
        }
    }
}

impl IndexerConfig {
    /// Read overrides from the environment on top of the defaults.
    ///
    /// Recognized variables:
    /// - `WORKER_COUNT` - number of concurrent workers
    /// - `RPC_RATE_LIMIT` - provider requests per second
    ///
    /// Unset variables keep their defaults; set-but-invalid values are
    /// reported and ignored rather than silently misread as defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var("WORKER_COUNT") {
            match raw.parse::<NonZeroUsize>() {
                Ok(count) => config.worker_count = count,
                Err(e) => warn!(value = %raw, "Ignoring invalid WORKER_COUNT: {e}"),
            }
        }

        if let Ok(raw) = std::env::var("RPC_RATE_LIMIT") {
            match raw.parse::<u32>() {
                Ok(rps) if rps > 0 => config.rate_limit_per_second = Some(rps),
                Ok(_) => warn!("Ignoring RPC_RATE_LIMIT of 0"),
                Err(e) => warn!(value = %raw, "Ignoring invalid RPC_RATE_LIMIT: {e}"),
            }
        }

        config
    }
}

/// Builder for [`IndexerConfig`]
#[derive(Debug, Clone, Default)]
pub struct IndexerConfigBuilder {
    worker_count: Option<NonZeroUsize>,
    chunk_size: Option<NonZeroU64>,
    rate_limit_per_second: Option<u32>,
}

impl IndexerConfigBuilder {
    /// Create a builder starting from the defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of concurrent workers
    #[must_use]
    pub fn worker_count(mut self, count: NonZeroUsize) -> Self {
        self.worker_count = Some(count);
        self
    }

    /// Set the super-chunk size in blocks
    #[must_use]
    pub fn chunk_size(mut self, size: NonZeroU64) -> Self {
        self.chunk_size = Some(size);
        self
    }

    /// Set the provider rate limit (requests per second)
    #[must_use]
    pub fn rate_limit_per_second(mut self, rps: u32) -> Self {
        self.rate_limit_per_second = Some(rps);
        self
    }

    /// Build the configuration, filling unset fields with defaults
    #[must_use]
    pub fn build(self) -> IndexerConfig {
        IndexerConfig {
            worker_count: self.worker_count.unwrap_or(DEFAULT_WORKER_COUNT),
            chunk_size: self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE),
            rate_limit_per_second: self.rate_limit_per_second,
        }
    }
}

/// Per-run ingestion options, as selected on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    /// Also fetch and persist full transaction objects
    pub fetch_transactions: bool,
    /// Run the gap checker first and skip already-present blocks
    pub skip_existing: bool,
}
