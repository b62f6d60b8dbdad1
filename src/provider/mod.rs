// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Dynamic provider utilities for runtime endpoint selection
//!
//! This module provides utilities for creating type-erased providers so the
//! ingestion pipeline works against any EVM chain without compile-time
//! network type constraints.
//!
//! # Overview
//!
//! The pipeline never inspects network-specific fields, so all providers use
//! `AnyNetwork` for type erasure. The endpoint arrives from configuration as
//! either an HTTP(S) URL or an IPC socket path; [`connect_provider`] picks
//! the right transport.
//!
//! # Examples
//!
//! ## HTTP Provider with Rate Limiting
//!
//! ```rust,ignore
//! use semioindex::provider::{create_http_provider, ProviderConfig};
//!
//! // Create a rate-limited provider
//! let config = ProviderConfig::new("https://eth.llamarpc.com")
//!     .with_rate_limit(10); // 10 requests per second
//!
//! let provider = create_http_provider(config)?;
//!
//! let block_number = provider.get_block_number().await?;
//! ```
//!
//! ## Endpoint from the environment
//!
//! ```rust,ignore
//! use semioindex::provider::{connect_provider, ProviderConfig};
//!
//! // NODE_URL may be "https://..." or "/var/run/geth.ipc"
//! let endpoint = std::env::var("NODE_URL")?;
//! let provider = connect_provider(ProviderConfig::new(endpoint)).await?;
//! ```

mod config;
mod factory;

pub use config::ProviderConfig;
pub use factory::{
    connect_provider, create_http_provider, create_ipc_provider, simple_http_provider,
};

use alloy_network::AnyNetwork;

/// Type alias for a provider using AnyNetwork
///
/// This provider can interact with any EVM chain but loses network-specific
/// type information. The pipeline only reads network-agnostic block fields,
/// so this is the only provider shape it needs.
pub type AnyHttpProvider = alloy_provider::RootProvider<AnyNetwork>;
