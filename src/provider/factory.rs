// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider factory functions for creating type-erased providers

use alloy_network::AnyNetwork;
use alloy_provider::{IpcConnect, ProviderBuilder};
use alloy_rpc_client::ClientBuilder;

use crate::errors::RpcError;
use crate::transport::ThrottleLayer;

use super::config::ProviderConfig;
use super::AnyHttpProvider;

/// Create an HTTP provider with the given configuration
///
/// This creates a provider using `AnyNetwork` for type erasure, enabling
/// runtime chain selection without compile-time network type constraints.
///
/// # Examples
///
/// Basic usage:
/// ```rust,ignore
/// use semioindex::provider::{create_http_provider, ProviderConfig};
///
/// let provider = create_http_provider(
///     ProviderConfig::new("https://eth.llamarpc.com")
/// )?;
/// ```
///
/// With rate limiting:
/// ```rust,ignore
/// use semioindex::provider::{create_http_provider, ProviderConfig};
///
/// let provider = create_http_provider(
///     ProviderConfig::new("https://eth.llamarpc.com")
///         .with_rate_limit(10)
/// )?;
/// ```
///
/// # Errors
///
/// Returns an error if the URL cannot be parsed
pub fn create_http_provider(config: ProviderConfig) -> Result<AnyHttpProvider, RpcError> {
    let url: url::Url = config
        .endpoint
        .parse()
        .map_err(|e| RpcError::ProviderUrlInvalid(format!("{e}")))?;

    // Build the provider based on configuration
    // We disable recommended fillers to return a RootProvider for maximum flexibility
    match (config.rate_limit_per_second, config.min_delay) {
        // Rate limit
        (Some(rps), _) => {
            let client = ClientBuilder::default()
                .layer(ThrottleLayer::per_second(rps))
                .http(url);

            Ok(ProviderBuilder::new()
                .disable_recommended_fillers()
                .network::<AnyNetwork>()
                .connect_client(client))
        }

        // Min delay only
        (None, Some(delay)) => {
            let client = ClientBuilder::default()
                .layer(ThrottleLayer::with_min_delay(delay))
                .http(url);

            Ok(ProviderBuilder::new()
                .disable_recommended_fillers()
                .network::<AnyNetwork>()
                .connect_client(client))
        }

        // No pacing
        (None, None) => Ok(ProviderBuilder::new()
            .disable_recommended_fillers()
            .network::<AnyNetwork>()
            .connect_http(url)),
    }
}

/// Create an IPC provider with the given configuration
///
/// The endpoint is interpreted as a filesystem path to the node's IPC
/// socket. Pacing options apply the same way as for HTTP providers.
///
/// # Note
///
/// This function is async because opening the socket requires a handshake.
///
/// # Errors
///
/// Returns an error if the socket cannot be opened
pub async fn create_ipc_provider(config: ProviderConfig) -> Result<AnyHttpProvider, RpcError> {
    let ipc = IpcConnect::new(config.endpoint.clone());

    match (config.rate_limit_per_second, config.min_delay) {
        (Some(rps), _) => {
            let client = ClientBuilder::default()
                .layer(ThrottleLayer::per_second(rps))
                .ipc(ipc)
                .await
                .map_err(|e| RpcError::ProviderConnectionFailed(e.to_string()))?;

            Ok(ProviderBuilder::new()
                .disable_recommended_fillers()
                .network::<AnyNetwork>()
                .connect_client(client))
        }

        (None, Some(delay)) => {
            let client = ClientBuilder::default()
                .layer(ThrottleLayer::with_min_delay(delay))
                .ipc(ipc)
                .await
                .map_err(|e| RpcError::ProviderConnectionFailed(e.to_string()))?;

            Ok(ProviderBuilder::new()
                .disable_recommended_fillers()
                .network::<AnyNetwork>()
                .connect_client(client))
        }

        (None, None) => ProviderBuilder::new()
            .disable_recommended_fillers()
            .network::<AnyNetwork>()
            .connect_ipc(ipc)
            .await
            .map_err(|e| RpcError::ProviderConnectionFailed(e.to_string())),
    }
}

/// Create a provider for the configured endpoint, HTTP(S) or IPC
///
/// HTTP(S) URLs get an HTTP transport; anything else is treated as an IPC
/// socket path. This mirrors how the endpoint arrives from the environment,
/// where both forms are accepted.
///
/// # Errors
///
/// Returns an error if the endpoint is invalid or the connection fails
pub async fn connect_provider(config: ProviderConfig) -> Result<AnyHttpProvider, RpcError> {
    if config.is_http() {
        create_http_provider(config)
    } else {
        create_ipc_provider(config).await
    }
}

/// Quick helper to create a simple HTTP provider without configuration
///
/// # Errors
///
/// Returns an error if the URL is invalid
pub fn simple_http_provider(url: &str) -> Result<AnyHttpProvider, RpcError> {
    create_http_provider(ProviderConfig::new(url))
}
