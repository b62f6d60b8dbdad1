// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider configuration options

use std::time::Duration;

/// Configuration for creating providers
///
/// # Example
///
/// ```rust
/// use semioindex::provider::ProviderConfig;
///
/// let config = ProviderConfig::new("https://eth.llamarpc.com")
///     .with_rate_limit(10);
/// ```
///
/// Note: RPC request/response logging is handled natively by alloy's
/// transport layer at DEBUG/TRACE level.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// RPC endpoint: an HTTP(S) URL or an IPC socket path
    pub endpoint: String,
    /// Rate limit in requests per second (None for unlimited)
    pub rate_limit_per_second: Option<u32>,
    /// Minimum delay between requests (alternative to rate limiting)
    pub min_delay: Option<Duration>,
}

impl ProviderConfig {
    /// Create a new provider configuration for the specified endpoint
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            rate_limit_per_second: None,
            min_delay: None,
        }
    }

    /// Set rate limiting (requests per second)
    ///
    /// When set, the provider will automatically pace requests to stay
    /// within the specified limit. This is useful for public RPC endpoints.
    #[must_use]
    pub fn with_rate_limit(mut self, requests_per_second: u32) -> Self {
        self.rate_limit_per_second = Some(requests_per_second);
        self
    }

    /// Set rate limiting from an optional value
    #[must_use]
    pub fn with_rate_limit_opt(mut self, requests_per_second: Option<u32>) -> Self {
        self.rate_limit_per_second = requests_per_second;
        self
    }

    /// Set minimum delay between requests
    ///
    /// This is an alternative to rate limiting that ensures a minimum
    /// time gap between consecutive requests.
    #[must_use]
    pub fn with_min_delay(mut self, delay: Duration) -> Self {
        self.min_delay = Some(delay);
        self
    }

    /// Check if this configuration includes rate limiting
    #[must_use]
    pub fn has_rate_limiting(&self) -> bool {
        self.rate_limit_per_second.is_some() || self.min_delay.is_some()
    }

    /// True when the endpoint looks like an HTTP(S) URL rather than an IPC
    /// socket path.
    #[must_use]
    pub fn is_http(&self) -> bool {
        self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new("http://localhost:8545")
    }
}

/// Preset configurations for common node setups
impl ProviderConfig {
    /// Configuration preset for public endpoints (conservative rate limiting)
    #[must_use]
    pub fn public_endpoint(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint).with_rate_limit(5)
    }

    /// Configuration preset for local nodes (no rate limiting)
    #[must_use]
    pub fn local_node(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_config_new() {
        let config = ProviderConfig::new("https://eth.llamarpc.com");
        assert_eq!(config.endpoint, "https://eth.llamarpc.com");
        assert!(config.rate_limit_per_second.is_none());
        assert!(config.is_http());
    }

    #[test]
    fn test_provider_config_with_rate_limit() {
        let config = ProviderConfig::new("https://eth.llamarpc.com").with_rate_limit(10);
        assert_eq!(config.rate_limit_per_second, Some(10));
        assert!(config.has_rate_limiting());
    }

    #[test]
    fn test_provider_config_ipc_path() {
        let config = ProviderConfig::new("/var/run/geth.ipc");
        assert!(!config.is_http());
    }

    #[test]
    fn test_provider_config_public_endpoint() {
        let config = ProviderConfig::public_endpoint("https://eth.llamarpc.com");
        assert_eq!(config.rate_limit_per_second, Some(5));
    }

    #[test]
    fn test_provider_config_local_node() {
        let config = ProviderConfig::local_node("http://localhost:8545");
        assert!(!config.has_rate_limiting());
    }
}
