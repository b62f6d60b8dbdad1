//! Shared RPC error types for blockchain provider operations.
//!
//! This module provides error types for common RPC failures that can occur
//! when fetching chain data from a node.

/// Errors that can occur during blockchain RPC operations.
///
/// This error type captures common failure modes when interacting with
/// blockchain providers (e.g., via Alloy). It includes context about what
/// operation was being performed to aid in debugging.
///
/// # Examples
///
/// ```rust
/// use semioindex::RpcError;
///
/// let error = RpcError::BlockNotFound { block_number: 19_000_000 };
/// println!("Error: {}", error);
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The provider endpoint URL could not be parsed.
    #[error("Invalid provider URL: {0}")]
    ProviderUrlInvalid(String),

    /// Failed to establish a connection to the provider.
    ///
    /// Raised when an IPC socket cannot be opened or a transport cannot be
    /// constructed from the configured endpoint.
    #[error("Provider connection failed: {0}")]
    ProviderConnectionFailed(String),

    /// Failed to fetch the current block number from the node.
    ///
    /// This typically indicates a connectivity issue or provider problem.
    #[error("Failed to get current block number")]
    GetBlockNumberFailed {
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to fetch block details by number.
    ///
    /// This is different from `BlockNotFound` - it indicates the RPC call
    /// itself failed, not that the block doesn't exist.
    #[error("Failed to fetch block {block_number} details")]
    GetBlockFailed {
        /// The block number we tried to fetch
        block_number: u64,
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Block was not found at the specified block number.
    ///
    /// This can occur if the block number is beyond the chain tip, if there
    /// was a chain reorganization, or if the provider hasn't synced that
    /// block.
    #[error("Block not found: {block_number}")]
    BlockNotFound {
        /// The block number that wasn't found
        block_number: u64,
    },

    /// The node returned a block that failed boundary validation.
    ///
    /// Malformed responses are rejected here, at the fetch boundary, rather
    /// than propagating partially-decoded data into persistence code.
    #[error("Malformed block {block_number} from node: {reason}")]
    InvalidBlockData {
        /// The block number whose response failed validation
        block_number: u64,
        /// What was wrong with the response
        reason: String,
    },
}

impl RpcError {
    /// Helper to create a `GetBlockNumberFailed` error from any error type.
    pub fn get_block_number_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        RpcError::GetBlockNumberFailed {
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetBlockFailed` error from any error type.
    pub fn get_block_failed(
        block_number: u64,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::GetBlockFailed {
            block_number,
            source: Box::new(source),
        }
    }

    /// Helper to create an `InvalidBlockData` error with a reason.
    pub fn invalid_block_data(block_number: u64, reason: impl Into<String>) -> Self {
        RpcError::InvalidBlockData {
            block_number,
            reason: reason.into(),
        }
    }
}
