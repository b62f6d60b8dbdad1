//! Error types for the persistence layer.

/// Errors that can occur while persisting or querying chain data.
///
/// Insert failures always leave the store unchanged for the block being
/// written: the block row and its transaction rows commit atomically, and
/// any failure rolls the whole unit back.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to connect to the database or open a session.
    #[error("Database connection failed")]
    Connection {
        /// The underlying driver error
        #[source]
        source: sqlx::Error,
    },

    /// Failed to create the base tables on startup.
    #[error("Schema bootstrap failed")]
    Schema {
        /// The underlying driver error
        #[source]
        source: sqlx::Error,
    },

    /// A block (or one of its transactions) is already stored.
    ///
    /// Raised when the uniqueness constraint on the block-number key (or on
    /// a transaction hash) rejects an insert. This is the store's defense
    /// against the check-then-insert race between concurrent workers.
    #[error("Block {block_number} is already stored")]
    Duplicate {
        /// The block number whose insert was rejected
        block_number: u64,
    },

    /// Insert or commit failed for reasons other than a duplicate key.
    #[error("Failed to insert block {block_number}")]
    Insert {
        /// The block number being written
        block_number: u64,
        /// The underlying driver error
        #[source]
        source: sqlx::Error,
    },

    /// A read query failed.
    #[error("Query failed during {operation}")]
    Query {
        /// Description of the operation that failed
        operation: String,
        /// The underlying driver error
        #[source]
        source: sqlx::Error,
    },
}

impl StoreError {
    /// Helper to create an `Insert` error for a block.
    pub fn insert(block_number: u64, source: sqlx::Error) -> Self {
        StoreError::Insert {
            block_number,
            source,
        }
    }

    /// Helper to create a `Query` error with operation context.
    pub fn query(operation: impl Into<String>, source: sqlx::Error) -> Self {
        StoreError::Query {
            operation: operation.into(),
            source,
        }
    }

    /// True if this error is the uniqueness constraint rejecting a
    /// duplicate insert.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::Duplicate { .. })
    }
}
