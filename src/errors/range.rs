//! Error types for block-range parsing and partitioning.

/// Errors that can occur while parsing or validating a block range argument.
///
/// Range errors are pure input errors: when one is raised, no database or
/// network activity has been attempted yet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// The range string did not match the expected `BOTTOM-TOP` shape.
    #[error("Malformed block range {input:?}: {reason}")]
    Malformed {
        /// The raw argument as supplied by the caller
        input: String,
        /// Why it failed to parse
        reason: String,
    },

    /// The range parsed but its bounds are inverted.
    #[error("Invalid block range: bottom {bottom} is greater than top {top}")]
    Inverted {
        /// Lower bound as supplied
        bottom: u64,
        /// Upper bound as supplied
        top: u64,
    },
}

impl RangeError {
    /// Create a `Malformed` error for a raw input string.
    pub fn malformed(input: impl Into<String>, reason: impl Into<String>) -> Self {
        RangeError::Malformed {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
