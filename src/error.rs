// Error types at the library seams. The binary edge uses anyhow.

use thiserror::Error;

/// Faults reported by the store collaborators.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying query or connection failure.
    #[error(transparent)]
    Query(#[from] sqlx::Error),

    /// An item row carried a value type outside the closed set. This is a
    /// collaborator contract breach, not a user-facing failure; requests
    /// abort instead of reporting it as a normal error response.
    #[error("item {item_id} has unknown value type {value_type}")]
    UnknownValueKind { item_id: u64, value_type: i32 },
}

/// Errors from the statistics module.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// stdev uses the n-1 divisor and is undefined below two samples.
    #[error("{operation} needs at least {needed} samples, got {got}")]
    InsufficientSamples {
        operation: &'static str,
        needed: usize,
        got: usize,
    },

    /// A numeric reduction met a non-numeric sample value.
    #[error("non-numeric sample value in {operation}")]
    NonNumeric { operation: &'static str },
}
