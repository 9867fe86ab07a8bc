//! Error definitions.
use thiserror::Error;

/// Project-wise error type.
#[derive(Error, Debug)]
pub enum SpillError {
    /// The hash function was unable to consume its input.
    ///
    /// Never produced by the bundled hashers.
    #[error("Hash function failed to consume input: {0}")]
    Hashing(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A table must be constructed with at least 2 buckets.
    #[error("Number of buckets must be at least 2, got {0}.")]
    InvalidNumBuckets(usize),

    /// A load factor threshold must lie within `(0, 1]`.
    #[error("Load factor threshold must be within (0, 1], got {0}.")]
    InvalidLoadFactor(f64),
}
