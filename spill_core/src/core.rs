//! Core trait and type declarations for the whole project.
use crate::error::SpillError;

/// Incremental hash function consumed by the tables.
///
/// Differs from [`std::hash::Hasher`] in the way that it exposes the complete digest as bytes,
/// can be reset to its seeded state and treats consumption of input as fallible.
///
/// # Notes
///
/// - Implementations are stateful, so one instance must not be used by several interleaved
///   computations.
pub trait StreamHasher {
    /// Finalized output of the hash function.
    type Digest: AsRef<[u8]>;

    /// Append `bytes` to the running computation.
    fn write(&mut self, bytes: &[u8]) -> Result<(), SpillError>;

    /// Finalize the running computation.
    ///
    /// Must not change the state of the hasher, so that calling it repeatedly without
    /// intervening writes or resets yields identical digests.
    fn sum(&self) -> Self::Digest;

    /// Restore the seeded initial state.
    fn reset(&mut self);

    /// Number of bytes in the digest returned by [`StreamHasher::sum`].
    fn digest_size(&self) -> usize;

    /// Size of the block the hash function consumes its input in.
    ///
    /// Writes of any size are accepted, but a hasher may operate more efficiently if all
    /// writes are a multiple of the block size.
    fn block_size(&self) -> usize;
}

/// Allows lending a single hasher to several consumers.
impl<H: StreamHasher + ?Sized> StreamHasher for &mut H {
    type Digest = H::Digest;

    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<(), SpillError> {
        (**self).write(bytes)
    }

    #[inline]
    fn sum(&self) -> Self::Digest {
        (**self).sum()
    }

    #[inline]
    fn reset(&mut self) {
        (**self).reset()
    }

    #[inline]
    fn digest_size(&self) -> usize {
        (**self).digest_size()
    }

    #[inline]
    fn block_size(&self) -> usize {
        (**self).block_size()
    }
}

/// Compute the digest of `bytes` from scratch.
///
/// The hasher is reset both before and after the computation, so it is left in its seeded state
/// even if the write fails.
pub fn digest_of<H: StreamHasher + ?Sized>(
    hasher: &mut H,
    bytes: &[u8],
) -> Result<H::Digest, SpillError> {
    hasher.reset();
    let result = hasher.write(bytes).map(|_| hasher.sum());
    hasher.reset();
    result
}

/// A growable hash map with text keys.
pub trait HashMap<V> {
    /// Insert `value` under `key`.
    ///
    /// Returns the previous value if the key has already been present. The value is then replaced
    /// in place.
    fn insert<K: Into<String>>(&mut self, key: K, value: V) -> Result<Option<V>, SpillError>;

    /// Get the value associated with the given `key`.
    fn get(&self, key: &str) -> Result<Option<&V>, SpillError>;

    /// Get the number of elements in the map.
    fn len(&self) -> usize;

    /// Check if the map is empty.
    fn is_empty(&self) -> bool;

    /// Get the load factor of the map.
    fn load_factor(&self) -> f64;
}
