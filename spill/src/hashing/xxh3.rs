//! Implements a streaming hasher based on the 64-bit variant of XXH3.
use spill_core::{SpillError, StreamHasher};
use std::fmt::{Debug, Formatter};
use xxhash_rust::xxh3::Xxh3;

const STRIPE_LEN: usize = 64;
const DIGEST_SIZE: usize = 8;

/// Streaming XXH3 (64-bit).
///
/// The digest is the little-endian encoding of the 64-bit hash value.
#[derive(Clone)]
pub struct Xxh3Hasher {
    seed: u64,
    state: Xxh3,
}

impl Default for Xxh3Hasher {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

impl Debug for Xxh3Hasher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Xxh3Hasher")
            .field("seed", &self.seed)
            .finish()
    }
}

impl Xxh3Hasher {
    /// Create a new hasher with the given `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            state: Xxh3::with_seed(seed),
        }
    }

    /// Get the seed the hasher returns to on reset.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl StreamHasher for Xxh3Hasher {
    type Digest = [u8; DIGEST_SIZE];

    fn write(&mut self, bytes: &[u8]) -> Result<(), SpillError> {
        self.state.update(bytes);
        Ok(())
    }

    fn sum(&self) -> Self::Digest {
        self.state.digest().to_le_bytes()
    }

    fn reset(&mut self) {
        self.state.reset();
    }

    fn digest_size(&self) -> usize {
        DIGEST_SIZE
    }

    fn block_size(&self) -> usize {
        STRIPE_LEN
    }
}
