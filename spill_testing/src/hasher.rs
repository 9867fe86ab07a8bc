//! Mock hashers and generated test-cases for [`StreamHasher`] implementations.
use spill_core::{SpillError, StreamHasher};

/// Hasher that ignores its input and always produces the same digest.
///
/// Useful for forcing every key into the same bucket.
#[derive(Debug, Clone)]
pub struct FixedHasher {
    digest: Vec<u8>,
}

impl FixedHasher {
    pub fn new(digest: &[u8]) -> Self {
        Self {
            digest: digest.to_vec(),
        }
    }
}

impl StreamHasher for FixedHasher {
    type Digest = Vec<u8>;

    fn write(&mut self, _bytes: &[u8]) -> Result<(), SpillError> {
        Ok(())
    }

    fn sum(&self) -> Self::Digest {
        self.digest.clone()
    }

    fn reset(&mut self) {}

    fn digest_size(&self) -> usize {
        self.digest.len()
    }

    fn block_size(&self) -> usize {
        4
    }
}

/// Hasher that delegates to `inner` but fails to consume one specific input.
#[derive(Debug, Clone)]
pub struct FailingHasher<H> {
    inner: H,
    poison: Vec<u8>,
}

impl<H: StreamHasher> FailingHasher<H> {
    pub fn new(inner: H, poison: &[u8]) -> Self {
        Self {
            inner,
            poison: poison.to_vec(),
        }
    }
}

impl<H: StreamHasher> StreamHasher for FailingHasher<H> {
    type Digest = H::Digest;

    fn write(&mut self, bytes: &[u8]) -> Result<(), SpillError> {
        if bytes == self.poison.as_slice() {
            return Err(SpillError::Hashing("poisoned input".into()));
        }
        self.inner.write(bytes)
    }

    fn sum(&self) -> Self::Digest {
        self.inner.sum()
    }

    fn reset(&mut self) {
        self.inner.reset()
    }

    fn digest_size(&self) -> usize {
        self.inner.digest_size()
    }

    fn block_size(&self) -> usize {
        self.inner.block_size()
    }
}

/// Generates standard test cases for streaming hashers.
///
/// This macro generates test functions that verify:
/// - Equivalence between one-shot and chunked writes
/// - Finalization without side-effects and equivalence of reset and fresh hashers
///
/// # Parameters
///
/// - `name`: Suffix of the generated test functions
/// - `factory`: A closure that creates a freshly seeded hasher
///
/// # Example
///
/// ```ignore
/// generate_stream_hasher_tests!(murmur3, || Murmur3::with_seed(42));
/// ```
#[macro_export]
macro_rules! generate_stream_hasher_tests {
    ($name:ident, $factory:expr$(,)?) => {
        compose_idents::compose_idents!(
            test_fn = [test_chunked_write_equivalence_, $name];
            {
                #[test]
                fn test_fn() {
                    use rand::SeedableRng;
                    use rand_chacha::ChaCha20Rng;

                    $crate::equivalence::chunked_equivalence(
                        &mut ChaCha20Rng::from_os_rng(),
                        &$factory,
                        500,
                    );
                }
            }
        );

        compose_idents::compose_idents!(
            test_fn = [test_reset_equivalence_, $name];
            {
                #[test]
                fn test_fn() {
                    use rand::SeedableRng;
                    use rand_chacha::ChaCha20Rng;

                    $crate::equivalence::reset_equivalence(
                        &mut ChaCha20Rng::from_os_rng(),
                        &$factory,
                        500,
                    );
                }
            }
        );
    };
}
pub use generate_stream_hasher_tests;
