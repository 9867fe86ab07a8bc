//! Implements utility-functions for testing that streaming hashers are insensitive to the way
//! their input is split into writes.
use crate::generate::generate_bytes;
use rand::prelude::*;
use spill_core::StreamHasher;

const MAX_INPUT_LEN: usize = 512;
const MAX_CHUNK_LEN: usize = 17;

fn one_shot<H, F>(factory: &F, data: &[u8]) -> H::Digest
where
    H: StreamHasher,
    F: Fn() -> H,
{
    let mut hasher = factory();
    hasher.write(data).unwrap();
    hasher.sum()
}

/// Verifies that writing input at once and in random chunks (empty ones included) produces
/// identical digests.
///
/// # Parameters
///
/// - `rng`: A random number generator used to create inputs and chunk boundaries.
/// - `factory`: Creates a freshly seeded hasher.
/// - `num_trials`: Number of random inputs to test.
///
/// # Panics
///
/// - If for any input the digests differ.
pub fn chunked_equivalence<R, H, F>(rng: &mut R, factory: &F, num_trials: usize)
where
    R: Rng,
    H: StreamHasher,
    F: Fn() -> H,
{
    for _ in 0..num_trials {
        let data = generate_bytes(rng, 0, MAX_INPUT_LEN);

        let mut chunked = factory();
        let mut rest = &data[..];
        while !rest.is_empty() {
            let chunk_len = rng.random_range(0..=rest.len().min(MAX_CHUNK_LEN));
            let (chunk, tail) = rest.split_at(chunk_len);
            chunked.write(chunk).unwrap();
            rest = tail;
        }

        assert_eq!(
            one_shot(factory, &data).as_ref(),
            chunked.sum().as_ref(),
            "Chunked digest differs for input {:?}",
            data
        );
    }
}

/// Verifies that finalization does not change the state of the hasher and that a reset hasher
/// is indistinguishable from a fresh one.
///
/// # Panics
///
/// - If repeated finalization yields different digests.
/// - If a reset hasher produces a digest different from a fresh one.
pub fn reset_equivalence<R, H, F>(rng: &mut R, factory: &F, num_trials: usize)
where
    R: Rng,
    H: StreamHasher,
    F: Fn() -> H,
{
    for _ in 0..num_trials {
        let garbage = generate_bytes(rng, 1, MAX_INPUT_LEN);
        let data = generate_bytes(rng, 0, MAX_INPUT_LEN);

        let mut hasher = factory();
        hasher.write(&garbage).unwrap();
        let first = hasher.sum();
        assert_eq!(first.as_ref(), hasher.sum().as_ref(), "Finalization mutated state");
        assert_eq!(first.as_ref().len(), hasher.digest_size());

        hasher.reset();
        hasher.write(&data).unwrap();
        assert_eq!(
            one_shot(factory, &data).as_ref(),
            hasher.sum().as_ref(),
            "Reset hasher differs from a fresh one for input {:?}",
            data
        );
    }
}
