//! Implements the 32-bit variant of MurmurHash3 [(Appleby, 2011)] as a streaming hasher.
//!
//! [(Appleby, 2011)]: https://github.com/aappleby/smhasher
use spill_core::{SpillError, StreamHasher};

const C1: u32 = 0xcc9e2d51;
const C2: u32 = 0x1b873593;
const BLOCK_SIZE: usize = 4;
const DIGEST_SIZE: usize = 4;

/// Scrambles a single block before it is folded into the state.
#[inline]
const fn mix_k1(k1: u32) -> u32 {
    k1.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

/// Folds a complete block into the state.
#[inline]
const fn mix_h1(h1: u32, k1: u32) -> u32 {
    (h1 ^ mix_k1(k1))
        .rotate_left(13)
        .wrapping_mul(5)
        .wrapping_add(0xe6546b64)
}

/// Final avalanche.
#[inline]
const fn fmix32(mut h1: u32) -> u32 {
    h1 ^= h1 >> 16;
    h1 = h1.wrapping_mul(0x85ebca6b);
    h1 ^= h1 >> 13;
    h1 = h1.wrapping_mul(0xc2b2ae35);
    h1 ^= h1 >> 16;
    h1
}

/// Streaming MurmurHash3 (x86, 32-bit).
///
/// Input may be written in chunks of arbitrary sizes. Bytes that do not form a complete block
/// are buffered until the next write or until finalization.
///
/// # Examples
///
/// ```rust
/// use spill::hashing::Murmur3;
/// use spill::StreamHasher;
///
/// let mut hasher = Murmur3::default();
/// hasher.write(b"hel").unwrap();
/// hasher.write(b"lo").unwrap();
/// assert_eq!(hasher.sum(), [0x47, 0xfa, 0x8b, 0x24]);
/// ```
#[derive(Debug, Clone)]
pub struct Murmur3 {
    seed: u32,
    h1: u32,
    length: usize,
    tail: [u8; BLOCK_SIZE],
    tail_len: usize,
}

impl Default for Murmur3 {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

impl Murmur3 {
    /// Create a new hasher with the given `seed`.
    pub const fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            h1: seed,
            length: 0,
            tail: [0; BLOCK_SIZE],
            tail_len: 0,
        }
    }

    /// Get the seed the hasher returns to on reset.
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Get the number of bytes written since the last reset.
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Check if nothing has been written since the last reset.
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Finalize the running computation into a 32-bit value.
    pub fn sum32(&self) -> u32 {
        let mut h1 = self.h1;

        debug_assert!(self.tail_len < BLOCK_SIZE, "tail must not hold a full block");

        if self.tail_len > 0 {
            let mut k1: u32 = 0;
            for (i, &byte) in self.tail[..self.tail_len].iter().enumerate() {
                k1 ^= (byte as u32) << (8 * i);
            }
            h1 ^= mix_k1(k1);
        }

        // Only the low 32 bits of the length take part in finalization.
        h1 ^= self.length as u32;
        fmix32(h1)
    }
}

impl StreamHasher for Murmur3 {
    type Digest = [u8; DIGEST_SIZE];

    fn write(&mut self, mut bytes: &[u8]) -> Result<(), SpillError> {
        self.length += bytes.len();

        if self.tail_len > 0 {
            let take = (BLOCK_SIZE - self.tail_len).min(bytes.len());
            self.tail[self.tail_len..self.tail_len + take].copy_from_slice(&bytes[..take]);
            self.tail_len += take;
            bytes = &bytes[take..];

            if self.tail_len < BLOCK_SIZE {
                return Ok(());
            }
            self.h1 = mix_h1(self.h1, u32::from_le_bytes(self.tail));
            self.tail_len = 0;
        }

        let mut blocks = bytes.chunks_exact(BLOCK_SIZE);
        for block in &mut blocks {
            let k1 = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
            self.h1 = mix_h1(self.h1, k1);
        }

        let remainder = blocks.remainder();
        self.tail[..remainder.len()].copy_from_slice(remainder);
        self.tail_len = remainder.len();

        Ok(())
    }

    fn sum(&self) -> Self::Digest {
        self.sum32().to_le_bytes()
    }

    fn reset(&mut self) {
        self.h1 = self.seed;
        self.length = 0;
        self.tail_len = 0;
    }

    fn digest_size(&self) -> usize {
        DIGEST_SIZE
    }

    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }
}
