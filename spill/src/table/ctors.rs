//! Implements constructors for [`BucketedHashTable`].
use super::level::Level;
use super::BucketedHashTable;
use spill_core::SpillError;
use spill_core::SpillError::{InvalidLoadFactor, InvalidNumBuckets};
use spill_core::StreamHasher;
use std::cell::RefCell;

/// The smallest number of buckets a table may be created with.
pub const MIN_NUM_BUCKETS: usize = 2;
/// Number of buckets used by [`BucketedHashTable::with_hasher`].
pub const DEFAULT_NUM_BUCKETS: usize = 8;
/// Load factor threshold used by [`BucketedHashTable::with_hasher`].
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

impl<V, H: StreamHasher> BucketedHashTable<V, H> {
    /// Creates a new empty [`BucketedHashTable`].
    ///
    /// # Parameters
    ///
    /// - `hasher`: The hash function used for every level of the table.
    /// - `num_buckets`: The initial number of buckets, at least [`MIN_NUM_BUCKETS`]. Doesn't have
    ///                  to be a power of two.
    /// - `max_load_factor`: Share of occupied slots within `(0, 1]` above which a level grows.
    pub fn new(hasher: H, num_buckets: usize, max_load_factor: f64) -> Result<Self, SpillError> {
        if num_buckets < MIN_NUM_BUCKETS {
            return Err(InvalidNumBuckets(num_buckets));
        }
        if max_load_factor.is_nan() || max_load_factor <= 0.0 || max_load_factor > 1.0 {
            return Err(InvalidLoadFactor(max_load_factor));
        }

        Ok(Self {
            hasher: RefCell::new(hasher),
            root: Level::new(num_buckets, max_load_factor),
            len: 0,
        })
    }

    /// Creates a new empty [`BucketedHashTable`] with [`DEFAULT_NUM_BUCKETS`] buckets and
    /// [`DEFAULT_MAX_LOAD_FACTOR`] as the growth threshold.
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            hasher: RefCell::new(hasher),
            root: Level::new(DEFAULT_NUM_BUCKETS, DEFAULT_MAX_LOAD_FACTOR),
            len: 0,
        }
    }
}

impl<V, H: StreamHasher + Default> Default for BucketedHashTable<V, H> {
    fn default() -> Self {
        Self::with_hasher(H::default())
    }
}
