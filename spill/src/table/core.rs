//! Declares core types for [`BucketedHashTable`].
use super::level::Level;
use crate::hashing::common::fold_digest;
use crate::hashing::Murmur3;
use spill_core::{digest_of, SpillError, StreamHasher};
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};

/// Growable hash table with fixed-capacity buckets and chained overflow levels.
///
/// # Guarantees
///
/// - Keys are unique across the whole overflow chain.
/// - The hash function is invoked exactly once per operation and before any mutation, so a
///   failing hash function leaves the table unchanged.
///
/// # Notes
///
/// - The hasher is mutated during lookups as well, hence it is kept in a [`RefCell`] and the
///   table is not [`Sync`].
///
/// # Examples
///
/// ```rust
/// use spill::hashing::Murmur3;
/// use spill::table::BucketedHashTable;
/// use spill::HashMap;
///
/// let mut book_reviews = BucketedHashTable::new(Murmur3::default(), 8, 0.75).unwrap();
///
/// book_reviews.insert("Adventures of Huckleberry Finn", "My favorite book.").unwrap();
/// book_reviews.insert("Grimms' Fairy Tales", "Masterpiece.").unwrap();
/// book_reviews.insert("Pride and Prejudice", "Very enjoyable.").unwrap();
///
/// // Check for a specific one.
/// if book_reviews.get("Les Misérables").unwrap().is_none() {
///     println!("We've got {} reviews, but Les Misérables ain't one.",
///              book_reviews.len());
/// }
/// ```
pub struct BucketedHashTable<V, H: StreamHasher = Murmur3> {
    pub(super) hasher: RefCell<H>,
    pub(super) root: Level<V>,
    pub(super) len: usize,
}

/// Hash `key` and fold its digest into an integer.
pub(super) fn hash_key<H: StreamHasher + ?Sized>(
    hasher: &mut H,
    key: &str,
) -> Result<u64, SpillError> {
    let digest = digest_of(hasher, key.as_bytes())?;
    Ok(fold_digest(digest.as_ref()))
}

impl<V, H: StreamHasher> BucketedHashTable<V, H> {
    /// Get the number of buckets of the top level.
    pub fn num_buckets(&self) -> usize {
        self.root.num_buckets
    }

    /// Get the threshold of the load factor that triggers growth.
    pub fn max_load_factor(&self) -> f64 {
        self.root.max_load_factor
    }

    /// Get the number of overflow levels chained to the top level.
    pub fn overflow_depth(&self) -> usize {
        self.root.levels().count() - 1
    }

    /// Check whether `key` is present.
    pub fn contains_key(&self, key: &str) -> Result<bool, SpillError> {
        let hash = hash_key(&mut *self.hasher.borrow_mut(), key)?;
        Ok(self.root.get(hash, key).is_some())
    }

    /// Get a mutable reference to the value associated with the given `key`.
    pub fn get_mut(&mut self, key: &str) -> Result<Option<&mut V>, SpillError> {
        let hash = hash_key(self.hasher.get_mut(), key)?;
        Ok(self.root.get_mut(hash, key))
    }

    /// Iterate over all key-value pairs of the table in an unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.root
            .entries()
            .map(|entry| (entry.key.as_str(), &entry.value))
    }

    /// Consume the table and return its hasher.
    pub fn into_hasher(self) -> H {
        self.hasher.into_inner()
    }
}

impl<V, H> Debug for BucketedHashTable<V, H>
where
    V: Debug,
    H: StreamHasher + Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BucketedHashTable")
            .field("hasher", &self.hasher)
            .field("num_buckets", &self.num_buckets())
            .field("overflow_depth", &self.overflow_depth())
            .field("len", &self.len)
            .field("entries", &DebugEntries(self))
            .finish()
    }
}

struct DebugEntries<'a, V, H: StreamHasher>(&'a BucketedHashTable<V, H>);

impl<V: Debug, H: StreamHasher> Debug for DebugEntries<'_, V, H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}
