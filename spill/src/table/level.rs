//! A single level of the overflow chain.
//!
//! The top level and every overflow level share the same structure. Each level exclusively owns
//! the next one, so the chain is a singly-linked list walked iteratively.
use super::bucket::{Bucket, Entry, SLOTS_PER_BUCKET};
use crate::hashing::common::bucket_index;

pub(crate) struct Level<V> {
    pub num_buckets: usize,
    pub buckets: Box<[Option<Box<Bucket<V>>>]>,
    /// Number of entries stored directly in this level's buckets.
    pub len: usize,
    pub max_load_factor: f64,
    pub overflow: Option<Box<Level<V>>>,
}

impl<V> Level<V> {
    pub fn new(num_buckets: usize, max_load_factor: f64) -> Self {
        debug_assert!(num_buckets >= 2, r#""num_buckets" must be at least 2"#);

        Self {
            num_buckets,
            buckets: (0..num_buckets).map(|_| None).collect(),
            len: 0,
            max_load_factor,
            overflow: None,
        }
    }

    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / (self.num_buckets * SLOTS_PER_BUCKET) as f64
    }

    /// Iterate over this level and every level of its overflow chain.
    pub fn levels(&self) -> impl Iterator<Item = &Level<V>> + '_ {
        std::iter::successors(Some(self), |level| level.overflow.as_deref())
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry<V>> + '_ {
        self.levels().flat_map(|level| {
            level
                .buckets
                .iter()
                .flatten()
                .flat_map(|bucket| bucket.iter())
        })
    }

    /// Insert `entry` into this level or, if its bucket is full, into the overflow chain.
    ///
    /// Returns the replaced value if the key has already been present.
    pub fn insert(&mut self, mut entry: Entry<V>) -> Option<V> {
        let mut level = self;
        let mut depth: usize = 0;

        loop {
            if level.load_factor() > level.max_load_factor {
                level.grow();
            }

            match level.place(entry) {
                Ok(previous) => return previous,
                Err(rejected) => entry = rejected,
            }

            depth += 1;
            let num_buckets = level.num_buckets;
            let max_load_factor = level.max_load_factor;
            level = &mut **level.overflow.get_or_insert_with(|| {
                log::trace!("Creating overflow level {depth} with {num_buckets} buckets");
                Box::new(Level::new(num_buckets, max_load_factor))
            });
        }
    }

    /// Place `entry` into its bucket of this level.
    ///
    /// Gives the entry back if the key is absent and the bucket is full.
    fn place(&mut self, entry: Entry<V>) -> Result<Option<V>, Entry<V>> {
        let bucket_idx = bucket_index(entry.hash, self.num_buckets);
        let bucket = self.buckets[bucket_idx].get_or_insert_with(|| Box::new(Bucket::new()));

        if let Some(slot_idx) = bucket.position(entry.hash, &entry.key) {
            let existing = bucket.entry_mut(slot_idx);
            return Ok(Some(std::mem::replace(&mut existing.value, entry.value)));
        }

        bucket.push(entry)?;
        self.len += 1;
        Ok(None)
    }

    pub fn get(&self, hash: u64, key: &str) -> Option<&V> {
        self.levels().find_map(|level| {
            level.buckets[bucket_index(hash, level.num_buckets)]
                .as_deref()
                .and_then(|bucket| bucket.get(hash, key))
                .map(|entry| &entry.value)
        })
    }

    pub fn get_mut(&mut self, hash: u64, key: &str) -> Option<&mut V> {
        let mut level = self;

        loop {
            let bucket_idx = bucket_index(hash, level.num_buckets);
            let slot_idx = level.buckets[bucket_idx]
                .as_deref()
                .and_then(|bucket| bucket.position(hash, key));

            if let Some(slot_idx) = slot_idx {
                return level.buckets[bucket_idx]
                    .as_deref_mut()
                    .map(|bucket| &mut bucket.entry_mut(slot_idx).value);
            }
            level = level.overflow.as_deref_mut()?;
        }
    }

    /// Double the number of buckets and redistribute every entry of the whole chain.
    ///
    /// The result holds only the overflow levels that the new bucket count requires.
    fn grow(&mut self) {
        let num_buckets = self.num_buckets * 2;

        let mut entries = Vec::with_capacity(self.len);
        self.drain_into(&mut entries);
        let num_entries = entries.len();

        let mut grown = Level::new(num_buckets, self.max_load_factor);
        for entry in entries {
            let previous = grown.insert(entry);
            debug_assert!(previous.is_none(), "keys must be unique within a chain");
        }

        log::debug!(
            "Grown level from {} to {} buckets, redistributed {} entries",
            self.num_buckets,
            num_buckets,
            num_entries
        );

        *self = grown;
    }

    /// Move every entry of the chain into `out`, detaching the overflow levels.
    fn drain_into(&mut self, out: &mut Vec<Entry<V>>) {
        let mut next = self.overflow.take();
        self.drain_buckets_into(out);

        while let Some(mut level) = next {
            level.drain_buckets_into(out);
            next = level.overflow.take();
        }
    }

    fn drain_buckets_into(&mut self, out: &mut Vec<Entry<V>>) {
        debug_assert_eq!(
            self.buckets.iter().flatten().map(|bucket| bucket.len()).sum::<usize>(),
            self.len,
            "level must count exactly the entries of its buckets"
        );

        for bucket in self.buckets.iter_mut().flatten() {
            bucket.drain_into(out);
        }
        self.len = 0;
    }
}

/// Unlinks the overflow chain iteratively so that deep chains are not dropped recursively.
impl<V> Drop for Level<V> {
    fn drop(&mut self) {
        let mut next = self.overflow.take();
        while let Some(mut level) = next {
            next = level.overflow.take();
        }
    }
}
