//! Fixed-capacity bucket of the table.
use bitvec::prelude::*;
use std::fmt::{Debug, Formatter};
use std::mem::MaybeUninit;

/// Number of slots in every bucket.
pub const SLOTS_PER_BUCKET: usize = 8;

const _: () = assert!(SLOTS_PER_BUCKET == u8::BITS as usize);

/// A key-value pair together with the folded digest of its key.
///
/// The digest is cached so that re-distributing entries never has to consult the hash function
/// again.
pub(crate) struct Entry<V> {
    pub hash: u64,
    pub key: String,
    pub value: V,
}

impl<V> Entry<V> {
    #[inline]
    fn matches(&self, hash: u64, key: &str) -> bool {
        self.hash == hash && self.key == key
    }
}

/// A bucket of the table.
///
/// Slots are filled in order and are never vacated individually, so occupied slots always form
/// a prefix of the slot array.
pub(crate) struct Bucket<V> {
    /// A bit-mask of the occupied slots in the bucket.
    occupied: u8,
    slots: [MaybeUninit<Entry<V>>; SLOTS_PER_BUCKET],
}

impl<V> Bucket<V> {
    pub fn new() -> Self {
        Self {
            occupied: 0,
            slots: std::array::from_fn(|_| MaybeUninit::uninit()),
        }
    }

    /// Number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.occupied.count_ones() as usize
    }

    /// Find the slot holding `key`.
    pub fn position(&self, hash: u64, key: &str) -> Option<usize> {
        self.occupied
            .view_bits::<Lsb0>()
            .iter_ones()
            .find(|&slot_idx| unsafe { self.slots[slot_idx].assume_init_ref() }.matches(hash, key))
    }

    pub fn get(&self, hash: u64, key: &str) -> Option<&Entry<V>> {
        self.position(hash, key)
            .map(|slot_idx| unsafe { self.slots[slot_idx].assume_init_ref() })
    }

    /// Get the entry stored in the occupied slot `slot_idx`.
    pub fn entry_mut(&mut self, slot_idx: usize) -> &mut Entry<V> {
        debug_assert!(
            self.occupied.view_bits::<Lsb0>()[slot_idx],
            "slot {} must be occupied",
            slot_idx
        );
        unsafe { self.slots[slot_idx].assume_init_mut() }
    }

    /// Occupy the first vacant slot with `entry`.
    ///
    /// Gives the entry back if the bucket is full.
    pub fn push(&mut self, entry: Entry<V>) -> Result<(), Entry<V>> {
        let Some(slot_idx) = self.occupied.view_bits::<Lsb0>().first_zero() else {
            return Err(entry);
        };
        self.slots[slot_idx].write(entry);
        self.occupied.view_bits_mut::<Lsb0>().set(slot_idx, true);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<V>> + '_ {
        self.occupied
            .view_bits::<Lsb0>()
            .iter_ones()
            .map(move |slot_idx| unsafe { self.slots[slot_idx].assume_init_ref() })
    }

    /// Move all entries out into `out` leaving the bucket empty.
    pub fn drain_into(&mut self, out: &mut Vec<Entry<V>>) {
        for slot_idx in self.occupied.view_bits::<Lsb0>().iter_ones() {
            out.push(unsafe { self.slots[slot_idx].assume_init_read() });
        }
        self.occupied = 0;
    }
}

/// Deinitializes only the occupied slots and skips the vacant ones.
impl<V> Drop for Bucket<V> {
    fn drop(&mut self) {
        for slot_idx in self.occupied.view_bits::<Lsb0>().iter_ones() {
            unsafe { self.slots[slot_idx].assume_init_drop() };
        }
    }
}

impl<V: Debug> Debug for Bucket<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|entry| (&entry.key, &entry.value)))
            .finish()
    }
}
