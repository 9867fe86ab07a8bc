//! Bucketed hash table with chained overflow levels, built on top of pluggable streaming hash
//! functions.
pub mod hashing;
pub mod radix;
pub mod table;

pub use spill_core::{HashMap, SpillError, StreamHasher};
