//! Bucketed hash table with chained overflow levels.
//!
//! Every key is mapped to one of the top-level buckets. Each bucket holds at most
//! [`SLOTS_PER_BUCKET`] entries. Keys that do not fit are delegated to an overflow level which
//! is itself a table of the same shape, forming a chain of unbounded depth. When the share of
//! occupied slots of a level exceeds the configured threshold, the level doubles its bucket count
//! and redistributes the entries of its whole chain.
mod bucket;
pub use bucket::SLOTS_PER_BUCKET;
mod core;
pub use self::core::*;
mod ctors;
pub use ctors::*;
mod hash_map;
mod level;
