//! [`spill_core::StreamHasher`] implementations and digest utilities.
pub mod common;
mod murmur3;
pub use murmur3::*;
#[cfg(feature = "xxh3")]
mod xxh3;
#[cfg(feature = "xxh3")]
pub use xxh3::*;
