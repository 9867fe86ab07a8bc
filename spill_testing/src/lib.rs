#![allow(dead_code)]

pub mod stat;
pub use stat::*;

pub mod generate;
pub use generate::*;

pub mod map;
pub use map::*;

pub mod equivalence;
pub use equivalence::*;

pub mod hasher;
pub use hasher::*;
