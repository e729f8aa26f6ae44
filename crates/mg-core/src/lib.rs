//! mg-core: Procedural 2-D dungeon layout generation
//!
//! This crate contains all layout logic with no I/O dependencies.
//! It is designed to be pure and testable: every run is reproducible
//! from its parameters and a 64-bit seed.

pub mod dungeon;

mod rng;

pub use rng::GenRng;
