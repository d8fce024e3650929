//! Deterministic randomness and procedural world generation for Scorn.
//!
//! This crate turns a single seed into an immutable location graph of areas,
//! settlements, structures, rooms and traversable locations, and provides the
//! two randomness primitives every other layer depends on.
//!
//! # Modules
//!
//! - [`rng`] -- [`DeterministicRng`] (a seeded LCG stream implementing
//!   `rand::RngCore`), the [`Roll`] extension, and the pure [`stable_hash`].
//! - [`names`] -- Themed literal name pools keyed by record type.
//! - [`generator`] -- [`WorldGenerator`], the seed-to-world builder.
//! - [`world`] -- [`World`], id-indexed lookups, validation and digest.
//! - [`error`] -- [`WorldError`] and the individual [`Violation`]s it reports.

pub mod error;
pub mod generator;
pub mod names;
pub mod rng;
pub mod world;

// Re-export primary types at crate root.
pub use error::{Violation, WorldError};
pub use generator::WorldGenerator;
pub use rng::{DeterministicRng, Roll, pick_by_hash, stable_hash};
pub use world::{World, WorldParts};
