//! Clock, configuration and settlement simulation for Scorn.
//!
//! # Modules
//!
//! - [`clock`] -- Passage/watch clock advanced with base-6 arithmetic.
//! - [`config`] -- Configuration loading from `scorn-config.yaml` into
//!   strongly-typed structs.
//! - [`settlement`] -- [`SettlementSimulation`], the pulse-driven settlement
//!   and climate engine with emergent leaders, wear floors and player
//!   influence.
//!
//! [`SettlementSimulation`]: settlement::SettlementSimulation

pub mod clock;
pub mod config;
pub mod settlement;
