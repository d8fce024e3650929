//! Player survival state machine for Scorn.
//!
//! # Modules
//!
//! - [`config`] -- [`VitalsConfig`] starting values and strain parameters,
//!   plus the per-action time and risk costs.
//! - [`death`] -- End-of-action mortality checks.
//! - [`game`] -- [`Game`], which owns a run and exposes the player
//!   operations, background pulses, replay and the view projection.
//! - [`inventory`] -- Item counts, weighted search finds and search lines.
//! - [`player`] -- [`PlayerState`] and the displayed narration.
//! - [`vitals`] -- Body drift and immediate danger.
//!
//! [`VitalsConfig`]: config::VitalsConfig
//! [`Game`]: game::Game
//! [`PlayerState`]: player::PlayerState

pub mod config;
pub mod death;
pub mod game;
pub mod inventory;
pub mod player;
pub mod vitals;

pub use config::VitalsConfig;
pub use game::Game;
pub use inventory::Inventory;
pub use player::{Narration, PlayerState};
pub use vitals::Vitals;
