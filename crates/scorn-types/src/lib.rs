//! Shared type definitions for the Scorn world and survival simulation.
//!
//! This crate is the single source of truth for the records and enumerations
//! exchanged between the generator, the settlement simulation, the player
//! state machine and the narrative composer.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe integer wrappers for all entity identifiers
//! - [`enums`] -- Area, settlement, structure, exterior, item, leader and
//!   command enumerations
//! - [`structs`] -- World records and live settlement/global state

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    AreaType, Command, CommandParseError, DeathCause, ExteriorType, ItemKind, LeaderArchetype,
    LocationKind, PlayerAction, SettlementType, StructureType,
};
pub use ids::{AreaId, LocationId, RoomId, SettlementId, StructureId};
pub use structs::{
    Area, EmergentLeader, GlobalState, Location, RealizedLocation, Room, Settlement,
    SettlementBias, SettlementState, Structure,
};
