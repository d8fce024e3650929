//! Core record and state structs for the Scorn simulation.
//!
//! The world records ([`Area`], [`Settlement`], [`Structure`], [`Room`],
//! [`Location`]) are produced once by the generator and never mutated
//! afterwards. [`SettlementState`] and [`GlobalState`] are the live scalars
//! advanced by every simulation pulse.

use serde::{Deserialize, Serialize};

use crate::enums::{AreaType, LeaderArchetype, LocationKind, SettlementType, StructureType};
use crate::ids::{AreaId, LocationId, RoomId, SettlementId, StructureId};

// ---------------------------------------------------------------------------
// World records
// ---------------------------------------------------------------------------

/// A named region holding an ordered run of settlements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    /// Unique area identifier.
    pub id: AreaId,
    /// Display name.
    pub name: String,
    /// Terrain theme.
    pub area_type: AreaType,
    /// Settlements in generation order.
    pub settlement_ids: Vec<SettlementId>,
}

/// A settlement: a hub location ringed by structures and connectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Unique settlement identifier.
    pub id: SettlementId,
    /// Display name.
    pub name: String,
    /// Social character.
    pub settlement_type: SettlementType,
    /// Owning area.
    pub area_id: AreaId,
    /// Every location that belongs to this settlement, in creation order.
    pub location_ids: Vec<LocationId>,
    /// Structure records anchored in this settlement.
    pub structure_ids: Vec<StructureId>,
    /// The settlement's central exterior location.
    pub hub_location_id: LocationId,
}

/// A descriptive structure record anchored at a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structure {
    /// Unique structure identifier.
    pub id: StructureId,
    /// Display name (shared with the anchor location).
    pub name: String,
    /// Function of the structure.
    pub structure_type: StructureType,
    /// Owning area.
    pub area_id: AreaId,
    /// Owning settlement.
    pub settlement_id: SettlementId,
    /// The traversable location that represents this structure.
    pub anchor_location_id: LocationId,
    /// Rooms inside, in creation order.
    pub room_ids: Vec<RoomId>,
}

/// A descriptive room inside a structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: RoomId,
    /// Display name, suffixed with its 1-based index.
    pub name: String,
    /// Owning area.
    pub area_id: AreaId,
    /// Owning settlement.
    pub settlement_id: SettlementId,
    /// Owning structure.
    pub structure_id: StructureId,
}

/// A traversable node in the world graph.
///
/// Neighbors are stored by id in insertion order. The relation is symmetric:
/// if `b` is in `a.neighbors` then `a` is in `b.neighbors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Unique location identifier.
    pub id: LocationId,
    /// Display name.
    pub name: String,
    /// Owning area.
    pub area_id: AreaId,
    /// Owning settlement.
    pub settlement_id: SettlementId,
    /// Structure interior or open ground.
    pub kind: LocationKind,
    /// Adjacent locations.
    pub neighbors: Vec<LocationId>,
}

// ---------------------------------------------------------------------------
// Settlement simulation state
// ---------------------------------------------------------------------------

/// Per-pulse additive drift applied to a settlement's four scalars.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SettlementBias {
    /// Added to resource stability.
    pub resource: f64,
    /// Added to infrastructure durability.
    pub infrastructure: f64,
    /// Added to morale.
    pub morale: f64,
    /// Added to faction pressure.
    pub pressure: f64,
}

impl SettlementBias {
    /// No drift at all.
    pub const ZERO: Self = Self {
        resource: 0.0,
        infrastructure: 0.0,
        morale: 0.0,
        pressure: 0.0,
    };
}

impl LeaderArchetype {
    /// The fixed bias a leader of this archetype applies every pulse.
    pub const fn bias(self) -> SettlementBias {
        match self {
            Self::Warden => SettlementBias {
                resource: -0.15,
                infrastructure: 0.35,
                morale: -0.05,
                pressure: 0.45,
            },
            Self::Broker => SettlementBias {
                resource: 0.4,
                infrastructure: 0.1,
                morale: 0.2,
                pressure: 0.1,
            },
            Self::Oracle => SettlementBias {
                resource: -0.05,
                infrastructure: -0.1,
                morale: 0.45,
                pressure: 0.25,
            },
        }
    }
}

/// A stochastically emerging settlement leader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergentLeader {
    /// Display name.
    pub name: String,
    /// Archetype, which fixes the bias and voice.
    pub archetype: LeaderArchetype,
    /// Hold on the settlement, 0--100.
    pub influence: f64,
    /// Pulses in office.
    pub tenure: u32,
    /// Drift applied each pulse while in office.
    pub bias: SettlementBias,
}

/// Live numeric state of one settlement. All scalars stay within 8--92.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementState {
    /// How reliably provisions arrive.
    pub resource_stability: f64,
    /// How well walls, pumps and floors hold.
    pub infrastructure_durability: f64,
    /// Collective spirit.
    pub morale: f64,
    /// Factional tension.
    pub faction_pressure: f64,
    /// Current leader, if one has emerged.
    pub leader: Option<EmergentLeader>,
}

impl SettlementState {
    /// Lower bound of every settlement scalar.
    pub const MIN: f64 = 8.0;
    /// Upper bound of every settlement scalar.
    pub const MAX: f64 = 92.0;

    /// A leaderless state with all four scalars at `value`.
    pub const fn uniform(value: f64) -> Self {
        Self {
            resource_stability: value,
            infrastructure_durability: value,
            morale: value,
            faction_pressure: value,
            leader: None,
        }
    }

    /// Clamp the scalars into 8--92 and leader influence into 0--100.
    pub const fn clamp(&mut self) {
        self.resource_stability = self.resource_stability.clamp(Self::MIN, Self::MAX);
        self.infrastructure_durability =
            self.infrastructure_durability.clamp(Self::MIN, Self::MAX);
        self.morale = self.morale.clamp(Self::MIN, Self::MAX);
        self.faction_pressure = self.faction_pressure.clamp(Self::MIN, Self::MAX);
        if let Some(leader) = self.leader.as_mut() {
            leader.influence = leader.influence.clamp(0.0, 100.0);
        }
    }
}

/// World-wide climate shared by every settlement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalState {
    /// Background supply climate, 8--92.
    pub resource_climate: f64,
    /// Background tension climate, 8--92.
    pub pressure_climate: f64,
    /// General decay, 6--95.
    pub entropy: f64,
}

impl Default for GlobalState {
    fn default() -> Self {
        Self {
            resource_climate: 50.0,
            pressure_climate: 50.0,
            entropy: 26.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Narrative cache
// ---------------------------------------------------------------------------

/// First-visit flavor fixed for a location once computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealizedLocation {
    /// Lowercased sensory fragment woven into the first description.
    pub sensory_lead: String,
    /// A landmark phrase used by distant-event lines.
    pub memory_mark: String,
}

impl RealizedLocation {
    /// Flavor used when a location cannot be resolved.
    pub fn fallback() -> Self {
        Self {
            sensory_lead: String::from("The air tastes of old stone."),
            memory_mark: String::from("the dark corner"),
        }
    }
}
