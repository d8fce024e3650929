//! Error types for the `scorn-world` crate.
//!
//! Generation itself never fails. [`WorldError`] is produced only by
//! [`World::validate`](crate::World::validate), which collects every
//! structural [`Violation`] it finds instead of stopping at the first.

use scorn_types::{AreaId, LocationId, RoomId, SettlementId, StructureId};

/// A single structural problem found in a world graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// The world has no locations at all.
    #[error("world has no locations")]
    Empty,

    /// Two records share a location id.
    #[error("duplicate location id {0}")]
    DuplicateLocation(LocationId),

    /// A record references an area that does not exist.
    #[error("{owner} references unknown area {area}")]
    UnknownArea {
        /// Description of the referencing record.
        owner: String,
        /// The missing area.
        area: AreaId,
    },

    /// A record references a settlement that does not exist.
    #[error("{owner} references unknown settlement {settlement}")]
    UnknownSettlement {
        /// Description of the referencing record.
        owner: String,
        /// The missing settlement.
        settlement: SettlementId,
    },

    /// A record references a location that does not exist.
    #[error("{owner} references unknown location {location}")]
    UnknownLocation {
        /// Description of the referencing record.
        owner: String,
        /// The missing location.
        location: LocationId,
    },

    /// A settlement references a structure record that does not exist.
    #[error("settlement {settlement} references unknown structure {structure}")]
    UnknownStructure {
        /// The referencing settlement.
        settlement: SettlementId,
        /// The missing structure.
        structure: StructureId,
    },

    /// A structure references a room that does not exist or belongs elsewhere.
    #[error("structure {structure} lists room {room} that does not point back")]
    RoomMismatch {
        /// The structure.
        structure: StructureId,
        /// The room.
        room: RoomId,
    },

    /// A location lists itself as a neighbor.
    #[error("location {0} is its own neighbor")]
    SelfLoop(LocationId),

    /// `from` lists `to` as a neighbor but not the other way round.
    #[error("edge {from} -> {to} has no reverse")]
    AsymmetricEdge {
        /// Location holding the one-way edge.
        from: LocationId,
        /// Location missing the reverse edge.
        to: LocationId,
    },

    /// `from` links to settlement `to` but not the other way round.
    #[error("settlement link {from} -> {to} has no reverse")]
    AsymmetricLink {
        /// Settlement holding the one-way link.
        from: SettlementId,
        /// Settlement missing the reverse link.
        to: SettlementId,
    },

    /// A location's owner does not list it (or lists a different owner).
    #[error("location {location} is not listed by settlement {settlement}")]
    MembershipMismatch {
        /// The location.
        location: LocationId,
        /// The settlement it claims.
        settlement: SettlementId,
    },

    /// A settlement's area does not list it.
    #[error("settlement {settlement} is not listed by area {area}")]
    AreaMembershipMismatch {
        /// The settlement.
        settlement: SettlementId,
        /// The area it claims.
        area: AreaId,
    },

    /// The start location is not any settlement's hub.
    #[error("start location {0} is not a settlement hub")]
    StartNotHub(LocationId),

    /// A location cannot be reached from the start.
    #[error("location {0} is unreachable from the start")]
    Unreachable(LocationId),
}

/// Errors returned by world-level checks.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The world graph violates one or more structural invariants.
    #[error("world failed validation with {} violation(s)", violations.len())]
    Validation {
        /// Every violation found, in discovery order.
        violations: Vec<Violation>,
    },
}
