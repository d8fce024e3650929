//! The generated world: an arena of records indexed by id.
//!
//! Locations reference their neighbors by [`LocationId`] rather than by
//! pointer, so the cyclic graph has no ownership cycles. Lookups go through
//! `BTreeMap` indices built once at construction; the record vectors keep
//! generation order, which several consumers (settlement initialization,
//! incidental wear) rely on.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use scorn_types::{
    Area, AreaId, AreaType, ExteriorType, Location, LocationId, LocationKind, Room, RoomId,
    Settlement, SettlementId, SettlementType, Structure, StructureId, StructureType,
};
use serde::Serialize;

use crate::error::{Violation, WorldError};
use crate::rng::stable_hash;

/// The immutable world graph produced by [`crate::WorldGenerator`].
#[derive(Debug, Clone, Serialize)]
pub struct World {
    /// Seed the world was generated from.
    seed: u64,
    /// Areas in generation order.
    areas: Vec<Area>,
    /// Settlements in generation order.
    settlements: Vec<Settlement>,
    /// Structure records in generation order.
    structures: Vec<Structure>,
    /// Rooms in generation order.
    rooms: Vec<Room>,
    /// Traversable locations in generation order.
    locations: Vec<Location>,
    /// Symmetric settlement adjacency, each list sorted ascending.
    settlement_links: BTreeMap<SettlementId, Vec<SettlementId>>,
    /// Where a fresh run begins.
    start_location_id: LocationId,
    /// Location id -> index into `locations`.
    #[serde(skip)]
    location_index: BTreeMap<LocationId, usize>,
    /// Settlement id -> index into `settlements`.
    #[serde(skip)]
    settlement_index: BTreeMap<SettlementId, usize>,
    /// Area id -> index into `areas`.
    #[serde(skip)]
    area_index: BTreeMap<AreaId, usize>,
}

/// The raw records a [`World`] is assembled from.
#[derive(Debug, Clone, Default)]
pub struct WorldParts {
    /// Areas in generation order.
    pub areas: Vec<Area>,
    /// Settlements in generation order.
    pub settlements: Vec<Settlement>,
    /// Structure records in generation order.
    pub structures: Vec<Structure>,
    /// Rooms in generation order.
    pub rooms: Vec<Room>,
    /// Locations in generation order.
    pub locations: Vec<Location>,
    /// Settlement adjacency.
    pub settlement_links: BTreeMap<SettlementId, Vec<SettlementId>>,
    /// Start location.
    pub start_location_id: LocationId,
}

impl World {
    /// Assemble a world from its records and build the lookup indices.
    ///
    /// Settlement link lists are sorted and deduplicated. No validation is
    /// performed; call [`World::validate`] for that.
    pub fn from_parts(seed: u64, parts: WorldParts) -> Self {
        let WorldParts {
            areas,
            settlements,
            structures,
            rooms,
            locations,
            mut settlement_links,
            start_location_id,
        } = parts;

        for links in settlement_links.values_mut() {
            links.sort_unstable();
            links.dedup();
        }

        let location_index = locations
            .iter()
            .enumerate()
            .map(|(idx, loc)| (loc.id, idx))
            .collect();
        let settlement_index = settlements
            .iter()
            .enumerate()
            .map(|(idx, s)| (s.id, idx))
            .collect();
        let area_index = areas
            .iter()
            .enumerate()
            .map(|(idx, a)| (a.id, idx))
            .collect();

        Self {
            seed,
            areas,
            settlements,
            structures,
            rooms,
            locations,
            settlement_links,
            start_location_id,
            location_index,
            settlement_index,
            area_index,
        }
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    /// Seed the world was generated from.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Where a fresh run begins (the first settlement's hub).
    pub const fn start_location_id(&self) -> LocationId {
        self.start_location_id
    }

    /// All areas in generation order.
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    /// All settlements in generation order.
    pub fn settlements(&self) -> &[Settlement] {
        &self.settlements
    }

    /// All structure records in generation order.
    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    /// All rooms in generation order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// All locations in generation order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Number of traversable locations.
    pub const fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Look up a location by id.
    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.location_index
            .get(&id)
            .and_then(|&idx| self.locations.get(idx))
    }

    /// Look up a settlement by id.
    pub fn settlement(&self, id: SettlementId) -> Option<&Settlement> {
        self.settlement_index
            .get(&id)
            .and_then(|&idx| self.settlements.get(idx))
    }

    /// Look up an area by id.
    pub fn area(&self, id: AreaId) -> Option<&Area> {
        self.area_index.get(&id).and_then(|&idx| self.areas.get(idx))
    }

    /// The settlement a location belongs to.
    pub fn settlement_of(&self, location: LocationId) -> Option<&Settlement> {
        self.location(location)
            .and_then(|loc| self.settlement(loc.settlement_id))
    }

    /// The area a location belongs to.
    pub fn area_of(&self, location: LocationId) -> Option<&Area> {
        self.location(location).and_then(|loc| self.area(loc.area_id))
    }

    /// Neighbors of a location, empty when the id is unknown.
    pub fn neighbors(&self, id: LocationId) -> &[LocationId] {
        self.location(id).map_or(&[], |loc| loc.neighbors.as_slice())
    }

    /// Settlements linked to `id` (sorted), empty when it has none.
    pub fn settlement_links(&self, id: SettlementId) -> &[SettlementId] {
        self.settlement_links.get(&id).map_or(&[], Vec::as_slice)
    }

    /// The full settlement adjacency map.
    pub const fn settlement_link_map(&self) -> &BTreeMap<SettlementId, Vec<SettlementId>> {
        &self.settlement_links
    }

    // -------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------

    /// Check every structural invariant and report all violations at once.
    ///
    /// Covered: reference integrity, membership agreement between locations,
    /// settlements and areas, edge and settlement-link symmetry, self-loops,
    /// the start location being a hub, and reachability of every location
    /// from the start.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Validation`] listing every [`Violation`] found.
    pub fn validate(&self) -> Result<(), WorldError> {
        let mut violations = Vec::new();

        if self.locations.is_empty() {
            violations.push(Violation::Empty);
        }
        if self.location_index.len() != self.locations.len() {
            let mut seen = BTreeSet::new();
            for loc in &self.locations {
                if !seen.insert(loc.id) {
                    violations.push(Violation::DuplicateLocation(loc.id));
                }
            }
        }

        self.check_locations(&mut violations);
        self.check_settlements(&mut violations);
        self.check_structures(&mut violations);
        self.check_links(&mut violations);

        let is_hub = self
            .settlements
            .iter()
            .any(|s| s.hub_location_id == self.start_location_id);
        if !is_hub {
            violations.push(Violation::StartNotHub(self.start_location_id));
        }

        let reachable = self.reachable_from(self.start_location_id);
        for loc in &self.locations {
            if !reachable.contains(&loc.id) {
                violations.push(Violation::Unreachable(loc.id));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(WorldError::Validation { violations })
        }
    }

    fn check_locations(&self, violations: &mut Vec<Violation>) {
        for loc in &self.locations {
            let owner = format!("location {}", loc.id);
            if self.area(loc.area_id).is_none() {
                violations.push(Violation::UnknownArea {
                    owner: owner.clone(),
                    area: loc.area_id,
                });
            }
            match self.settlement(loc.settlement_id) {
                None => violations.push(Violation::UnknownSettlement {
                    owner: owner.clone(),
                    settlement: loc.settlement_id,
                }),
                Some(settlement) => {
                    if settlement.area_id != loc.area_id
                        || !settlement.location_ids.contains(&loc.id)
                    {
                        violations.push(Violation::MembershipMismatch {
                            location: loc.id,
                            settlement: loc.settlement_id,
                        });
                    }
                }
            }
            for &neighbor in &loc.neighbors {
                if neighbor == loc.id {
                    violations.push(Violation::SelfLoop(loc.id));
                    continue;
                }
                match self.location(neighbor) {
                    None => violations.push(Violation::UnknownLocation {
                        owner: owner.clone(),
                        location: neighbor,
                    }),
                    Some(other) if !other.neighbors.contains(&loc.id) => {
                        violations.push(Violation::AsymmetricEdge {
                            from: loc.id,
                            to: neighbor,
                        });
                    }
                    Some(_) => {}
                }
            }
        }
    }

    fn check_settlements(&self, violations: &mut Vec<Violation>) {
        for settlement in &self.settlements {
            let owner = format!("settlement {}", settlement.id);
            match self.area(settlement.area_id) {
                None => violations.push(Violation::UnknownArea {
                    owner: owner.clone(),
                    area: settlement.area_id,
                }),
                Some(area) if !area.settlement_ids.contains(&settlement.id) => {
                    violations.push(Violation::AreaMembershipMismatch {
                        settlement: settlement.id,
                        area: settlement.area_id,
                    });
                }
                Some(_) => {}
            }
            if !settlement.location_ids.contains(&settlement.hub_location_id) {
                violations.push(Violation::MembershipMismatch {
                    location: settlement.hub_location_id,
                    settlement: settlement.id,
                });
            }
            for &loc_id in &settlement.location_ids {
                match self.location(loc_id) {
                    None => violations.push(Violation::UnknownLocation {
                        owner: owner.clone(),
                        location: loc_id,
                    }),
                    Some(loc) if loc.settlement_id != settlement.id => {
                        violations.push(Violation::MembershipMismatch {
                            location: loc_id,
                            settlement: settlement.id,
                        });
                    }
                    Some(_) => {}
                }
            }
            for &structure_id in &settlement.structure_ids {
                if self.structure(structure_id).is_none() {
                    violations.push(Violation::UnknownStructure {
                        settlement: settlement.id,
                        structure: structure_id,
                    });
                }
            }
        }
        for area in &self.areas {
            for &settlement_id in &area.settlement_ids {
                if self.settlement(settlement_id).is_none() {
                    violations.push(Violation::UnknownSettlement {
                        owner: format!("area {}", area.id),
                        settlement: settlement_id,
                    });
                }
            }
        }
    }

    fn check_structures(&self, violations: &mut Vec<Violation>) {
        for structure in &self.structures {
            if self.location(structure.anchor_location_id).is_none() {
                violations.push(Violation::UnknownLocation {
                    owner: format!("structure {}", structure.id),
                    location: structure.anchor_location_id,
                });
            }
            for &room_id in &structure.room_ids {
                let points_back = self
                    .room(room_id)
                    .is_some_and(|room| room.structure_id == structure.id);
                if !points_back {
                    violations.push(Violation::RoomMismatch {
                        structure: structure.id,
                        room: room_id,
                    });
                }
            }
        }
    }

    fn check_links(&self, violations: &mut Vec<Violation>) {
        for (&from, links) in &self.settlement_links {
            for &to in links {
                if self.settlement(to).is_none() {
                    violations.push(Violation::UnknownSettlement {
                        owner: format!("settlement link from {from}"),
                        settlement: to,
                    });
                } else if !self.settlement_links(to).contains(&from) {
                    violations.push(Violation::AsymmetricLink { from, to });
                }
            }
        }
    }

    fn structure(&self, id: StructureId) -> Option<&Structure> {
        self.structures.iter().find(|s| s.id == id)
    }

    fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Breadth-first set of locations reachable from `start`.
    pub fn reachable_from(&self, start: LocationId) -> BTreeSet<LocationId> {
        let mut seen = BTreeSet::new();
        if self.location(start).is_none() {
            return seen;
        }
        let mut queue = VecDeque::from([start]);
        seen.insert(start);
        while let Some(current) = queue.pop_front() {
            for &next in self.neighbors(current) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    // -------------------------------------------------------------------
    // Digest
    // -------------------------------------------------------------------

    /// A stable 64-bit fingerprint of the world's structure.
    ///
    /// Folds ids, types, ownership and neighbor order of every record through
    /// [`stable_hash`]. Equal seeds produce equal digests.
    pub fn digest(&self) -> u64 {
        let mut values: Vec<u64> = Vec::new();
        for area in &self.areas {
            values.extend([area.id.as_u64(), area_type_code(area.area_type)]);
            values.extend(area.settlement_ids.iter().map(|id| id.as_u64()));
        }
        for settlement in &self.settlements {
            values.extend([
                settlement.id.as_u64(),
                settlement_type_code(settlement.settlement_type),
                settlement.hub_location_id.as_u64(),
            ]);
            values.extend(settlement.location_ids.iter().map(|id| id.as_u64()));
        }
        for loc in &self.locations {
            values.extend([
                loc.id.as_u64(),
                loc.area_id.as_u64(),
                loc.settlement_id.as_u64(),
                location_kind_code(loc.kind),
            ]);
            values.extend(loc.neighbors.iter().map(|id| id.as_u64()));
        }
        for (from, links) in &self.settlement_links {
            values.push(from.as_u64());
            values.extend(links.iter().map(|id| id.as_u64()));
        }
        values.push(self.start_location_id.as_u64());
        stable_hash(self.seed, &values)
    }
}

/// Position of `item` in `all`, as a hash input.
fn code_of<T: PartialEq>(all: &[T], item: &T) -> u64 {
    all.iter()
        .position(|candidate| candidate == item)
        .and_then(|pos| u64::try_from(pos).ok())
        .unwrap_or(u64::MAX)
}

fn area_type_code(area_type: AreaType) -> u64 {
    code_of(&AreaType::ALL, &area_type)
}

fn settlement_type_code(settlement_type: SettlementType) -> u64 {
    code_of(&SettlementType::ALL, &settlement_type)
}

fn location_kind_code(kind: LocationKind) -> u64 {
    match kind {
        LocationKind::Structure(t) => code_of(&StructureType::ALL, &t),
        LocationKind::Exterior(t) => code_of(&ExteriorType::ALL, &t).saturating_add(16),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn loc(id: u32, neighbors: &[u32]) -> Location {
        Location {
            id: LocationId(id),
            name: format!("L{id}"),
            area_id: AreaId(1),
            settlement_id: SettlementId(1),
            kind: LocationKind::Exterior(ExteriorType::Lane),
            neighbors: neighbors.iter().copied().map(LocationId).collect(),
        }
    }

    fn tiny(locations: Vec<Location>) -> World {
        let ids = locations.iter().map(|l| l.id).collect();
        World::from_parts(
            1,
            WorldParts {
                areas: vec![Area {
                    id: AreaId(1),
                    name: String::from("A"),
                    area_type: AreaType::Floodworks,
                    settlement_ids: vec![SettlementId(1)],
                }],
                settlements: vec![Settlement {
                    id: SettlementId(1),
                    name: String::from("S"),
                    settlement_type: SettlementType::CisternCamp,
                    area_id: AreaId(1),
                    location_ids: ids,
                    structure_ids: Vec::new(),
                    hub_location_id: LocationId(1),
                }],
                structures: Vec::new(),
                rooms: Vec::new(),
                locations,
                settlement_links: BTreeMap::new(),
                start_location_id: LocationId(1),
            },
        )
    }

    #[test]
    fn well_formed_tiny_world_validates() {
        let world = tiny(vec![loc(1, &[2]), loc(2, &[1])]);
        assert!(world.validate().is_ok());
        assert_eq!(world.neighbors(LocationId(1)), &[LocationId(2)]);
        assert!(world.neighbors(LocationId(9)).is_empty());
    }

    #[test]
    fn validation_collects_every_violation() {
        let world = tiny(vec![loc(1, &[2]), loc(2, &[]), loc(3, &[])]);
        let Err(WorldError::Validation { violations }) = world.validate() else {
            panic!("expected validation failure");
        };
        assert!(violations.contains(&Violation::AsymmetricEdge {
            from: LocationId(1),
            to: LocationId(2)
        }));
        assert!(violations.contains(&Violation::Unreachable(LocationId(3))));
    }

    #[test]
    fn self_loop_is_reported() {
        let world = tiny(vec![loc(1, &[1])]);
        let Err(WorldError::Validation { violations }) = world.validate() else {
            panic!("expected validation failure");
        };
        assert_eq!(violations, vec![Violation::SelfLoop(LocationId(1))]);
    }

    #[test]
    fn digest_changes_with_edges() {
        let a = tiny(vec![loc(1, &[2]), loc(2, &[1])]);
        let b = tiny(vec![loc(1, &[]), loc(2, &[])]);
        assert_ne!(a.digest(), b.digest());
    }
}
