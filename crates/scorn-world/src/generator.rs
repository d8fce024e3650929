//! Seeded world generation.
//!
//! [`WorldGenerator`] turns a single `u64` seed into a complete [`World`]:
//! 2--3 areas, each with 2--3 settlements, each settlement a hub ringed by
//! 2--3 structures (1--2 rooms apiece). Every structure hangs off its own
//! connector; connectors are chained; neighboring hubs in an area are joined
//! by a transit; consecutive areas are joined hub to hub by a bridge.
//!
//! # Determinism
//!
//! The generator owns its own [`DeterministicRng`] seeded from the world seed.
//! Rolls happen in a fixed order: area count, the four pool shuffles, then per
//! area the settlement count, per settlement the structure count, per
//! structure the room count. Names never consume the stream; they are chosen
//! with [`stable_hash`] keyed on `(id, salt, seed & 0xffff)`. Ids are allocated
//! sequentially from 1, one counter per record kind, in construction order.

use std::collections::{BTreeMap, BTreeSet};

use scorn_types::{
    Area, AreaId, AreaType, ExteriorType, Location, LocationId, LocationKind, Room, RoomId,
    Settlement, SettlementId, SettlementType, Structure, StructureId, StructureType,
};
use tracing::debug;

use crate::names;
use crate::rng::{DeterministicRng, Roll, pick_by_hash, stable_hash};
use crate::world::{World, WorldParts};

// ---------------------------------------------------------------------------
// Name salts
// ---------------------------------------------------------------------------

const SALT_AREA: u64 = 11;
const SALT_SETTLEMENT: u64 = 17;
const SALT_STRUCTURE: u64 = 23;
const SALT_ROOM: u64 = 24;
const SALT_HUB_BASE: u64 = 29;
const SALT_HUB_TAIL: u64 = 30;
const SALT_CONNECTOR: u64 = 37;
const SALT_TRANSIT: u64 = 41;
const SALT_BRIDGE: u64 = 43;

/// Builds a [`World`] from a seed.
#[derive(Debug, Clone)]
pub struct WorldGenerator {
    seed: u64,
    rng: DeterministicRng,
}

impl WorldGenerator {
    /// Create a generator whose stream is seeded from `seed`.
    pub const fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: DeterministicRng::new(seed),
        }
    }

    /// Generate the world. Never fails.
    #[allow(clippy::too_many_lines)]
    pub fn generate(mut self) -> World {
        let area_count = self.rng.roll_index(2).saturating_add(2);

        let area_pool = self.shuffled(AreaType::ALL);
        let settlement_pool = self.shuffled(SettlementType::ALL);
        let structure_pool = self.shuffled(StructureType::ALL);
        let exterior_pool = self.shuffled(ExteriorType::ALL);

        let mut build = Assembly::default();
        // (area, hub of its last settlement)
        let mut area_hubs: Vec<(AreaId, LocationId)> = Vec::new();

        for area_index in 0..area_count {
            let area_id = build.alloc_area();
            let area_type = cycle(&area_pool, area_index);
            let area_name = self.semantic_pick(names::area_names(area_type), area_id.as_u64(), SALT_AREA);

            let settlement_count = self.rng.roll_index(2).saturating_add(2);
            let mut settlement_ids = Vec::with_capacity(settlement_count);
            let mut previous: Option<(SettlementId, LocationId)> = None;

            for settlement_index in 0..settlement_count {
                let settlement_id = build.alloc_settlement();
                settlement_ids.push(settlement_id);

                let offset = settlement_index.saturating_add(area_index);
                let settlement_type = cycle(&settlement_pool, offset);
                let settlement_name = self.semantic_pick(
                    names::settlement_names(settlement_type),
                    settlement_id.as_u64() ^ area_id.as_u64().wrapping_shl(8),
                    SALT_SETTLEMENT,
                );

                let mut location_ids = Vec::new();
                let mut structure_ids = Vec::new();

                // Hub
                let hub_id = build.alloc_location();
                let hub_type = cycle(&exterior_pool, offset);
                let hub_name = format!(
                    "{} {}",
                    self.semantic_pick(names::hub_bases(settlement_type), hub_id.as_u64(), SALT_HUB_BASE),
                    self.semantic_pick(names::hub_tails(hub_type), hub_id.as_u64(), SALT_HUB_TAIL),
                );
                build.push_location(Location {
                    id: hub_id,
                    name: hub_name,
                    area_id,
                    settlement_id,
                    kind: LocationKind::Exterior(hub_type),
                    neighbors: Vec::new(),
                });
                location_ids.push(hub_id);

                // Structures, each behind its own connector
                let structure_count = self.rng.roll_index(2).saturating_add(2);
                let mut previous_connector: Option<LocationId> = None;

                for structure_index in 0..structure_count {
                    let anchor_id = build.alloc_location();
                    let structure_type = cycle(&structure_pool, structure_index.saturating_add(offset));
                    let structure_name = self.semantic_pick(
                        names::structure_names(structure_type),
                        anchor_id.as_u64(),
                        SALT_STRUCTURE,
                    );
                    build.push_location(Location {
                        id: anchor_id,
                        name: structure_name.clone(),
                        area_id,
                        settlement_id,
                        kind: LocationKind::Structure(structure_type),
                        neighbors: Vec::new(),
                    });
                    location_ids.push(anchor_id);

                    let structure_id = build.alloc_structure();
                    let room_count = self.rng.roll_index(2).saturating_add(1);
                    let mut room_ids = Vec::with_capacity(room_count);
                    for room_index in 0..room_count {
                        let room_id = build.alloc_room();
                        let index = u64::try_from(room_index).unwrap_or(0);
                        let base = self.semantic_pick(
                            names::room_names(structure_type),
                            room_id.as_u64() ^ index.wrapping_shl(4),
                            SALT_ROOM,
                        );
                        room_ids.push(room_id);
                        build.parts.rooms.push(Room {
                            id: room_id,
                            name: format!("{base} {}", room_index.saturating_add(1)),
                            area_id,
                            settlement_id,
                            structure_id,
                        });
                    }
                    build.parts.structures.push(Structure {
                        id: structure_id,
                        name: structure_name,
                        structure_type,
                        area_id,
                        settlement_id,
                        anchor_location_id: anchor_id,
                        room_ids,
                    });
                    structure_ids.push(structure_id);

                    let connector_id = build.alloc_location();
                    let connector_type = cycle(
                        &exterior_pool,
                        structure_index.saturating_add(area_index).saturating_add(1),
                    );
                    build.push_location(Location {
                        id: connector_id,
                        name: self.semantic_pick(
                            names::connector_names(connector_type),
                            connector_id.as_u64(),
                            SALT_CONNECTOR,
                        ),
                        area_id,
                        settlement_id,
                        kind: LocationKind::Exterior(connector_type),
                        neighbors: Vec::new(),
                    });
                    location_ids.push(connector_id);

                    build.add_edge(hub_id, connector_id);
                    build.add_edge(connector_id, anchor_id);
                    if let Some(prev) = previous_connector {
                        build.add_edge(prev, connector_id);
                    }
                    previous_connector = Some(connector_id);
                }

                // Transit from the previous hub in this area
                if let Some((previous_settlement, previous_hub)) = previous {
                    let transit_id = build.alloc_location();
                    let transit_type = cycle(&exterior_pool, offset.saturating_add(2));
                    build.push_location(Location {
                        id: transit_id,
                        name: self.semantic_pick(
                            names::transit_names(transit_type),
                            transit_id.as_u64(),
                            SALT_TRANSIT,
                        ),
                        area_id,
                        settlement_id,
                        kind: LocationKind::Exterior(transit_type),
                        neighbors: Vec::new(),
                    });
                    location_ids.push(transit_id);

                    build.add_edge(previous_hub, transit_id);
                    build.add_edge(transit_id, hub_id);
                    build.link(previous_settlement, settlement_id);
                }
                previous = Some((settlement_id, hub_id));

                build.parts.settlements.push(Settlement {
                    id: settlement_id,
                    name: settlement_name,
                    settlement_type,
                    area_id,
                    location_ids,
                    structure_ids,
                    hub_location_id: hub_id,
                });
            }

            if let Some((_, hub)) = previous {
                area_hubs.push((area_id, hub));
            }

            build.parts.areas.push(Area {
                id: area_id,
                name: area_name,
                area_type,
                settlement_ids,
            });
        }

        // Bridges between consecutive areas
        let bridge_offset = usize::try_from(self.seed.checked_rem(3).unwrap_or(0)).unwrap_or(0);
        for (idx, pair) in area_hubs.windows(2).enumerate() {
            let [(left_area, left_hub), (_, right_hub)] = pair else {
                continue;
            };

            let bridge_id = build.alloc_location();
            let bridge_type = cycle(&ExteriorType::ALL, idx.saturating_add(bridge_offset));
            let bridge_settlement = build
                .parts
                .areas
                .iter()
                .find(|area| area.id == *left_area)
                .and_then(|area| area.settlement_ids.first().copied())
                .or_else(|| build.parts.settlements.first().map(|s| s.id))
                .unwrap_or(SettlementId::FIRST);

            build.push_location(Location {
                id: bridge_id,
                name: self.semantic_pick(names::bridge_names(bridge_type), bridge_id.as_u64(), SALT_BRIDGE),
                area_id: *left_area,
                settlement_id: bridge_settlement,
                kind: LocationKind::Exterior(bridge_type),
                neighbors: Vec::new(),
            });
            if let Some(owner) = build
                .parts
                .settlements
                .iter_mut()
                .find(|s| s.id == bridge_settlement)
            {
                owner.location_ids.push(bridge_id);
            }

            build.add_edge(*left_hub, bridge_id);
            build.add_edge(bridge_id, *right_hub);
            if let (Some(left), Some(right)) = (
                build.settlement_of(*left_hub),
                build.settlement_of(*right_hub),
            ) {
                build.link(left, right);
            }
        }

        build.parts.start_location_id = build
            .parts
            .settlements
            .first()
            .map(|s| s.hub_location_id)
            .or_else(|| build.parts.locations.first().map(|l| l.id))
            .unwrap_or(LocationId::FIRST);

        build.parts.settlement_links = build
            .links
            .into_iter()
            .map(|(id, set)| (id, set.into_iter().collect()))
            .collect();

        let world = World::from_parts(self.seed, build.parts);
        debug!(
            seed = self.seed,
            areas = world.areas().len(),
            settlements = world.settlements().len(),
            locations = world.location_count(),
            start = %world.start_location_id(),
            "World generated"
        );
        world
    }

    /// Fisher-Yates over a copy of `pool`, walking from the second-to-last
    /// slot down to the first. The last slot is only ever a swap target.
    fn shuffled<T: Copy, const N: usize>(&mut self, mut pool: [T; N]) -> [T; N] {
        for idx in (0..N.saturating_sub(1)).rev() {
            let j = self.rng.roll_index(idx.saturating_add(1));
            pool.swap(idx, j);
        }
        pool
    }

    /// Name a record by hashing its id with a salt.
    fn semantic_pick(&self, pool: &[&str], id: u64, salt: u64) -> String {
        let hash = stable_hash(self.seed, &[id, salt, self.seed & 0xffff]);
        pick_by_hash(pool, hash).map_or_else(|| names::UNNAMED_PLACE.to_owned(), |name| (*name).to_owned())
    }
}

/// `pool[index % pool.len()]`, falling back to the type's default for an
/// empty pool.
fn cycle<T: Copy + Default>(pool: &[T], index: usize) -> T {
    index
        .checked_rem(pool.len())
        .and_then(|idx| pool.get(idx))
        .copied()
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Mutable scratch state while the world is being built.
#[derive(Debug)]
struct Assembly {
    parts: WorldParts,
    positions: BTreeMap<LocationId, usize>,
    links: BTreeMap<SettlementId, BTreeSet<SettlementId>>,
    next_area: AreaId,
    next_settlement: SettlementId,
    next_location: LocationId,
    next_structure: StructureId,
    next_room: RoomId,
}

impl Default for Assembly {
    fn default() -> Self {
        Self {
            parts: WorldParts::default(),
            positions: BTreeMap::new(),
            links: BTreeMap::new(),
            next_area: AreaId::FIRST,
            next_settlement: SettlementId::FIRST,
            next_location: LocationId::FIRST,
            next_structure: StructureId::FIRST,
            next_room: RoomId::FIRST,
        }
    }
}

impl Assembly {
    const fn alloc_area(&mut self) -> AreaId {
        let id = self.next_area;
        self.next_area = id.next();
        id
    }

    const fn alloc_settlement(&mut self) -> SettlementId {
        let id = self.next_settlement;
        self.next_settlement = id.next();
        id
    }

    const fn alloc_location(&mut self) -> LocationId {
        let id = self.next_location;
        self.next_location = id.next();
        id
    }

    const fn alloc_structure(&mut self) -> StructureId {
        let id = self.next_structure;
        self.next_structure = id.next();
        id
    }

    const fn alloc_room(&mut self) -> RoomId {
        let id = self.next_room;
        self.next_room = id.next();
        id
    }

    fn push_location(&mut self, location: Location) {
        self.positions.insert(location.id, self.parts.locations.len());
        self.parts.locations.push(location);
    }

    fn settlement_of(&self, location: LocationId) -> Option<SettlementId> {
        self.positions
            .get(&location)
            .and_then(|&idx| self.parts.locations.get(idx))
            .map(|loc| loc.settlement_id)
    }

    /// Insert `a <-> b`, skipping either direction that already exists.
    fn add_edge(&mut self, a: LocationId, b: LocationId) {
        for (from, to) in [(a, b), (b, a)] {
            let slot = self
                .positions
                .get(&from)
                .and_then(|&idx| self.parts.locations.get_mut(idx));
            if let Some(loc) = slot
                && !loc.neighbors.contains(&to)
            {
                loc.neighbors.push(to);
            }
        }
    }

    fn link(&mut self, a: SettlementId, b: SettlementId) {
        self.links.entry(a).or_default().insert(b);
        self.links.entry(b).or_default().insert(a);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_world() {
        let a = WorldGenerator::new(734_221).generate();
        let b = WorldGenerator::new(734_221).generate();
        assert_eq!(a.digest(), b.digest());
        assert_eq!(a.locations(), b.locations());
    }

    #[test]
    fn counts_stay_in_range() {
        for seed in 0..200_u64 {
            let world = WorldGenerator::new(seed).generate();
            assert!((2..=3).contains(&world.areas().len()), "seed {seed}");
            for area in world.areas() {
                assert!((2..=3).contains(&area.settlement_ids.len()), "seed {seed}");
            }
            for settlement in world.settlements() {
                assert!((2..=3).contains(&settlement.structure_ids.len()), "seed {seed}");
            }
            for structure in world.structures() {
                assert!((1..=2).contains(&structure.room_ids.len()), "seed {seed}");
            }
        }
    }

    #[test]
    fn ids_are_sequential_from_one() {
        let world = WorldGenerator::new(11).generate();
        for (expected, loc) in (1_u32..).zip(world.locations()) {
            assert_eq!(loc.id, LocationId(expected));
        }
        for (expected, settlement) in (1_u32..).zip(world.settlements()) {
            assert_eq!(settlement.id, SettlementId(expected));
        }
    }

    #[test]
    fn start_is_first_hub() {
        let world = WorldGenerator::new(5).generate();
        let first = world.settlements().first().map(|s| s.hub_location_id);
        assert_eq!(Some(world.start_location_id()), first);
        assert_eq!(world.start_location_id(), LocationId(1));
    }

    #[test]
    fn room_names_carry_index_suffix() {
        let world = WorldGenerator::new(3).generate();
        for structure in world.structures() {
            for (n, room_id) in (1_u32..).zip(&structure.room_ids) {
                let room = world.rooms().iter().find(|r| r.id == *room_id);
                assert!(room.is_some_and(|r| r.name.ends_with(&format!(" {n}"))));
            }
        }
    }

    #[test]
    fn structure_shares_name_with_anchor() {
        let world = WorldGenerator::new(8).generate();
        for structure in world.structures() {
            let anchor = world.location(structure.anchor_location_id);
            assert_eq!(anchor.map(|l| l.name.as_str()), Some(structure.name.as_str()));
            assert_eq!(
                anchor.map(|l| l.kind),
                Some(LocationKind::Structure(structure.structure_type))
            );
        }
    }

    #[test]
    fn cycle_wraps_and_defaults() {
        assert_eq!(cycle(&ExteriorType::ALL, 5), ExteriorType::Yard);
        let empty: [ExteriorType; 0] = [];
        assert_eq!(cycle(&empty, 3), ExteriorType::Lane);
    }

    #[test]
    fn shuffle_keeps_every_element() {
        let mut generator = WorldGenerator::new(1234);
        let mut shuffled = generator.shuffled(StructureType::ALL);
        shuffled.sort();
        let mut expected = StructureType::ALL;
        expected.sort();
        assert_eq!(shuffled, expected);
    }
}
