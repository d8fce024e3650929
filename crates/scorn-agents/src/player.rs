//! The player's mutable state between actions.

use std::collections::BTreeMap;

use scorn_core::clock::GameClock;
use scorn_types::{DeathCause, LocationId, RealizedLocation};
use scorn_world::{World, stable_hash};
use serde::{Deserialize, Serialize};

use crate::config::VitalsConfig;
use crate::inventory::Inventory;
use crate::vitals::Vitals;

/// Wear assumed for a location with no recorded value.
pub const DEFAULT_WEAR: i32 = 50;

/// Salt for a location's starting wear.
const WEAR_SALT: u64 = 99;

/// Moment line of a fresh run.
pub const WAKE_LINE: &str = "You wake cold, with grit between your teeth.";

/// Distant line of a fresh run.
pub const OPENING_DISTANT_LINE: &str = "Somewhere beyond the walls, water keeps time.";

/// Text currently shown to the player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narration {
    /// Current location name.
    pub title: String,
    /// Current location description.
    pub description: String,
    /// Zero to two condition cues.
    pub cues: Vec<String>,
    /// Result of the last action.
    pub moment_line: String,
    /// Most recent distant event.
    pub distant_line: String,
}

/// Everything about the player that changes during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Passage/watch clock.
    pub clock: GameClock,
    /// Where the player stands.
    pub location_id: LocationId,
    /// Visits per location.
    pub visits: BTreeMap<LocationId, u32>,
    /// First-visit flavor, fixed once computed.
    pub realized: BTreeMap<LocationId, RealizedLocation>,
    /// Body scalars.
    pub vitals: Vitals,
    /// Danger scalar tracking the local settlement, 0--100.
    pub hidden_drift: i32,
    /// Reputation, 0--100.
    pub legitimacy: i32,
    /// Held items.
    pub inventory: Inventory,
    /// Durability per location.
    pub wear: BTreeMap<LocationId, i32>,
    /// Set once the player dies; cleared only by a restart.
    pub death: Option<DeathCause>,
    /// Displayed text.
    pub narration: Narration,
}

impl PlayerState {
    /// A fresh player at the start location of `world`.
    pub fn new(world: &World, config: &VitalsConfig) -> Self {
        Self {
            clock: GameClock::new(),
            location_id: world.start_location_id(),
            visits: BTreeMap::new(),
            realized: BTreeMap::new(),
            vitals: Vitals::starting(config),
            hidden_drift: config.starting_hidden_drift,
            legitimacy: config.starting_legitimacy,
            inventory: Inventory::starting(),
            wear: starting_wear(world),
            death: None,
            narration: Narration {
                moment_line: WAKE_LINE.to_owned(),
                distant_line: OPENING_DISTANT_LINE.to_owned(),
                ..Narration::default()
            },
        }
    }

    /// Whether the run has ended.
    pub const fn is_dead(&self) -> bool {
        self.death.is_some()
    }

    /// Recorded visits to `id`, if any.
    pub fn visits_to(&self, id: LocationId) -> Option<u32> {
        self.visits.get(&id).copied()
    }

    /// Wear of `id`, or [`DEFAULT_WEAR`].
    pub fn wear_of(&self, id: LocationId) -> i32 {
        self.wear.get(&id).copied().unwrap_or(DEFAULT_WEAR)
    }

    /// Mutable wear of `id`, inserting [`DEFAULT_WEAR`] when absent.
    pub fn wear_mut(&mut self, id: LocationId) -> &mut i32 {
        self.wear.entry(id).or_insert(DEFAULT_WEAR)
    }

    /// Count one more visit to the current location.
    pub fn record_visit(&mut self) {
        let count = self.visits.entry(self.location_id).or_insert(0);
        *count = count.saturating_add(1);
    }
}

/// `46 + StableHash(seed, [id, 99]) % 30` for every location.
fn starting_wear(world: &World) -> BTreeMap<LocationId, i32> {
    world
        .locations()
        .iter()
        .map(|location| {
            let hash = stable_hash(world.seed(), &[location.id.as_u64(), WEAR_SALT]);
            let spread = i32::try_from(hash.checked_rem(30).unwrap_or(0)).unwrap_or(0);
            (location.id, 46_i32.saturating_add(spread))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use scorn_world::WorldGenerator;

    use super::*;

    #[test]
    fn fresh_player_matches_config() {
        let world = WorldGenerator::new(734_221).generate();
        let player = PlayerState::new(&world, &VitalsConfig::default());
        assert_eq!(player.vitals.vitality, 58);
        assert_eq!(player.vitals.thirst, 40);
        assert_eq!(player.vitals.hunger, 35);
        assert_eq!(player.vitals.attention, 14);
        assert_eq!(player.hidden_drift, 18);
        assert_eq!(player.legitimacy, 40);
        assert_eq!(player.location_id, world.start_location_id());
        assert!(!player.is_dead());
        assert_eq!(player.wear.len(), world.location_count());
        assert!(player.wear.values().all(|w| (46..76).contains(w)));
    }

    #[test]
    fn visits_and_wear_defaults() {
        let world = WorldGenerator::new(1).generate();
        let mut player = PlayerState::new(&world, &VitalsConfig::default());
        let here = player.location_id;
        assert_eq!(player.visits_to(here), None);
        player.record_visit();
        player.record_visit();
        assert_eq!(player.visits_to(here), Some(2));
        assert_eq!(player.wear_of(LocationId(9_999)), DEFAULT_WEAR);
        let wear = player.wear_mut(LocationId(9_999));
        *wear = wear.saturating_sub(3);
        assert_eq!(player.wear_of(LocationId(9_999)), 47);
    }
}
