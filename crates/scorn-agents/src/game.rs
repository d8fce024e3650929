//! The player state machine.
//!
//! [`Game`] owns one run: the world, the settlement simulation, the player
//! and the single random stream they all draw from. Every operation is
//! synchronous and leaves the derived text up to date before returning.
//!
//! # Tick
//!
//! Each action that costs time funnels through one routine:
//!
//! 1. advance the clock by the action's watches
//! 2. run that many settlement pulses, refresh hidden drift, then decay
//!    `1 + roll(3)` random locations toward their wear floor
//! 3. body drift
//! 4. immediate danger
//!
//! The action's own effects follow, then the narrative refresh, then the
//! mortality check. Once the player is dead every operation except
//! [`Game::restart`] is a no-op.
//!
//! # Reproducibility
//!
//! The same seed and the same ordered [`Command`] list always produce the
//! same state, text and outcome. Background pulses are commands too, so a
//! run with a wall-clock driver can be replayed exactly from its trace.

use scorn_core::settlement::SettlementSimulation;
use scorn_narrative::{Scene, View, lexicon, status_header};
use scorn_types::{Command, ItemKind, LocationId, PlayerAction, RealizedLocation, SettlementId};
use scorn_world::{DeterministicRng, Roll, World, WorldGenerator};
use tracing::{debug, info};

use crate::config::{ActionCost, REST_COST, SEARCH_COST, TRAVEL_COST, USE_COST, VitalsConfig};
use crate::death::check_mortality;
use crate::inventory::{empty_search_line, hazard_line, search_line, weighted_find};
use crate::player::PlayerState;
use crate::vitals::{apply_body_drift, apply_immediate_danger, danger_chance};

/// Lowest wear decay or searching can leave behind.
const WEAR_FLOOR: i32 = 4;

/// Percent chance a narrative refresh rolls a new distant line.
const DISTANT_LINE_CHANCE: i32 = 42;

/// Percent chance a background pulse refreshes the narrative.
const BACKGROUND_REFRESH_CHANCE: i32 = 35;

/// Percent chance scrap becomes a bandage.
const SCRAP_CRAFT_CHANCE: i32 = 38;

const AMBUSH_LINE: &str = "You drift, then wake hard at movement just outside the dark.";
const REST_LINE: &str = "You rest in short breaths. The room stays watchful.";
const DEAD_END_LINE: &str = "The way onward has narrowed to broken stone.";
const INJURY_LINE: &str = "You push through and scrape skin on rough concrete.";
const MOVE_LINE: &str = "You move on before the air can settle behind you.";
const NOTHING_LEFT_LINE: &str = "You reach for it and find nothing left.";
const DRINK_LINE: &str = "You drink slowly, saving the last swallow.";
const EAT_LINE: &str = "You chew in silence until your hands steady.";
const BANDAGE_LINE: &str = "You bind the wound and wait for the sting to fade.";
const CRAFT_LINE: &str = "You shape cloth and scrap into a rough binding.";
const SCRAP_FAIL_LINE: &str = "The scrap twists uselessly in your grip.";
const CLOSE_LINE: &str = "You let your pockets fall still.";

/// One run of the game.
#[derive(Debug, Clone)]
pub struct Game {
    seed: u64,
    config: VitalsConfig,
    rng: DeterministicRng,
    world: World,
    settlements: SettlementSimulation,
    player: PlayerState,
}

impl Game {
    /// Start a run with the default vitals.
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, VitalsConfig::default())
    }

    /// Start a run with custom vitals. A fresh run is identical to a
    /// restart.
    pub fn with_config(seed: u64, config: VitalsConfig) -> Self {
        Self::from_world(seed, WorldGenerator::new(seed).generate(), config)
    }

    /// Start a run on a prebuilt world. A later [`Game::restart`]
    /// regenerates the world from `seed`.
    pub fn from_world(seed: u64, world: World, config: VitalsConfig) -> Self {
        let mut rng = DeterministicRng::new(seed);
        let settlements = SettlementSimulation::initialize(&world, &mut rng);
        let player = PlayerState::new(&world, &config);
        let mut game = Self {
            seed,
            config,
            rng,
            world,
            settlements,
            player,
        };
        game.reset();
        game
    }

    /// Replay `commands` against a fresh run of `seed`.
    pub fn replay(seed: u64, commands: &[Command]) -> Self {
        let mut game = Self::new(seed);
        for &command in commands {
            game.apply(command);
        }
        game
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    /// The run's seed.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// The generated world.
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Settlement and climate state.
    pub const fn settlements(&self) -> &SettlementSimulation {
        &self.settlements
    }

    /// The player.
    pub const fn player(&self) -> &PlayerState {
        &self.player
    }

    /// The shared random stream.
    pub const fn rng(&self) -> &DeterministicRng {
        &self.rng
    }

    /// Whether the run has ended.
    pub const fn is_dead(&self) -> bool {
        self.player.is_dead()
    }

    // -------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------

    /// Dispatch one recorded command.
    pub fn apply(&mut self, command: Command) {
        debug!(%command, dead = self.is_dead(), "Applying command");
        match command {
            Command::Rest => self.rest(),
            Command::Search => self.search(),
            Command::NextRoom => self.next_room(),
            Command::Use(item) => self.use_item(item),
            Command::CloseItems => self.close_items(),
            Command::Restart => self.restart(),
            Command::Pulse => self.background_pulse(),
        }
    }

    /// Start over: re-seed the stream, regenerate the world, reset the
    /// settlements and the player, and enter the start location.
    pub fn restart(&mut self) {
        self.world = WorldGenerator::new(self.seed).generate();
        self.reset();
    }

    /// Re-seed the stream and rebuild the run state on the current world.
    fn reset(&mut self) {
        self.rng = DeterministicRng::new(self.seed);
        self.settlements = SettlementSimulation::initialize(&self.world, &mut self.rng);
        self.player = PlayerState::new(&self.world, &self.config);
        self.enter_current_location();
        info!(
            seed = self.seed,
            start = %self.player.location_id,
            locations = self.world.location_count(),
            "Run started"
        );
    }

    /// Rest for two watches, recovering some vitality at the risk of an
    /// ambush.
    pub fn rest(&mut self) {
        if self.is_dead() {
            return;
        }
        self.tick(REST_COST);
        self.apply_influence(PlayerAction::Rest);

        let vitals = &mut self.player.vitals;
        vitals.vitality = vitals.vitality.saturating_add(10);
        vitals.thirst = vitals.thirst.saturating_add(5);
        vitals.hunger = vitals.hunger.saturating_add(5);

        let ambush = 22_i32.saturating_add(self.player.hidden_drift / 10);
        let line = if self.rng.percent() < ambush {
            vitals.vitality = vitals.vitality.saturating_sub(7);
            AMBUSH_LINE
        } else {
            REST_LINE
        };
        vitals.attention = vitals.attention.saturating_add(2);
        self.set_moment(line);

        self.refresh_narrative();
        self.evaluate_mortality();
    }

    /// Search the current location: a hazard, a find, or nothing. Always
    /// wears the location down a little.
    pub fn search(&mut self) {
        if self.is_dead() {
            return;
        }
        self.tick(SEARCH_COST);

        let here = self.player.location_id;
        let Some(kind) = self.world.location(here).map(|location| location.kind) else {
            return;
        };
        let exterior = kind.is_exterior();
        let drift = self.player.hidden_drift;
        let wear_penalty = (44_i32.saturating_sub(self.player.wear_of(here)) / 4).max(0);
        let hazard = 12_i32.saturating_add(drift / 3).saturating_add(wear_penalty);
        let find = 72_i32.saturating_sub(drift / 2).max(35);

        let roll = self.rng.percent();
        let (action, line) = if roll < hazard {
            let damage = 6_i32.saturating_add(self.rng.roll_i32(6));
            let vitals = &mut self.player.vitals;
            vitals.vitality = vitals.vitality.saturating_sub(damage);
            (PlayerAction::Search { risky: true }, hazard_line(exterior))
        } else if roll < hazard.saturating_add(find) {
            let item = weighted_find(kind, &mut self.rng);
            self.player.inventory.gain(item);
            (PlayerAction::Search { risky: false }, search_line(item, exterior))
        } else {
            (PlayerAction::Search { risky: true }, empty_search_line(exterior))
        };
        self.apply_influence(action);
        self.set_moment(line);

        let nudge = self.rng.roll_i32(3);
        let wear = self.player.wear_mut(here);
        *wear = wear.saturating_sub(nudge).max(WEAR_FLOOR);

        self.refresh_narrative();
        self.evaluate_mortality();
    }

    /// Move to a neighbor, favoring rarely visited ones. A dead end only
    /// changes the moment line.
    pub fn next_room(&mut self) {
        if self.is_dead() {
            return;
        }
        let Some(current) = self.world.location(self.player.location_id) else {
            return;
        };
        if current.neighbors.is_empty() {
            self.set_moment(DEAD_END_LINE);
            self.refresh_narrative();
            return;
        }
        let neighbors = current.neighbors.clone();

        self.tick(TRAVEL_COST);
        self.apply_influence(PlayerAction::Travel);

        let from = self.player.location_id;
        self.player.location_id = self.choose_neighbor(&neighbors);
        debug!(from = %from, to = %self.player.location_id, "Moved");
        self.enter_current_location();

        let injury = 19_i32.saturating_add(self.player.hidden_drift / 12);
        let line = if self.rng.percent() < injury {
            let vitals = &mut self.player.vitals;
            vitals.vitality = vitals.vitality.saturating_sub(5);
            INJURY_LINE
        } else {
            MOVE_LINE
        };
        self.set_moment(line);

        self.refresh_narrative();
        self.evaluate_mortality();
    }

    /// Use one unit of `item`. Without one, only the moment line changes.
    pub fn use_item(&mut self, item: ItemKind) {
        if self.is_dead() {
            return;
        }
        if !self.player.inventory.consume(item) {
            self.set_moment(NOTHING_LEFT_LINE);
            return;
        }

        self.tick(USE_COST);
        self.apply_influence(PlayerAction::Use(item));

        let vitals = &mut self.player.vitals;
        let line = match item {
            ItemKind::Water => {
                vitals.thirst = vitals.thirst.saturating_sub(22);
                DRINK_LINE
            }
            ItemKind::Ration => {
                vitals.hunger = vitals.hunger.saturating_sub(19);
                EAT_LINE
            }
            ItemKind::Bandage => {
                vitals.vitality = vitals.vitality.saturating_add(14);
                BANDAGE_LINE
            }
            ItemKind::Scrap => {
                if self.rng.percent() < SCRAP_CRAFT_CHANCE {
                    self.player.inventory.gain(ItemKind::Bandage);
                    CRAFT_LINE
                } else {
                    SCRAP_FAIL_LINE
                }
            }
        };
        self.set_moment(line);

        self.refresh_narrative();
        self.evaluate_mortality();
    }

    /// Put the inventory away.
    pub fn close_items(&mut self) {
        if self.is_dead() {
            return;
        }
        self.set_moment(CLOSE_LINE);
    }

    /// One pulse from the background driver. Skipped while dead.
    pub fn background_pulse(&mut self) {
        if self.is_dead() {
            return;
        }
        self.run_pulses(1);
        if self.rng.percent() < BACKGROUND_REFRESH_CHANCE {
            self.refresh_narrative();
        }
    }

    // -------------------------------------------------------------------
    // Projection
    // -------------------------------------------------------------------

    /// Read-only projection of the current state.
    pub fn view(&self) -> View {
        let here = self.player.location_id;
        let vitals = &self.player.vitals;
        let narration = &self.player.narration;
        View {
            area_name: self
                .world
                .area_of(here)
                .map_or_else(|| lexicon::UNKNOWN_TITLE.to_owned(), |area| area.name.clone()),
            settlement_name: self
                .world
                .settlement_of(here)
                .map_or_else(|| lexicon::UNKNOWN_TITLE.to_owned(), |s| s.name.clone()),
            passage_label: self.player.clock.passage_label(),
            watch_label: self.player.clock.watch_label(),
            status_header: status_header(
                vitals.vitality,
                vitals.hunger,
                vitals.thirst,
                self.player.legitimacy,
            ),
            location_title: narration.title.clone(),
            location_description: narration.description.clone(),
            condition_cues: narration.cues.clone(),
            moment_line: narration.moment_line.clone(),
            distant_line: narration.distant_line.clone(),
            is_dead: self.player.is_dead(),
            death_cause: self.player.death,
            items: self.player.inventory.options(),
        }
    }

    // -------------------------------------------------------------------
    // Tick
    // -------------------------------------------------------------------

    fn tick(&mut self, cost: ActionCost) {
        self.player.clock.advance(cost.watches);
        self.world_drift(cost.watches);
        apply_body_drift(&mut self.player.vitals, &self.config, cost.watches, &mut self.rng);

        let chance = danger_chance(
            cost.base_risk,
            self.player.wear_of(self.player.location_id),
            self.player.hidden_drift,
            self.player.vitals.attention,
        );
        if let Some(line) = apply_immediate_danger(&mut self.player.vitals, chance, &mut self.rng)
        {
            self.set_moment(line);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn world_drift(&mut self, watches: u32) {
        self.run_pulses(watches);

        let passes = 1_u64.saturating_add(self.rng.roll_below(3));
        for _ in 0..passes {
            let index = self.rng.roll_index(self.world.location_count());
            let Some(location) = self.world.locations().get(index) else {
                continue;
            };
            let id = location.id;
            let floor = (self.settlements.wear_floor(Some(location.settlement_id)) as i32)
                .max(WEAR_FLOOR);
            let decay = self.rng.roll_i32(3);
            let wear = self.player.wear_mut(id);
            *wear = wear.saturating_sub(decay).max(floor);
        }
    }

    fn run_pulses(&mut self, pulses: u32) {
        if self.settlements.run_pulses(&self.world, &mut self.rng, pulses) {
            let current = self.current_settlement_id();
            self.player.hidden_drift = self.settlements.hidden_drift(current, self.player.hidden_drift);
        }
    }

    fn apply_influence(&mut self, action: PlayerAction) {
        let settlement = self.current_settlement_id();
        self.player.legitimacy =
            self.settlements
                .apply_influence(settlement, action, self.player.legitimacy);
    }

    fn evaluate_mortality(&mut self) {
        if let Some(cause) = check_mortality(&mut self.player.vitals, &self.config, &mut self.rng) {
            self.player.death = Some(cause);
            self.set_moment(cause.message());
            info!(
                cause = %cause,
                passage = self.player.clock.passage(),
                watch = self.player.clock.watch(),
                location = %self.player.location_id,
                "Player died"
            );
        }
    }

    /// Weighted pick favoring neighbors with fewer than five visits.
    fn choose_neighbor(&mut self, neighbors: &[LocationId]) -> LocationId {
        let weighted: Vec<(LocationId, u64)> = neighbors
            .iter()
            .map(|&id| {
                let visits = self.player.visits_to(id).unwrap_or(0);
                (id, u64::from(5_u32.saturating_sub(visits).max(1)))
            })
            .collect();
        let total = weighted.iter().fold(0_u64, |sum, (_, w)| sum.saturating_add(*w));
        let mut roll = self.rng.roll_below(total);
        for (id, weight) in &weighted {
            if roll < *weight {
                return *id;
            }
            roll = roll.saturating_sub(*weight);
        }
        neighbors.first().copied().unwrap_or(self.player.location_id)
    }

    // -------------------------------------------------------------------
    // Narrative
    // -------------------------------------------------------------------

    fn enter_current_location(&mut self) {
        self.player.record_visit();
        self.realize_current();
        self.refresh_narrative();
    }

    fn realize_current(&mut self) -> RealizedLocation {
        let id = self.player.location_id;
        if let Some(realized) = self.player.realized.get(&id) {
            return realized.clone();
        }
        let realized = scene_for(self.seed, &self.world, &self.settlements, &self.player).realize();
        self.player.realized.insert(id, realized.clone());
        realized
    }

    fn refresh_narrative(&mut self) {
        if self.world.location(self.player.location_id).is_none() {
            let narration = &mut self.player.narration;
            narration.title = lexicon::UNKNOWN_TITLE.to_owned();
            narration.description = lexicon::UNKNOWN_DESCRIPTION.to_owned();
            return;
        }

        let realized = self.realize_current();
        let scene = scene_for(self.seed, &self.world, &self.settlements, &self.player);
        let text = scene.location_text(&realized);
        let distant = if self.rng.percent() < DISTANT_LINE_CHANCE {
            scene.distant_line(&realized)
        } else {
            None
        };
        let vitals = self.player.vitals;
        let cues = scene.condition_cues(vitals.vitality, vitals.thirst, vitals.hunger);

        let narration = &mut self.player.narration;
        narration.title = text.title;
        narration.description = text.description;
        if let Some(line) = distant {
            narration.distant_line = line;
        }
        narration.cues = cues;
    }

    fn set_moment(&mut self, line: &str) {
        line.clone_into(&mut self.player.narration.moment_line);
    }

    fn current_settlement_id(&self) -> Option<SettlementId> {
        self.world
            .location(self.player.location_id)
            .map(|location| location.settlement_id)
    }
}

/// Snapshot the composer inputs for the player's current location.
fn scene_for<'a>(
    seed: u64,
    world: &'a World,
    settlements: &'a SettlementSimulation,
    player: &PlayerState,
) -> Scene<'a> {
    let here = player.location_id;
    Scene {
        seed,
        world,
        settlements,
        location_id: here,
        visits: player.visits_to(here).unwrap_or(1),
        wear: player.wear_of(here),
        hidden_drift: player.hidden_drift,
        passage: player.clock.passage(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use scorn_types::{
        Area, AreaId, AreaType, ExteriorType, Location, LocationKind, Settlement, SettlementType,
    };
    use scorn_world::WorldParts;

    use super::*;

    /// A world of one settlement holding a single location with no exits.
    fn sealed_world() -> World {
        World::from_parts(
            3,
            WorldParts {
                areas: vec![Area {
                    id: AreaId(1),
                    name: String::from("Sump"),
                    area_type: AreaType::Floodworks,
                    settlement_ids: vec![SettlementId(1)],
                }],
                settlements: vec![Settlement {
                    id: SettlementId(1),
                    name: String::from("Last Cistern"),
                    settlement_type: SettlementType::CisternCamp,
                    area_id: AreaId(1),
                    location_ids: vec![LocationId(1)],
                    structure_ids: Vec::new(),
                    hub_location_id: LocationId(1),
                }],
                locations: vec![Location {
                    id: LocationId(1),
                    name: String::from("Collapsed Lane"),
                    area_id: AreaId(1),
                    settlement_id: SettlementId(1),
                    kind: LocationKind::Exterior(ExteriorType::Lane),
                    neighbors: Vec::new(),
                }],
                start_location_id: LocationId(1),
                ..WorldParts::default()
            },
        )
    }

    /// A run with the body worn enough that item effects stay in range.
    fn worn(seed: u64) -> Game {
        let mut game = Game::new(seed);
        game.player.vitals.vitality = 50;
        game.player.vitals.thirst = 60;
        game.player.vitals.hunger = 60;
        game
    }

    /// The run as `use_item` leaves it just before the item itself acts.
    fn before_effect(game: &Game, item: ItemKind) -> Game {
        let mut expected = game.clone();
        assert!(expected.player.inventory.consume(item));
        expected.tick(USE_COST);
        expected.apply_influence(PlayerAction::Use(item));
        expected
    }

    #[test]
    fn fresh_run_enters_the_start_hub() {
        let game = Game::new(734_221);
        let player = game.player();
        assert_eq!(player.location_id, game.world().start_location_id());
        assert_eq!(player.visits_to(player.location_id), Some(1));
        assert!(player.realized.contains_key(&player.location_id));
        assert_eq!(player.narration.moment_line, crate::player::WAKE_LINE);
        assert!(!player.narration.title.is_empty());
        assert_eq!(game.settlements().tick(), 0);
    }

    #[test]
    fn close_items_only_changes_the_moment() {
        let mut game = Game::new(9);
        let before = game.player().clone();
        let rng_before = *game.rng();
        game.close_items();
        assert_eq!(game.player().narration.moment_line, CLOSE_LINE);
        assert_eq!(game.player().vitals, before.vitals);
        assert_eq!(game.player().clock, before.clock);
        assert_eq!(*game.rng(), rng_before);
    }

    #[test]
    fn rest_advances_two_watches() {
        let mut game = Game::new(21);
        game.rest();
        assert_eq!(game.player().clock.watch(), 3);
        assert_eq!(game.settlements().tick(), 2);
    }

    #[test]
    fn moving_records_a_visit_elsewhere() {
        let mut game = Game::new(734_221);
        let start = game.player().location_id;
        game.next_room();
        let here = game.player().location_id;
        assert_ne!(here, start);
        assert!(game.world().neighbors(start).contains(&here));
        assert_eq!(game.player().visits_to(here), Some(1));
        assert_eq!(game.player().clock.watch(), 3);
    }

    #[test]
    fn search_never_drops_wear_below_floor() {
        let mut game = Game::new(77);
        for _ in 0..40 {
            if game.is_dead() {
                break;
            }
            game.search();
        }
        assert!(game.player().wear.values().all(|w| *w >= WEAR_FLOOR));
    }

    #[test]
    fn choose_neighbor_stays_among_neighbors() {
        let mut game = Game::new(5);
        let start = game.player().location_id;
        let neighbors = game.world().neighbors(start).to_vec();
        for _ in 0..50 {
            let pick = game.choose_neighbor(&neighbors);
            assert!(neighbors.contains(&pick));
        }
    }

    #[test]
    fn water_ration_and_bandage_apply_their_effects() {
        for seed in [3_u64, 41, 734_221] {
            let mut game = worn(seed);
            let expected = before_effect(&game, ItemKind::Water);
            game.use_item(ItemKind::Water);
            let vitals = game.player.vitals;
            assert_eq!(vitals.thirst, expected.player.vitals.thirst.saturating_sub(22));
            assert_eq!(vitals.hunger, expected.player.vitals.hunger);
            assert_eq!(vitals.vitality, expected.player.vitals.vitality);
            assert_eq!(game.player.narration.moment_line, DRINK_LINE);
            assert_eq!(game.player.inventory.count(ItemKind::Water), 0);

            let mut game = worn(seed);
            let expected = before_effect(&game, ItemKind::Ration);
            game.use_item(ItemKind::Ration);
            let vitals = game.player.vitals;
            assert_eq!(vitals.hunger, expected.player.vitals.hunger.saturating_sub(19));
            assert_eq!(vitals.thirst, expected.player.vitals.thirst);
            assert_eq!(game.player.narration.moment_line, EAT_LINE);

            let mut game = worn(seed);
            game.player.inventory.gain(ItemKind::Bandage);
            let expected = before_effect(&game, ItemKind::Bandage);
            game.use_item(ItemKind::Bandage);
            let vitals = game.player.vitals;
            assert_eq!(vitals.vitality, expected.player.vitals.vitality.saturating_add(14));
            assert_eq!(vitals.thirst, expected.player.vitals.thirst);
            assert_eq!(game.player.narration.moment_line, BANDAGE_LINE);
            assert_eq!(game.player.inventory.count(ItemKind::Bandage), 0);
        }
    }

    #[test]
    fn scrap_sometimes_becomes_a_bandage() {
        let mut crafted = 0_u32;
        let mut failed = 0_u32;
        for seed in 0..120_u64 {
            let mut game = Game::new(seed);
            let mut craft_roll = *before_effect(&game, ItemKind::Scrap).rng();
            let expect_craft = craft_roll.percent() < SCRAP_CRAFT_CHANCE;

            game.use_item(ItemKind::Scrap);
            let inventory = &game.player.inventory;
            assert_eq!(inventory.count(ItemKind::Scrap), 0);
            if expect_craft {
                crafted = crafted.saturating_add(1);
                assert_eq!(inventory.count(ItemKind::Bandage), 1);
                assert_eq!(game.player.narration.moment_line, CRAFT_LINE);
            } else {
                failed = failed.saturating_add(1);
                assert_eq!(inventory.count(ItemKind::Bandage), 0);
                assert_eq!(game.player.narration.moment_line, SCRAP_FAIL_LINE);
            }
        }
        assert!(crafted > 15, "crafted {crafted}");
        assert!(failed > 40, "failed {failed}");
    }

    #[test]
    fn actions_move_legitimacy_through_the_settlement() {
        let start = VitalsConfig::default().starting_legitimacy;
        let mut game = Game::new(734_221);

        game.use_item(ItemKind::Water);
        assert_eq!(game.player.legitimacy, start - 1);
        game.use_item(ItemKind::Scrap);
        assert_eq!(game.player.legitimacy, start);
        game.use_item(ItemKind::Ration);
        assert_eq!(game.player.legitimacy, start - 1);

        // Nothing left to use: no influence.
        game.use_item(ItemKind::Water);
        assert_eq!(game.player.narration.moment_line, NOTHING_LEFT_LINE);
        assert_eq!(game.player.legitimacy, start - 1);

        game.next_room();
        assert_eq!(game.player.legitimacy, start - 1);

        game.rest();
        assert!(!game.is_dead());
        let here = game.current_settlement_id().unwrap();
        let pressure = game.settlements().state(here).unwrap().faction_pressure;
        assert_eq!(game.player.legitimacy, start - 1 + i32::from(pressure > 58.0));
    }

    #[test]
    fn dead_end_only_changes_the_moment() {
        let mut game = Game::from_world(3, sealed_world(), VitalsConfig::default());
        assert_eq!(game.player().location_id, LocationId(1));
        let vitals = game.player().vitals;

        game.next_room();
        let player = game.player();
        assert_eq!(player.narration.moment_line, DEAD_END_LINE);
        assert_eq!(player.location_id, LocationId(1));
        assert_eq!(player.clock.watch(), 1);
        assert_eq!(player.vitals, vitals);
        assert_eq!(player.visits_to(LocationId(1)), Some(1));
        assert_eq!(game.settlements().tick(), 0);
    }

    #[test]
    fn restart_after_a_prebuilt_world_regenerates_it() {
        let mut game = Game::from_world(3, sealed_world(), VitalsConfig::default());
        assert_eq!(game.world().location_count(), 1);
        game.restart();
        assert_eq!(game.world().digest(), Game::new(3).world().digest());
        assert_eq!(game.player(), Game::new(3).player());
    }
}
