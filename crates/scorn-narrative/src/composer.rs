//! Narrative composition for the player's current location.
//!
//! A [`Scene`] is a read-only snapshot of everything the text depends on.
//! Composition never touches the random stream: every lexical choice goes
//! through [`Scene::pick`], which hashes `(location, salt, visits, drift band,
//! passage)` with the world seed. Re-rendering an unchanged scene therefore
//! yields identical text, while a new passage or drift band deterministically
//! reselects from the same pools.
//!
//! The composer does not decide *when* text is refreshed or whether a distant
//! line is rolled; that sequencing belongs to the game loop.

use scorn_core::settlement::SettlementSimulation;
use scorn_types::{Location, LocationId, LocationKind, RealizedLocation, SettlementState};
use scorn_world::{World, pick_by_hash, stable_hash};
use tracing::warn;

use crate::lexicon;

/// Drift value below which the band is calm.
const CALM_BELOW: i32 = 30;

/// Drift value below which the band is uneasy.
const UNEASY_BELOW: i32 = 58;

/// Leader influence above which the context line names the leader.
const LEADER_VOICE_INFLUENCE: f64 = 24.0;

/// Snapshot of state the composer reads.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    /// World seed.
    pub seed: u64,
    /// The generated world.
    pub world: &'a World,
    /// Live settlement and climate state.
    pub settlements: &'a SettlementSimulation,
    /// Where the player stands.
    pub location_id: LocationId,
    /// Recorded visits to the location, 1 when none are recorded.
    pub visits: u32,
    /// Current wear of the location.
    pub wear: i32,
    /// The player's hidden drift.
    pub hidden_drift: i32,
    /// Current passage.
    pub passage: u32,
}

/// Title and description of the current location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationText {
    /// Location name, or "Unknown".
    pub title: String,
    /// One or two sentences.
    pub description: String,
}

impl<'a> Scene<'a> {
    /// The current location record.
    pub fn location(&self) -> Option<&'a Location> {
        self.world.location(self.location_id)
    }

    /// State of the settlement owning the current location.
    pub fn settlement_state(&self) -> Option<&'a SettlementState> {
        self.location()
            .and_then(|location| self.settlements.state(location.settlement_id))
    }

    /// Coarse danger tone: 0 calm, 1 uneasy, 2 tense.
    #[allow(clippy::cast_possible_truncation)]
    pub fn drift_band(&self) -> u8 {
        let pressure = self
            .settlement_state()
            .map_or(self.hidden_drift, |state| state.faction_pressure as i32);
        match self.hidden_drift.max(pressure) {
            d if d < CALM_BELOW => 0,
            d if d < UNEASY_BELOW => 1,
            _ => 2,
        }
    }

    /// Choose from `pool` by hashing the scene with `salt`. Empty pools
    /// yield an empty string.
    pub fn pick(&self, pool: &[&'static str], salt: u64) -> &'static str {
        let hash = stable_hash(
            self.seed,
            &[
                self.location_id.as_u64(),
                salt,
                u64::from(self.visits.max(1)),
                u64::from(self.drift_band()),
                u64::from(self.passage),
            ],
        );
        pick_by_hash(pool, hash).copied().unwrap_or_default()
    }

    // -------------------------------------------------------------------
    // Realization
    // -------------------------------------------------------------------

    /// Fix the first-visit flavor for the current location.
    ///
    /// The caller caches the result; later calls with a different passage or
    /// band would pick differently.
    pub fn realize(&self) -> RealizedLocation {
        let Some(location) = self.location() else {
            return RealizedLocation::fallback();
        };
        let image = match location.kind {
            LocationKind::Structure(kind) => self.pick(lexicon::structure_sensory(kind), 71),
            LocationKind::Exterior(kind) => self.pick(lexicon::exterior_sensory(kind), 73),
        };
        let marks = self
            .world
            .settlement(location.settlement_id)
            .map_or(&[][..], |s| lexicon::settlement_marks(s.settlement_type));
        RealizedLocation {
            sensory_lead: sensory_lead(image),
            memory_mark: self.pick(marks, 74).to_owned(),
        }
    }

    // -------------------------------------------------------------------
    // Title and description
    // -------------------------------------------------------------------

    /// Title and description, or the fixed fallback pair when the location
    /// cannot be resolved.
    pub fn location_text(&self, realized: &RealizedLocation) -> LocationText {
        let Some(location) = self.location() else {
            warn!(location = %self.location_id, "Current location missing from world");
            return LocationText {
                title: lexicon::UNKNOWN_TITLE.to_owned(),
                description: lexicon::UNKNOWN_DESCRIPTION.to_owned(),
            };
        };
        LocationText {
            title: location.name.clone(),
            description: self.description(location, realized),
        }
    }

    fn description(&self, location: &Location, realized: &RealizedLocation) -> String {
        let band = self.drift_band();
        let first = if self.visits <= 1 {
            self.first_impression(location, realized)
        } else {
            let salt = 6_u64.saturating_add(u64::from(self.visits));
            format!(
                "Back in {}, {}.",
                location.name,
                self.pick(lexicon::RECOGNITION, salt)
            )
        };

        let mut sentences = vec![first];
        if self.visits > 1 || band > 1 || self.wear < 30 {
            sentences.push(self.subtle_shift(band).to_owned());
        }
        if let Some(state) = self.settlements.state(location.settlement_id) {
            sentences.push(settlement_line(state));
        }
        sentences.truncate(2);
        sentences.join(" ")
    }

    fn first_impression(&self, location: &Location, realized: &RealizedLocation) -> String {
        let textures = self
            .world
            .area(location.area_id)
            .map_or(&[][..], |area| lexicon::area_textures(area.area_type));
        let texture = self.pick(textures, 1);
        match location.kind {
            LocationKind::Structure(kind) => {
                let settlement = self
                    .world
                    .settlement(location.settlement_id)
                    .map_or(lexicon::UNKNOWN_TITLE, |s| s.name.as_str());
                format!(
                    "{} is a {} in {settlement}, all {texture} edges and {}.",
                    location.name,
                    self.pick(lexicon::structure_roles(kind), 4),
                    realized.sensory_lead,
                )
            }
            LocationKind::Exterior(kind) => format!(
                "{} is a {} through {texture} stone, where {}.",
                location.name,
                self.pick(lexicon::exterior_roles(kind), 5),
                realized.sensory_lead,
            ),
        }
    }

    fn subtle_shift(&self, band: u8) -> &'static str {
        if self.wear < 20 {
            self.pick(lexicon::SHIFT_FAILING, 30)
        } else if band > 1 {
            self.pick(lexicon::SHIFT_TENSE, 31)
        } else if self.wear < 34 {
            self.pick(lexicon::SHIFT_GRITTY, 31)
        } else {
            self.pick(lexicon::SHIFT_HOLDING, 33)
        }
    }

    // -------------------------------------------------------------------
    // Distant line
    // -------------------------------------------------------------------

    /// A sound from elsewhere in the settlement, anchored on the realized
    /// memory mark and followed by the context line. `None` when the
    /// location cannot be resolved.
    pub fn distant_line(&self, realized: &RealizedLocation) -> Option<String> {
        let location = self.location()?;
        let mood_salt = 42_u64.saturating_add(u64::from(self.passage));
        let mood = self.pick(lexicon::distant_moods(self.drift_band()), mood_salt);
        let places = self
            .world
            .settlement(location.settlement_id)
            .map_or(&[][..], |s| lexicon::settlement_places(s.settlement_type));
        let place = self.pick(places, 43);
        Some(format!(
            "{mood} from {place}, then quiet again near {}. {}",
            realized.memory_mark,
            self.context_line()
        ))
    }

    /// Pressure tone of the current settlement, naming a strong leader.
    /// Empty without settlement state.
    pub fn context_line(&self) -> String {
        let Some(state) = self.settlement_state() else {
            return String::new();
        };
        let tone = if state.faction_pressure < 33.0 {
            "The faction lines feel diffuse tonight."
        } else if state.faction_pressure < 60.0 {
            "Pressure holds at a muttered simmer."
        } else {
            "Faction pressure is climbing, taut and public."
        };
        match &state.leader {
            Some(leader) if leader.influence > LEADER_VOICE_INFLUENCE => format!(
                "{tone} {} pulls local decisions {}.",
                leader.name,
                leader.archetype.voice()
            ),
            _ => tone.to_owned(),
        }
    }

    // -------------------------------------------------------------------
    // Cues
    // -------------------------------------------------------------------

    /// At most one body cue followed by at most one wear cue. Empty when
    /// the location cannot be resolved.
    pub fn condition_cues(&self, vitality: i32, thirst: i32, hunger: i32) -> Vec<String> {
        if self.location().is_none() {
            return Vec::new();
        }
        let body = if vitality < 24 {
            Some(lexicon::CUE_SHAKING)
        } else if thirst > 78 {
            Some(lexicon::CUE_THIRST)
        } else if hunger > 82 {
            Some(lexicon::CUE_HUNGER)
        } else {
            None
        };
        let world = (self.wear < 22).then_some(lexicon::CUE_CRUMBLING);
        [body, world].into_iter().flatten().map(str::to_owned).collect()
    }
}

/// Material and social read of a settlement.
pub fn settlement_line(state: &SettlementState) -> String {
    let material = if state.resource_stability < 30.0 {
        "stores run thin"
    } else if state.resource_stability < 60.0 {
        "supplies move in tight cycles"
    } else {
        "storage lines hold for now"
    };
    let social = if state.morale < 32.0 {
        "faces stay guarded"
    } else if state.morale < 62.0 {
        "people measure each word"
    } else {
        "voices carry a cautious warmth"
    };
    format!("In the settlement, {material} and {social}.")
}

/// Lowercase a sensory sentence and strip its surrounding punctuation.
fn sensory_lead(image: &str) -> String {
    image
        .to_lowercase()
        .trim_matches(|c: char| c.is_ascii_punctuation())
        .to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use scorn_types::{EmergentLeader, LeaderArchetype};
    use scorn_world::{DeterministicRng, WorldGenerator};

    use super::*;

    struct Fixture {
        world: World,
        sim: SettlementSimulation,
    }

    impl Fixture {
        fn new(seed: u64) -> Self {
            let world = WorldGenerator::new(seed).generate();
            let mut rng = DeterministicRng::new(seed);
            let sim = SettlementSimulation::initialize(&world, &mut rng);
            Self { world, sim }
        }

        fn scene(&self, location_id: LocationId) -> Scene<'_> {
            Scene {
                seed: self.world.seed(),
                world: &self.world,
                settlements: &self.sim,
                location_id,
                visits: 1,
                wear: 60,
                hidden_drift: 18,
                passage: 1,
            }
        }
    }

    #[test]
    fn sensory_lead_strips_punctuation_and_case() {
        assert_eq!(
            sensory_lead("Wind threads through it in short, cold pulls."),
            "wind threads through it in short, cold pulls"
        );
        assert_eq!(sensory_lead("\"Echo.\""), "echo");
    }

    #[test]
    fn pick_is_stable_and_in_pool() {
        let fixture = Fixture::new(734_221);
        let scene = fixture.scene(fixture.world.start_location_id());
        let first = scene.pick(lexicon::RECOGNITION, 9);
        assert_eq!(first, scene.pick(lexicon::RECOGNITION, 9));
        assert!(lexicon::RECOGNITION.contains(&first));
        assert_eq!(scene.pick(&[], 9), "");
    }

    #[test]
    fn realize_draws_from_kind_and_settlement_pools() {
        let fixture = Fixture::new(734_221);
        for location in fixture.world.locations() {
            let realized = fixture.scene(location.id).realize();
            let sensory = match location.kind {
                LocationKind::Structure(kind) => lexicon::structure_sensory(kind),
                LocationKind::Exterior(kind) => lexicon::exterior_sensory(kind),
            };
            assert!(sensory.iter().any(|s| sensory_lead(s) == realized.sensory_lead));
            assert!(!realized.sensory_lead.ends_with('.'));
            let settlement = fixture.world.settlement(location.settlement_id).unwrap();
            let marks = lexicon::settlement_marks(settlement.settlement_type);
            assert!(marks.contains(&realized.memory_mark.as_str()));
        }
    }

    #[test]
    fn missing_location_falls_back() {
        let fixture = Fixture::new(5);
        let scene = fixture.scene(LocationId(9_999));
        assert_eq!(scene.realize(), RealizedLocation::fallback());
        let text = scene.location_text(&RealizedLocation::fallback());
        assert_eq!(text.title, "Unknown");
        assert_eq!(text.description, lexicon::UNKNOWN_DESCRIPTION);
        assert!(scene.condition_cues(5, 99, 99).is_empty());
        assert!(scene.distant_line(&RealizedLocation::fallback()).is_none());
        assert_eq!(scene.context_line(), "");
        assert_eq!(scene.drift_band(), 0);
    }

    #[test]
    fn first_visit_pairs_impression_with_settlement_line() {
        let fixture = Fixture::new(734_221);
        let start = fixture.world.start_location_id();
        let scene = fixture.scene(start);
        let realized = scene.realize();
        let text = scene.location_text(&realized);
        let location = fixture.world.location(start).unwrap();
        assert_eq!(text.title, location.name);
        assert!(text.description.starts_with(&format!("{} is a ", location.name)));
        if scene.drift_band() < 2 {
            let state = scene.settlement_state().unwrap();
            assert!(text.description.ends_with(&settlement_line(state)));
        }
    }

    #[test]
    fn revisit_uses_recognition_and_shift() {
        let fixture = Fixture::new(734_221);
        let start = fixture.world.start_location_id();
        let mut scene = fixture.scene(start);
        scene.visits = 3;
        let text = scene.location_text(&scene.realize());
        let name = &fixture.world.location(start).unwrap().name;
        assert!(text.description.starts_with(&format!("Back in {name}, ")));
        assert!(!text.description.contains("In the settlement"));
    }

    #[test]
    fn worn_first_visit_gets_failing_shift() {
        let fixture = Fixture::new(42);
        let mut scene = fixture.scene(fixture.world.start_location_id());
        scene.wear = 10;
        let text = scene.location_text(&scene.realize());
        assert!(lexicon::SHIFT_FAILING.iter().any(|line| text.description.ends_with(line)));
    }

    #[test]
    fn drift_band_follows_the_larger_signal() {
        let fixture = Fixture::new(11);
        let mut scene = fixture.scene(fixture.world.start_location_id());
        scene.hidden_drift = 90;
        assert_eq!(scene.drift_band(), 2);
        scene.hidden_drift = 0;
        let pressure = scene.settlement_state().unwrap().faction_pressure;
        let expected = if pressure < 58.0 { 1 } else { 2 };
        assert_eq!(scene.drift_band(), expected);
    }

    #[test]
    fn cues_order_body_before_wear() {
        let fixture = Fixture::new(3);
        let mut scene = fixture.scene(fixture.world.start_location_id());
        assert!(scene.condition_cues(60, 40, 40).is_empty());
        assert_eq!(scene.condition_cues(60, 90, 95), vec![lexicon::CUE_THIRST]);
        scene.wear = 10;
        assert_eq!(
            scene.condition_cues(10, 90, 95),
            vec![lexicon::CUE_SHAKING, lexicon::CUE_CRUMBLING]
        );
        assert_eq!(
            scene.condition_cues(60, 40, 83),
            vec![lexicon::CUE_HUNGER, lexicon::CUE_CRUMBLING]
        );
    }

    #[test]
    fn distant_line_ends_with_context() {
        let fixture = Fixture::new(734_221);
        let scene = fixture.scene(fixture.world.start_location_id());
        let realized = scene.realize();
        let line = scene.distant_line(&realized).unwrap();
        assert!(line.contains(&format!(", then quiet again near {}. ", realized.memory_mark)));
        assert!(line.ends_with(&scene.context_line()));
    }

    #[test]
    fn settlement_line_ignores_leader() {
        let mut state = SettlementState::uniform(70.0);
        state.leader = Some(EmergentLeader {
            name: String::from("Vey Ledger"),
            archetype: LeaderArchetype::Broker,
            influence: 40.0,
            tenure: 3,
            bias: LeaderArchetype::Broker.bias(),
        });
        assert_eq!(
            settlement_line(&state),
            "In the settlement, storage lines hold for now and voices carry a cautious warmth."
        );
    }

    #[test]
    fn settlement_line_thresholds() {
        let mut state = SettlementState::uniform(10.0);
        assert_eq!(
            settlement_line(&state),
            "In the settlement, stores run thin and faces stay guarded."
        );
        state.resource_stability = 45.0;
        state.morale = 50.0;
        assert_eq!(
            settlement_line(&state),
            "In the settlement, supplies move in tight cycles and people measure each word."
        );
    }

    #[test]
    fn passage_can_reselect_text() {
        let fixture = Fixture::new(734_221);
        let mut scene = fixture.scene(fixture.world.start_location_id());
        let texts: Vec<&str> = (1..=24)
            .map(|passage| {
                scene.passage = passage;
                scene.pick(lexicon::RECOGNITION, 8)
            })
            .collect();
        let first = texts.first().copied().unwrap();
        assert!(texts.iter().any(|t| *t != first));
    }
}
