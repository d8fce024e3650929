//! Body mechanics applied during every time-consuming action.
//!
//! Each tick runs, in order:
//!
//! 1. body drift: thirst and hunger rise with the action's cost, vitality
//!    drains once either crosses its strain threshold, plus a flat 0--1 loss
//! 2. immediate danger: a percent roll against base risk, location wear,
//!    hidden drift and attention, dealing 4--10 damage on a hit
//!
//! Vitals are clamped to 0--100 after each step.

use rand::RngCore;
use scorn_world::Roll;
use serde::{Deserialize, Serialize};

use crate::config::VitalsConfig;

/// Moment lines for an immediate danger hit. The first is chosen on a
/// `percent() < 50` roll.
pub const DANGER_LINES: [&str; 2] = [
    "A hard sound snaps close by; you flinch and hit stone.",
    "Something shifts overhead, and dust rains over your shoulders.",
];

/// The player's four body scalars, each 0--100 once clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    /// Remaining strength. Zero is death.
    pub vitality: i32,
    /// Need for water. 100 is death.
    pub thirst: i32,
    /// Need for food. 100 risks death.
    pub hunger: i32,
    /// How much notice the player has drawn.
    pub attention: i32,
}

impl Vitals {
    /// Starting vitals for a fresh run.
    pub const fn starting(config: &VitalsConfig) -> Self {
        Self {
            vitality: config.starting_vitality,
            thirst: config.starting_thirst,
            hunger: config.starting_hunger,
            attention: config.starting_attention,
        }
    }

    /// Clamp every scalar into 0--100.
    pub fn clamp(&mut self) {
        self.vitality = self.vitality.clamp(0, 100);
        self.thirst = self.thirst.clamp(0, 100);
        self.hunger = self.hunger.clamp(0, 100);
        self.attention = self.attention.clamp(0, 100);
    }
}

/// Raise thirst and hunger for `cost` watches and drain vitality.
///
/// Consumes three rolls: thirst rate, hunger rate, flat vitality loss.
pub fn apply_body_drift<R: RngCore + ?Sized>(
    vitals: &mut Vitals,
    config: &VitalsConfig,
    cost: u32,
    rng: &mut R,
) {
    let cost = i32::try_from(cost).unwrap_or(i32::MAX);
    let thirst_rate = 3_i32.saturating_add(rng.roll_i32(2));
    vitals.thirst = vitals.thirst.saturating_add(cost.saturating_mul(thirst_rate));
    let hunger_rate = 2_i32.saturating_add(rng.roll_i32(2));
    vitals.hunger = vitals.hunger.saturating_add(cost.saturating_mul(hunger_rate));

    if vitals.thirst > config.thirst_strain_threshold {
        let excess = vitals.thirst.saturating_sub(config.thirst_strain_threshold);
        let loss = excess.checked_div(config.thirst_strain_divisor).unwrap_or(0);
        vitals.vitality = vitals.vitality.saturating_sub(loss);
    }
    if vitals.hunger > config.hunger_strain_threshold {
        let excess = vitals.hunger.saturating_sub(config.hunger_strain_threshold);
        let loss = excess.checked_div(config.hunger_strain_divisor).unwrap_or(0);
        vitals.vitality = vitals.vitality.saturating_sub(loss);
    }

    vitals.vitality = vitals.vitality.saturating_sub(rng.roll_i32(2));
    vitals.clamp();
}

/// Percent chance of an immediate danger, never negative.
pub fn danger_chance(base_risk: i32, wear: i32, hidden_drift: i32, attention: i32) -> i32 {
    let wear_penalty = (45_i32.saturating_sub(wear) / 5).max(0);
    base_risk
        .saturating_add(wear_penalty)
        .saturating_add(hidden_drift / 8)
        .saturating_add(attention / 10)
        .max(0)
}

/// Roll for an immediate danger. On a hit, deal 4--10 damage and return the
/// moment line to show.
pub fn apply_immediate_danger<R: RngCore + ?Sized>(
    vitals: &mut Vitals,
    chance: i32,
    rng: &mut R,
) -> Option<&'static str> {
    let hit = rng.percent() < chance;
    let line = if hit {
        let damage = 4_i32.saturating_add(rng.roll_i32(7));
        vitals.vitality = vitals.vitality.saturating_sub(damage);
        let [snap, dust] = DANGER_LINES;
        Some(if rng.percent() < 50 { snap } else { dust })
    } else {
        None
    };
    vitals.clamp();
    line
}

#[cfg(test)]
mod tests {
    use scorn_world::DeterministicRng;

    use super::*;

    #[test]
    fn clamp_bounds_every_scalar() {
        let mut vitals = Vitals {
            vitality: -5,
            thirst: 140,
            hunger: 100,
            attention: -1,
        };
        vitals.clamp();
        assert_eq!(
            vitals,
            Vitals {
                vitality: 0,
                thirst: 100,
                hunger: 100,
                attention: 0,
            }
        );
    }

    #[test]
    fn body_drift_raises_needs_by_cost() {
        let config = VitalsConfig::default();
        let mut rng = DeterministicRng::new(7);
        let mut vitals = Vitals::starting(&config);
        apply_body_drift(&mut vitals, &config, 2, &mut rng);
        assert!((46..=48).contains(&vitals.thirst));
        assert!((39..=41).contains(&vitals.hunger));
        assert!((57..=58).contains(&vitals.vitality));
    }

    #[test]
    fn strain_drains_vitality() {
        let config = VitalsConfig::default();
        let mut rng = DeterministicRng::new(3);
        let mut vitals = Vitals {
            vitality: 50,
            thirst: 90,
            hunger: 90,
            attention: 0,
        };
        apply_body_drift(&mut vitals, &config, 1, &mut rng);
        // thirst strain costs 5, hunger strain 3, then the flat 0--1
        assert!((41..=42).contains(&vitals.vitality));
    }

    #[test]
    fn danger_chance_components() {
        assert_eq!(danger_chance(8, 60, 18, 14), 8 + 2 + 1);
        assert_eq!(danger_chance(8, 45, 0, 0), 8);
        assert_eq!(danger_chance(8, 20, 0, 0), 8 + 5);
        assert_eq!(danger_chance(-50, 60, 0, 0), 0);
    }

    #[test]
    fn zero_chance_never_hits() {
        let mut rng = DeterministicRng::new(11);
        let mut vitals = Vitals::starting(&VitalsConfig::default());
        for _ in 0..100 {
            assert!(apply_immediate_danger(&mut vitals, 0, &mut rng).is_none());
        }
        assert_eq!(vitals.vitality, 58);
    }

    #[test]
    fn certain_danger_always_hurts() {
        let mut rng = DeterministicRng::new(11);
        let mut vitals = Vitals::starting(&VitalsConfig::default());
        let line = apply_immediate_danger(&mut vitals, 100, &mut rng);
        assert!(line.is_some_and(|l| DANGER_LINES.contains(&l)));
        assert!((48..=54).contains(&vitals.vitality));
    }
}
