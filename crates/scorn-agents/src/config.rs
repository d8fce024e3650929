//! Tunables for the player's body and the cost of each action.
//!
//! [`VitalsConfig`] bundles the starting values and the strain thresholds so
//! tests and alternative front ends can override them. The defaults are the
//! canonical game; replays recorded against the defaults only reproduce when
//! the defaults are used.

/// Starting values and strain parameters for the player's body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VitalsConfig {
    /// Vitality at the start of a run (default: 58).
    pub starting_vitality: i32,

    /// Thirst at the start of a run (default: 40).
    pub starting_thirst: i32,

    /// Hunger at the start of a run (default: 35).
    pub starting_hunger: i32,

    /// Attention at the start of a run (default: 14).
    pub starting_attention: i32,

    /// Hidden drift at the start of a run (default: 18).
    pub starting_hidden_drift: i32,

    /// Legitimacy at the start of a run (default: 40).
    pub starting_legitimacy: i32,

    /// Thirst above which vitality starts draining (default: 55).
    pub thirst_strain_threshold: i32,

    /// Excess thirst per point of vitality lost (default: 7).
    pub thirst_strain_divisor: i32,

    /// Hunger above which vitality starts draining (default: 58).
    pub hunger_strain_threshold: i32,

    /// Excess hunger per point of vitality lost (default: 9).
    pub hunger_strain_divisor: i32,

    /// Percent chance that hunger at its cap kills (default: 40).
    pub starvation_chance: i32,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            starting_vitality: 58,
            starting_thirst: 40,
            starting_hunger: 35,
            starting_attention: 14,
            starting_hidden_drift: 18,
            starting_legitimacy: 40,
            thirst_strain_threshold: 55,
            thirst_strain_divisor: 7,
            hunger_strain_threshold: 58,
            hunger_strain_divisor: 9,
            starvation_chance: 40,
        }
    }
}

/// Time and risk charged by an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionCost {
    /// Watches the clock advances; also the number of simulation pulses.
    pub watches: u32,
    /// Base percent chance of an immediate danger.
    pub base_risk: i32,
}

/// Resting in place.
pub const REST_COST: ActionCost = ActionCost { watches: 2, base_risk: 8 };

/// Searching the current location.
pub const SEARCH_COST: ActionCost = ActionCost { watches: 1, base_risk: 10 };

/// Moving to a neighbor.
pub const TRAVEL_COST: ActionCost = ActionCost { watches: 2, base_risk: 11 };

/// Using an item.
pub const USE_COST: ActionCost = ActionCost { watches: 1, base_risk: 4 };
