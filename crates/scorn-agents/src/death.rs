//! Mortality checks run at the end of every action.
//!
//! The checks run in a fixed order after clamping: exhaustion, then
//! dehydration, then starvation. Starvation is not certain; hunger at its
//! cap only kills on a failed percent roll, so the roll is consumed only
//! when the first two checks pass and hunger is capped.

use rand::RngCore;
use scorn_types::DeathCause;
use scorn_world::Roll;

use crate::config::VitalsConfig;
use crate::vitals::Vitals;

/// Clamp `vitals` and decide whether the player dies.
pub fn check_mortality<R: RngCore + ?Sized>(
    vitals: &mut Vitals,
    config: &VitalsConfig,
    rng: &mut R,
) -> Option<DeathCause> {
    vitals.clamp();
    if vitals.vitality <= 0 {
        return Some(DeathCause::Exhaustion);
    }
    if vitals.thirst >= 100 {
        return Some(DeathCause::Dehydration);
    }
    if vitals.hunger >= 100 && rng.percent() < config.starvation_chance {
        return Some(DeathCause::Starvation);
    }
    None
}
