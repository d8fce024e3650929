//! Seeded randomness primitives.
//!
//! Two distinct sources of determinism live here and must never be
//! conflated:
//!
//! - [`DeterministicRng`] is a stateful 64-bit linear congruential stream.
//!   Every "roll a chance" decision consumes it, so the order of rolls is part
//!   of the reproducibility contract.
//! - [`stable_hash`] is a pure mixing function of a seed and a value
//!   sequence. Choices derived from it depend only on current state, never on
//!   how many rolls came before.
//!
//! [`DeterministicRng`] implements [`rand::RngCore`] and
//! [`rand::SeedableRng`], so anything written against those traits (and the
//! [`Roll`] extension below) can run on it.

use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

/// Golden-ratio constant used both as the zero-seed substitute and as the
/// stable-hash increment.
const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// LCG multiplier.
const LCG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;

/// LCG increment.
const LCG_INCREMENT: u64 = 1_442_695_040_888_963_407;

/// First avalanche multiplier.
const MIX_A: u64 = 0xbf58_476d_1ce4_e5b9;

/// Second avalanche multiplier.
const MIX_B: u64 = 0x94d0_49bb_1331_11eb;

/// Per-value state offset.
const STATE_OFFSET: u64 = 0x517c_c1b7_2722_0a95;

// ---------------------------------------------------------------------------
// DeterministicRng
// ---------------------------------------------------------------------------

/// A 64-bit linear congruential stream.
///
/// `next = state * A + C` (wrapping), and the new state is the output. A seed
/// of zero is replaced by a fixed non-zero constant so the stream never
/// degenerates. Re-seeding with the same value and replaying the same calls
/// reproduces the same outputs bit for bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    /// Create a stream from a seed.
    pub const fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { GOLDEN_GAMMA } else { seed },
        }
    }

    /// Advance the stream and return the new state.
    pub const fn next_raw(&mut self) -> u64 {
        self.state = LCG_MULTIPLIER
            .wrapping_mul(self.state)
            .wrapping_add(LCG_INCREMENT);
        self.state
    }

    /// Current internal state (useful for diagnostics and tests).
    pub const fn state(&self) -> u64 {
        self.state
    }
}

impl RngCore for DeterministicRng {
    #[allow(clippy::cast_possible_truncation)]
    fn next_u32(&mut self) -> u32 {
        (self.next_raw() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_raw()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        rand::rand_core::impls::fill_bytes_via_next(self, dst);
    }
}

impl SeedableRng for DeterministicRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

// ---------------------------------------------------------------------------
// Roll extension
// ---------------------------------------------------------------------------

/// Bounded integer rolls over any [`RngCore`].
///
/// `roll_below(max)` is exactly `next_u64() % max`, with `0` returned (and no
/// value consumed) when `max` is zero. Replays depend on this exact reduction,
/// modulo bias included.
pub trait Roll {
    /// Uniform-ish integer in `0..max`, or `0` when `max == 0`.
    fn roll_below(&mut self, max: u64) -> u64;

    /// Integer in `0..100`.
    fn percent(&mut self) -> i32;

    /// Integer in `0..max` for small signed bounds. Non-positive bounds yield `0`.
    fn roll_i32(&mut self, max: i32) -> i32;

    /// Integer in `0..max` as a `usize` index.
    fn roll_index(&mut self, max: usize) -> usize;
}

impl<R: RngCore + ?Sized> Roll for R {
    fn roll_below(&mut self, max: u64) -> u64 {
        if max == 0 {
            return 0;
        }
        self.next_u64().checked_rem(max).unwrap_or(0)
    }

    fn percent(&mut self) -> i32 {
        self.roll_i32(100)
    }

    fn roll_i32(&mut self, max: i32) -> i32 {
        let bound = u64::try_from(max).unwrap_or(0);
        i32::try_from(self.roll_below(bound)).unwrap_or(0)
    }

    fn roll_index(&mut self, max: usize) -> usize {
        let bound = u64::try_from(max).unwrap_or(0);
        usize::try_from(self.roll_below(bound)).unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Stable hash
// ---------------------------------------------------------------------------

/// Mix a seed with a sequence of values into a single 64-bit hash.
///
/// Pure: the same inputs always give the same output, and no stream is
/// consumed. Each value passes through a splitmix-style avalanche before being
/// folded into the running state, which is then rotated left by 13 bits.
pub fn stable_hash(seed: u64, values: &[u64]) -> u64 {
    values.iter().fold(seed ^ GOLDEN_GAMMA, |state, &value| {
        let mut z = value.wrapping_add(GOLDEN_GAMMA).wrapping_add(state);
        z = (z ^ (z >> 30)).wrapping_mul(MIX_A);
        z = (z ^ (z >> 27)).wrapping_mul(MIX_B);
        z ^= z >> 31;
        (state ^ z.wrapping_add(STATE_OFFSET)).rotate_left(13)
    })
}

/// Select an element of `pool` by `hash % pool.len()`.
///
/// Returns `None` only for an empty pool.
pub fn pick_by_hash<T>(pool: &[T], hash: u64) -> Option<&T> {
    let len = u64::try_from(pool.len()).ok()?;
    let index = usize::try_from(hash.checked_rem(len)?).ok()?;
    pool.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_is_canonicalized() {
        assert_eq!(DeterministicRng::new(0), DeterministicRng::new(GOLDEN_GAMMA));
        assert_eq!(DeterministicRng::new(0).state(), GOLDEN_GAMMA);
    }

    #[test]
    fn first_output_is_one_lcg_step() {
        let mut rng = DeterministicRng::new(1);
        assert_eq!(
            rng.next_u64(),
            LCG_MULTIPLIER.wrapping_add(LCG_INCREMENT)
        );
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = DeterministicRng::seed_from_u64(734_221);
        let mut b = DeterministicRng::new(734_221);
        for _ in 0..64 {
            assert_eq!(a.roll_below(1000), b.roll_below(1000));
        }
    }

    #[test]
    fn roll_below_zero_consumes_nothing() {
        let mut rng = DeterministicRng::new(99);
        let before = rng.state();
        assert_eq!(rng.roll_below(0), 0);
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn roll_below_matches_modulo_of_next() {
        let mut a = DeterministicRng::new(42);
        let mut b = DeterministicRng::new(42);
        for max in 1..50_u64 {
            assert_eq!(a.roll_below(max), b.next_raw() % max);
        }
    }

    #[test]
    fn percent_stays_in_range() {
        let mut rng = DeterministicRng::new(7);
        for _ in 0..500 {
            let p = rng.percent();
            assert!((0..100).contains(&p));
        }
    }

    #[test]
    fn roll_works_through_dyn_rngcore() {
        let mut rng = DeterministicRng::new(5);
        let dynamic: &mut dyn RngCore = &mut rng;
        assert!(dynamic.roll_below(3) < 3);
    }

    #[test]
    fn stable_hash_is_pure_and_order_sensitive() {
        assert_eq!(stable_hash(9, &[1, 2, 3]), stable_hash(9, &[1, 2, 3]));
        assert_ne!(stable_hash(9, &[1, 2, 3]), stable_hash(9, &[3, 2, 1]));
        assert_ne!(stable_hash(9, &[1]), stable_hash(10, &[1]));
    }

    #[test]
    fn stable_hash_of_nothing_is_seeded_constant() {
        assert_eq!(stable_hash(0, &[]), GOLDEN_GAMMA);
    }

    #[test]
    fn pick_by_hash_handles_empty_pool() {
        let empty: [&str; 0] = [];
        assert_eq!(pick_by_hash(&empty, 17), None);
        assert_eq!(pick_by_hash(&["a", "b"], 3), Some(&"b"));
    }
}
