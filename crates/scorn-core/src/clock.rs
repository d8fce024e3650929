//! Passage and watch tracking.
//!
//! Time in Scorn is counted in watches: six watches make a passage. The
//! clock stores the pair `(passage, watch)`, both 1-based, and advances them
//! with base-6 arithmetic over the running watch count. Every player action
//! that costs time moves the clock by its cost in watches; each watch is also
//! one simulation pulse.

use serde::{Deserialize, Serialize};

/// Number of watches in a single passage.
pub const WATCHES_PER_PASSAGE: u32 = 6;

/// The player's passage/watch clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    /// Current passage, starting at 1.
    passage: u32,
    /// Current watch within the passage, 1--6.
    watch: u32,
}

impl GameClock {
    /// A clock at passage 1, watch 1.
    pub const fn new() -> Self {
        Self {
            passage: 1,
            watch: 1,
        }
    }

    /// Current passage (1-based, unbounded).
    pub const fn passage(&self) -> u32 {
        self.passage
    }

    /// Current watch (1--6).
    pub const fn watch(&self) -> u32 {
        self.watch
    }

    /// Watches elapsed since passage 1, watch 1.
    pub const fn elapsed_watches(&self) -> u64 {
        (self.passage.saturating_sub(1) as u64)
            .saturating_mul(WATCHES_PER_PASSAGE as u64)
            .saturating_add(self.watch.saturating_sub(1) as u64)
    }

    /// Move the clock forward by `watches`.
    pub fn advance(&mut self, watches: u32) {
        let total = self.elapsed_watches().saturating_add(u64::from(watches));
        let per = u64::from(WATCHES_PER_PASSAGE);
        let passage = total.checked_div(per).unwrap_or(0).saturating_add(1);
        let watch = total.checked_rem(per).unwrap_or(0).saturating_add(1);
        self.passage = u32::try_from(passage).unwrap_or(u32::MAX);
        self.watch = u32::try_from(watch).unwrap_or(WATCHES_PER_PASSAGE);
    }

    /// Passage as a two-digit label, e.g. `"03"`.
    pub fn passage_label(&self) -> String {
        format!("{:02}", self.passage)
    }

    /// Watch as a two-digit label, e.g. `"05"`.
    pub fn watch_label(&self) -> String {
        format!("{:02}", self.watch)
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one_one() {
        let clock = GameClock::new();
        assert_eq!((clock.passage(), clock.watch()), (1, 1));
        assert_eq!(clock.elapsed_watches(), 0);
    }

    #[test]
    fn watches_roll_into_passages() {
        let mut clock = GameClock::new();
        clock.advance(5);
        assert_eq!((clock.passage(), clock.watch()), (1, 6));
        clock.advance(1);
        assert_eq!((clock.passage(), clock.watch()), (2, 1));
        clock.advance(14);
        assert_eq!((clock.passage(), clock.watch()), (4, 3));
        assert_eq!(clock.elapsed_watches(), 20);
    }

    #[test]
    fn labels_are_zero_padded() {
        let mut clock = GameClock::new();
        clock.advance(6 * 11 + 2);
        assert_eq!(clock.passage_label(), "12");
        assert_eq!(clock.watch_label(), "03");
    }

    #[test]
    fn zero_advance_is_identity() {
        let mut clock = GameClock::new();
        clock.advance(3);
        let before = clock;
        clock.advance(0);
        assert_eq!(clock, before);
    }
}
