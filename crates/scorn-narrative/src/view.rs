//! Read-only projection handed to the presentation layer.
//!
//! A [`View`] is rebuilt after every command and carries only display
//! strings and counts. It serializes to JSON for the `replay` and `dump`
//! commands and renders to plain text for interactive play.

use std::fmt::Write as _;

use scorn_types::{DeathCause, ItemKind};
use serde::Serialize;

/// Opening line of the pockets listing.
pub const POCKETS_HEADER: &str = "You check what is left in your pockets.";

/// Pockets listing when nothing is held.
pub const POCKETS_EMPTY: &str = "Nothing usable remains.";

/// One held item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemOption {
    /// Which item.
    pub kind: ItemKind,
    /// Display name.
    pub name: String,
    /// Units held, always positive.
    pub count: u32,
}

/// Everything the presentation layer shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    /// Name of the current area.
    pub area_name: String,
    /// Name of the current settlement.
    pub settlement_name: String,
    /// Two-digit passage.
    pub passage_label: String,
    /// Two-digit watch.
    pub watch_label: String,
    /// Banded vitals and legitimacy.
    pub status_header: String,
    /// Current location name.
    pub location_title: String,
    /// Current location description.
    pub location_description: String,
    /// Zero to two condition cues.
    pub condition_cues: Vec<String>,
    /// Result of the last action.
    pub moment_line: String,
    /// Most recent distant event.
    pub distant_line: String,
    /// Whether the run has ended.
    pub is_dead: bool,
    /// How the run ended.
    pub death_cause: Option<DeathCause>,
    /// Held items with positive counts, in canonical order.
    pub items: Vec<ItemOption>,
}

impl View {
    /// Plain-text rendering for a terminal.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} / {}    Passage {}  Watch {}",
            self.area_name, self.settlement_name, self.passage_label, self.watch_label
        );
        let _ = writeln!(out, "{}", self.status_header);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.location_title);
        let _ = writeln!(out, "{}", self.location_description);
        for cue in &self.condition_cues {
            let _ = writeln!(out, "{cue}");
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.moment_line);
        let _ = writeln!(out, "{}", self.distant_line);
        if let Some(cause) = self.death_cause {
            let _ = writeln!(out);
            let _ = writeln!(out, "Dead of {cause}. Type `restart` to begin again.");
        }
        out
    }

    /// The pockets listing: a header, then one line per item or the empty
    /// notice.
    pub fn render_items(&self) -> String {
        let mut out = String::from(POCKETS_HEADER);
        out.push('\n');
        if self.items.is_empty() {
            out.push_str(POCKETS_EMPTY);
            out.push('\n');
        }
        for item in &self.items {
            let _ = writeln!(out, "  {} x{}  (use:{})", item.name, item.count, item.kind.token());
        }
        out
    }
}
