//! Enumeration types for the Scorn world and survival simulation.
//!
//! The four "type" enumerations ([`AreaType`], [`SettlementType`],
//! [`StructureType`], [`ExteriorType`]) each expose an `ALL` array in
//! declaration order. The world generator shuffles copies of these arrays,
//! so their order is part of the determinism contract and must not change.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// World classification
// ---------------------------------------------------------------------------

/// The terrain theme of an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AreaType {
    /// Flooded waterworks and sluices.
    #[default]
    Floodworks,
    /// Cut stone and chalk dust.
    QuarryBelt,
    /// Burnt shelves of ash and cinder.
    AshTerrace,
}

impl AreaType {
    /// Every area type in canonical order.
    pub const ALL: [Self; 3] = [Self::Floodworks, Self::QuarryBelt, Self::AshTerrace];
}

/// The social character of a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SettlementType {
    /// Salvagers and traders of scrap.
    #[default]
    ScavengerWard,
    /// A camp gathered around stored water.
    CisternCamp,
    /// Candles, vows and quiet stone.
    ShrineQuarter,
}

impl SettlementType {
    /// Every settlement type in canonical order.
    pub const ALL: [Self; 3] = [Self::ScavengerWard, Self::CisternCamp, Self::ShrineQuarter];
}

/// The function of an enterable structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StructureType {
    /// Pumps, valves and sumps.
    #[default]
    PumpWorks,
    /// Provision storage.
    StoreRoom,
    /// Shared sleeping quarters.
    Barracks,
    /// Benches and tools.
    Workshop,
    /// A small place of ritual.
    Chapel,
}

impl StructureType {
    /// Every structure type in canonical order.
    pub const ALL: [Self; 5] = [
        Self::PumpWorks,
        Self::StoreRoom,
        Self::Barracks,
        Self::Workshop,
        Self::Chapel,
    ];
}

/// The shape of an open-air location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExteriorType {
    /// A narrow way between walls.
    #[default]
    Lane,
    /// An open court.
    Yard,
    /// A raised walkway.
    Catwalk,
    /// Steps cut into stone.
    Stair,
}

impl ExteriorType {
    /// Every exterior type in canonical order.
    pub const ALL: [Self; 4] = [Self::Lane, Self::Yard, Self::Catwalk, Self::Stair];
}

/// What kind of place a location is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocationKind {
    /// The inside of a structure.
    Structure(StructureType),
    /// Open ground.
    Exterior(ExteriorType),
}

impl LocationKind {
    /// Whether this location is open ground.
    pub const fn is_exterior(self) -> bool {
        matches!(self, Self::Exterior(_))
    }
}

// ---------------------------------------------------------------------------
// Player items
// ---------------------------------------------------------------------------

/// A carryable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    /// Drinking water. Relieves thirst.
    Water,
    /// Preserved food. Relieves hunger.
    Ration,
    /// Cloth binding. Restores vitality.
    Bandage,
    /// Bent metal. Sometimes becomes a bandage.
    Scrap,
}

impl ItemKind {
    /// Every item kind in display order.
    pub const ALL: [Self; 4] = [Self::Water, Self::Ration, Self::Bandage, Self::Scrap];

    /// Capitalized display name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Water => "Water",
            Self::Ration => "Ration",
            Self::Bandage => "Bandage",
            Self::Scrap => "Scrap",
        }
    }

    /// Lowercase token used in command traces.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Ration => "ration",
            Self::Bandage => "bandage",
            Self::Scrap => "scrap",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ItemKind {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|item| item.token().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CommandParseError::UnknownItem {
                token: s.trim().to_owned(),
            })
    }
}

// ---------------------------------------------------------------------------
// Leaders
// ---------------------------------------------------------------------------

/// The archetype of an emergent settlement leader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LeaderArchetype {
    /// Rules by enforcement. Builds infrastructure, raises pressure.
    Warden,
    /// Rules by bargains. Feeds resources and morale.
    Broker,
    /// Rules by ritual. Lifts morale at the cost of calm.
    Oracle,
}

impl LeaderArchetype {
    /// Archetypes in the order a uniform roll selects them.
    pub const ALL: [Self; 3] = [Self::Warden, Self::Broker, Self::Oracle];

    /// How this archetype's leader exerts influence, as a trailing phrase.
    pub const fn voice(self) -> &'static str {
        match self {
            Self::Warden => "through enforcement",
            Self::Broker => "through trade bargains",
            Self::Oracle => "through ritual authority",
        }
    }
}

// ---------------------------------------------------------------------------
// Mortality
// ---------------------------------------------------------------------------

/// Why the player died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeathCause {
    /// Vitality reached zero.
    Exhaustion,
    /// Thirst reached its cap.
    Dehydration,
    /// Hunger at its cap, and the coin fell badly.
    Starvation,
}

impl DeathCause {
    /// The final line shown when this death occurs.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Exhaustion => "You sink to the floor and cannot rise again.",
            Self::Dehydration => "Your lips split, your vision narrows, and the dark wins.",
            Self::Starvation => "Your knees give way, and the cold takes the rest.",
        }
    }
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhaustion => write!(f, "exhaustion"),
            Self::Dehydration => write!(f, "dehydration"),
            Self::Starvation => write!(f, "starvation"),
        }
    }
}

// ---------------------------------------------------------------------------
// Player influence on settlements
// ---------------------------------------------------------------------------

/// A player activity that nudges the local settlement and legitimacy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayerAction {
    /// Resting in place.
    Rest,
    /// Moving to another location.
    Travel,
    /// Searching the current location.
    Search {
        /// Whether the search was hazardous or fruitless.
        risky: bool,
    },
    /// Consuming an item.
    Use(ItemKind),
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Errors produced while parsing a textual command trace.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandParseError {
    /// The verb is not one of the known commands.
    #[error("unknown command: {token}")]
    UnknownCommand {
        /// The offending token.
        token: String,
    },

    /// The item named after `use:` does not exist.
    #[error("unknown item: {token}")]
    UnknownItem {
        /// The offending token.
        token: String,
    },
}

/// One step of a recorded run.
///
/// Player operations and background pulses share this enum so a run that
/// includes wall-clock driven pulses can be replayed exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Rest in place.
    Rest,
    /// Search the current location.
    Search,
    /// Move to a neighboring location.
    NextRoom,
    /// Use one unit of an item.
    Use(ItemKind),
    /// Put the inventory away.
    CloseItems,
    /// Start over from the seed.
    Restart,
    /// One background simulation pulse.
    Pulse,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rest => write!(f, "rest"),
            Self::Search => write!(f, "search"),
            Self::NextRoom => write!(f, "next"),
            Self::Use(item) => write!(f, "use:{item}"),
            Self::CloseItems => write!(f, "close"),
            Self::Restart => write!(f, "restart"),
            Self::Pulse => write!(f, "pulse"),
        }
    }
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        if let Some(item) = token.strip_prefix("use:") {
            return item.parse().map(Self::Use);
        }
        match token.as_str() {
            "rest" => Ok(Self::Rest),
            "search" => Ok(Self::Search),
            "next" | "nextroom" | "move" => Ok(Self::NextRoom),
            "close" | "closeitems" => Ok(Self::CloseItems),
            "restart" => Ok(Self::Restart),
            "pulse" => Ok(Self::Pulse),
            _ => Err(CommandParseError::UnknownCommand { token }),
        }
    }
}

impl Command {
    /// Parse a comma- or whitespace-separated trace such as
    /// `"rest, search, use:water"`. A bare `use:` takes the next token as its
    /// item, so `"use: water"` parses too.
    ///
    /// # Errors
    ///
    /// Returns the first [`CommandParseError`] encountered.
    pub fn parse_trace(trace: &str) -> Result<Vec<Self>, CommandParseError> {
        let mut tokens = trace
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty());
        let mut commands = Vec::new();
        while let Some(token) = tokens.next() {
            let command = if token.eq_ignore_ascii_case("use:") {
                Self::Use(tokens.next().unwrap_or_default().parse()?)
            } else {
                token.parse()?
            };
            commands.push(command);
        }
        Ok(commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_orders_are_stable() {
        assert_eq!(ExteriorType::ALL.first(), Some(&ExteriorType::Lane));
        assert_eq!(StructureType::ALL.last(), Some(&StructureType::Chapel));
        assert_eq!(ItemKind::ALL.len(), 4);
    }

    #[test]
    fn command_round_trips_through_text() {
        for command in [
            Command::Rest,
            Command::Search,
            Command::NextRoom,
            Command::Use(ItemKind::Bandage),
            Command::CloseItems,
            Command::Restart,
            Command::Pulse,
        ] {
            assert_eq!(command.to_string().parse::<Command>(), Ok(command));
        }
    }

    #[test]
    fn trace_parsing_accepts_mixed_separators() {
        let trace = Command::parse_trace("rest, search  use:water,next").unwrap_or_default();
        assert_eq!(
            trace,
            vec![
                Command::Rest,
                Command::Search,
                Command::Use(ItemKind::Water),
                Command::NextRoom
            ]
        );
    }

    #[test]
    fn trace_parsing_joins_spaced_use() {
        let trace = Command::parse_trace("rest, use: water,USE:  scrap next").unwrap_or_default();
        assert_eq!(
            trace,
            vec![
                Command::Rest,
                Command::Use(ItemKind::Water),
                Command::Use(ItemKind::Scrap),
                Command::NextRoom
            ]
        );
        assert_eq!(
            Command::parse_trace("rest, use:"),
            Err(CommandParseError::UnknownItem {
                token: String::new()
            })
        );
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        assert!(matches!(
            "dance".parse::<Command>(),
            Err(CommandParseError::UnknownCommand { .. })
        ));
        assert!(matches!(
            "use:rope".parse::<Command>(),
            Err(CommandParseError::UnknownItem { .. })
        ));
    }

    #[test]
    fn location_kind_exterior_flag() {
        assert!(LocationKind::Exterior(ExteriorType::Yard).is_exterior());
        assert!(!LocationKind::Structure(StructureType::Chapel).is_exterior());
    }
}
