//! Phrase pools for location descriptions and distant-event lines.
//!
//! Every pool is indexed through [`Scene::pick`](crate::composer::Scene::pick),
//! so the order of entries is part of the determinism contract: reordering a
//! pool changes the text every seed produces.

use scorn_types::{AreaType, ExteriorType, SettlementType, StructureType};

/// Surface adjectives for an area's stone.
pub const fn area_textures(area: AreaType) -> &'static [&'static str] {
    match area {
        AreaType::Floodworks => &["wet", "salt-stained", "water-darkened"],
        AreaType::QuarryBelt => &["chalky", "dust-gray", "quarried"],
        AreaType::AshTerrace => &["smoke-bruised", "ash-pale", "char-streaked"],
    }
}

/// Landmarks that become a location's memory mark.
pub const fn settlement_marks(settlement: SettlementType) -> &'static [&'static str] {
    match settlement {
        SettlementType::ScavengerWard => &[
            "the flaked paint at the corner post",
            "the dented rain barrel",
            "the faded chalk line near the wall",
        ],
        SettlementType::CisternCamp => &[
            "the rope-wrapped railing",
            "the cracked cistern lip",
            "the patched canvas windbreak",
        ],
        SettlementType::ShrineQuarter => &[
            "the soot-dark lintel",
            "the wax-streaked step",
            "the carved niche by the door",
        ],
    }
}

/// Places a distant sound can come from.
pub const fn settlement_places(settlement: SettlementType) -> &'static [&'static str] {
    match settlement {
        SettlementType::ScavengerWard => {
            &["the scavenger lanes", "the old trade corner", "the tarped roofs"]
        }
        SettlementType::CisternCamp => &["the cistern edge", "the pump queue", "the water stairs"],
        SettlementType::ShrineQuarter => &["the prayer walk", "the shrine yard", "the lamp alcove"],
    }
}

/// What kind of room a structure reads as.
pub const fn structure_roles(structure: StructureType) -> &'static [&'static str] {
    match structure {
        StructureType::PumpWorks => &["pump hall", "waterworks chamber", "valve room"],
        StructureType::StoreRoom => &["store room", "supply lockup", "ration hold"],
        StructureType::Barracks => &["sleep barrack", "shared bunk room", "watch shelter"],
        StructureType::Workshop => &["repair workshop", "tool room", "maker's bay"],
        StructureType::Chapel => &["small chapel", "prayer room", "ritual hall"],
    }
}

/// First-impression sensory sentences inside a structure.
pub const fn structure_sensory(structure: StructureType) -> &'static [&'static str] {
    match structure {
        StructureType::PumpWorks => &[
            "Cold vapor gathers near your ankles.",
            "Pipe joints click with slow pressure changes.",
            "Damp metal smells linger under old grease.",
        ],
        StructureType::StoreRoom => &[
            "Rotting wood and dry cloth share the air.",
            "Shelving leans with uneven weight.",
            "Every drawer sticks before it yields.",
        ],
        StructureType::Barracks => &[
            "Old blankets hold a stale human warmth.",
            "Frames creak even when untouched.",
            "The room smells of rusted buckles and soap ash.",
        ],
        StructureType::Workshop => &[
            "Metal filings glitter in cracks and seams.",
            "Oil darkens the grain of every workbench.",
            "Broken handles collect in corners like kindling.",
        ],
        StructureType::Chapel => &[
            "Wax and dust soften the air.",
            "Stone niches hold blackened candle roots.",
            "Whispers seem to linger after mouths close.",
        ],
    }
}

/// What kind of passage an exterior reads as.
pub const fn exterior_roles(exterior: ExteriorType) -> &'static [&'static str] {
    match exterior {
        ExteriorType::Lane => &["narrow lane", "tight passage", "winding cut"],
        ExteriorType::Yard => &["open yard", "broken court", "cleared pocket"],
        ExteriorType::Catwalk => &["raised catwalk", "swaying bridge", "narrow overpass"],
        ExteriorType::Stair => &["stone stair", "switchback stair", "broken steps"],
    }
}

/// First-impression sensory sentences on open ground.
pub const fn exterior_sensory(exterior: ExteriorType) -> &'static [&'static str] {
    match exterior {
        ExteriorType::Lane => &[
            "Wind threads through it in short, cold pulls.",
            "Loose gravel chatters under each step.",
            "Shadows stretch long between wall breaks.",
        ],
        ExteriorType::Yard => &[
            "Open air makes every noise carry farther.",
            "Puddles catch dim light like dark mirrors.",
            "Footprints overlap until none can be trusted.",
        ],
        ExteriorType::Catwalk => &[
            "Boards flex under your weight.",
            "A draft rises from below and chills your legs.",
            "Nails complain softly in the planks.",
        ],
        ExteriorType::Stair => &[
            "Dust slips down each tread before you do.",
            "The handrail feels colder than the air.",
            "Echoes fall away beneath your feet.",
        ],
    }
}

/// Revisit clauses.
pub const RECOGNITION: &[&str] = &[
    "the place answers before your eyes fully adjust",
    "your body remembers where the floor pitches",
    "you catch yourself tracing the same lines in the wall",
];

/// Sound openers for distant lines, by drift band.
pub const fn distant_moods(band: u8) -> &'static [&'static str] {
    match band {
        0 => &["Muted voices carry", "A bucket knocks twice", "A low argument rises briefly"],
        1 => &[
            "A shout breaks and fades",
            "Running steps pass overhead",
            "Something heavy is dragged across stone",
        ],
        _ => &[
            "A sharp cry echoes and dies",
            "Rapid footsteps scatter in more than one direction",
            "A long scrape rings out, then silence",
        ],
    }
}

// ---------------------------------------------------------------------------
// Subtle-shift lines
// ---------------------------------------------------------------------------

/// Wear below 20.
pub const SHIFT_FAILING: &[&str] = &[
    "The place feels one hard noise away from giving.",
    "Cracks you missed before now hold the eye.",
    "A faint crumble answers each step.",
];

/// Drift band 2.
pub const SHIFT_TENSE: &[&str] = &[
    "It feels narrower than memory allows.",
    "Something in the room has tightened.",
    "The quiet here has sharpened.",
];

/// Wear below 34.
pub const SHIFT_GRITTY: &[&str] = &[
    "Grit has gathered where the floor sags.",
    "Mortar dust hangs in the corners.",
    "The seams look newly opened.",
];

/// Everything else.
pub const SHIFT_HOLDING: &[&str] = &[
    "The room holds, but only just.",
    "For now, the frame keeps its shape.",
    "It stands by habit more than trust.",
];

// ---------------------------------------------------------------------------
// Fixed lines
// ---------------------------------------------------------------------------

/// Title shown when the current location cannot be resolved.
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Description shown when the current location cannot be resolved.
pub const UNKNOWN_DESCRIPTION: &str = "Stone and shadow keep their own counsel here.";

/// Body cue below 24 vitality.
pub const CUE_SHAKING: &str = "Your hands will not stay steady.";

/// Body cue above 78 thirst.
pub const CUE_THIRST: &str = "Your throat is raw with thirst.";

/// Body cue above 82 hunger.
pub const CUE_HUNGER: &str = "Hunger bends your focus into a narrow line.";

/// World cue below 22 wear.
pub const CUE_CRUMBLING: &str = "Dust keeps dropping from the seams overhead.";
