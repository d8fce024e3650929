//! Themed name pools for generated places.
//!
//! Every pool is indexed by a stable hash of the record id and a fixed salt
//! (see [`crate::generator`]), so a given seed always names the same place the
//! same way.

use scorn_types::{AreaType, ExteriorType, SettlementType, StructureType};

/// Area names by terrain.
pub const fn area_names(area_type: AreaType) -> &'static [&'static str] {
    match area_type {
        AreaType::Floodworks => &[
            "The Drowned Margin",
            "Salt Lantern Reach",
            "Undertide Span",
            "Sluice Hollow",
        ],
        AreaType::QuarryBelt => &[
            "Chalkbone Verge",
            "Whitecut Belt",
            "Dustline Expanse",
            "Stonewake Reach",
        ],
        AreaType::AshTerrace => &[
            "Cinder Terrace",
            "Ember Shelf",
            "Smokefall Rise",
            "Blackwind Steps",
        ],
    }
}

/// Settlement names by character.
pub const fn settlement_names(settlement_type: SettlementType) -> &'static [&'static str] {
    match settlement_type {
        SettlementType::ScavengerWard => &[
            "Tinward",
            "Ragmarket",
            "Scraphearth",
            "Patchline Ward",
            "Hooklight Quarter",
        ],
        SettlementType::CisternCamp => &[
            "Cistern Hold",
            "Bucketline Camp",
            "Wellgate",
            "Dampcourt",
            "Reservoir Row",
        ],
        SettlementType::ShrineQuarter => &[
            "Lampward",
            "Ash Chapel Quarter",
            "Votive Court",
            "Quiet Reliquary",
            "Candlewalk",
        ],
    }
}

/// Structure names by function.
pub const fn structure_names(structure_type: StructureType) -> &'static [&'static str] {
    match structure_type {
        StructureType::PumpWorks => &["Valve Hall", "Pressure House", "Sump Engine", "Cold Pump Room"],
        StructureType::StoreRoom => &["Ration Vault", "Dry Store", "Provision Lockup", "Tin Pantry"],
        StructureType::Barracks => &["Watch Barracks", "Bunk Hall", "Night Shelter", "Guard Sleeproom"],
        StructureType::Workshop => &["Maker's Shed", "Iron Bench", "Repair Loft", "Tool Annex"],
        StructureType::Chapel => &["Low Chapel", "Hush Nave", "Votive Hall", "Soot Shrine"],
    }
}

/// Room names by structure function. The generator appends a 1-based index.
pub const fn room_names(structure_type: StructureType) -> &'static [&'static str] {
    match structure_type {
        StructureType::PumpWorks => &["Pressure Gallery", "Valve Duct", "Drain Chamber"],
        StructureType::StoreRoom => &["Ration Rack", "Dry Alcove", "Tin Locker"],
        StructureType::Barracks => &["Bunk Nook", "Watch Cot", "Blanket Bay"],
        StructureType::Workshop => &["Bench Bay", "Parts Alcove", "Tool Cage"],
        StructureType::Chapel => &["Votive Cell", "Quiet Pew", "Lamp Annex"],
    }
}

/// First word(s) of a settlement hub name.
pub const fn hub_bases(settlement_type: SettlementType) -> &'static [&'static str] {
    match settlement_type {
        SettlementType::ScavengerWard => &["Trade Court", "Scrap Cross", "Hook Yard", "Salvage Gate"],
        SettlementType::CisternCamp => &["Water Court", "Cistern Edge", "Bucket Steps", "Well Mouth"],
        SettlementType::ShrineQuarter => &["Prayer Walk", "Lamp Court", "Candle Gate", "Votive Yard"],
    }
}

/// Trailing word of a settlement hub name.
pub const fn hub_tails(exterior_type: ExteriorType) -> &'static [&'static str] {
    match exterior_type {
        ExteriorType::Lane => &["Lane", "Pass", "Walk"],
        ExteriorType::Yard => &["Yard", "Court", "Square"],
        ExteriorType::Catwalk => &["Catwalk", "Overway", "High Walk"],
        ExteriorType::Stair => &["Stairs", "Steps", "Rise"],
    }
}

/// Names for the exterior that links a hub to a structure.
pub const fn connector_names(exterior_type: ExteriorType) -> &'static [&'static str] {
    match exterior_type {
        ExteriorType::Lane => &["Narrow Cut", "Dust Lane", "Blind Passage", "Wire Alley"],
        ExteriorType::Yard => &["Broken Yard", "Open Court", "Shale Yard", "Wind Pocket"],
        ExteriorType::Catwalk => &["High Catwalk", "Sway Bridge", "Rafter Walk", "Narrow Overway"],
        ExteriorType::Stair => &["Switchback Stairs", "Stone Steps", "Split Stair", "Drop Stair"],
    }
}

/// Names for transits between settlements of the same area.
pub const fn transit_names(exterior_type: ExteriorType) -> &'static [&'static str] {
    match exterior_type {
        ExteriorType::Lane => &["Long Lane", "Crossline Passage", "Narrow Throughway", "Far Lane"],
        ExteriorType::Yard => &["Open Crossing", "Middle Yard", "Worn Court", "Hollow Crossing"],
        ExteriorType::Catwalk => &["Span Catwalk", "Crossbeam Walk", "Long Overpass", "Ridge Walk"],
        ExteriorType::Stair => &["Traverse Stairs", "Between Steps", "Climb Passage", "Split Rise"],
    }
}

/// Names for bridges between consecutive areas.
pub const fn bridge_names(exterior_type: ExteriorType) -> &'static [&'static str] {
    match exterior_type {
        ExteriorType::Lane => &["Boundary Lane", "Edge Passage", "Farthrough", "Border Walk"],
        ExteriorType::Yard => &["Boundary Court", "Open Verge", "Border Yard", "Drift Court"],
        ExteriorType::Catwalk => &["Spine Catwalk", "Ridge Span", "Border Overway", "Long Span Walk"],
        ExteriorType::Stair => &["Boundary Stairs", "Ridge Steps", "Edge Rise", "Border Climb"],
    }
}

/// Name used when a pool is empty.
pub const UNNAMED_PLACE: &str = "Unnamed Place";
