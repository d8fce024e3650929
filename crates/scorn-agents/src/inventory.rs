//! Item counts, search finds and the search narration.
//!
//! Counts are unsigned and never go below zero: [`Inventory::consume`]
//! refuses when nothing is held. What a successful search turns up depends
//! on the kind of location, drawn from a fixed weight table.

use std::collections::BTreeMap;

use rand::RngCore;
use scorn_narrative::ItemOption;
use scorn_types::{ItemKind, LocationKind, StructureType};
use scorn_world::Roll;
use serde::{Deserialize, Serialize};

/// Items carried by the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: BTreeMap<ItemKind, u32>,
}

impl Inventory {
    /// One water, one ration, no bandage, one scrap.
    pub fn starting() -> Self {
        Self {
            items: BTreeMap::from([
                (ItemKind::Water, 1),
                (ItemKind::Ration, 1),
                (ItemKind::Bandage, 0),
                (ItemKind::Scrap, 1),
            ]),
        }
    }

    /// Units of `kind` held.
    pub fn count(&self, kind: ItemKind) -> u32 {
        self.items.get(&kind).copied().unwrap_or(0)
    }

    /// Remove one unit of `kind`. Returns `false`, changing nothing, when
    /// none is held.
    pub fn consume(&mut self, kind: ItemKind) -> bool {
        match self.items.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count = count.saturating_sub(1);
                true
            }
            _ => false,
        }
    }

    /// Add one unit of `kind`.
    pub fn gain(&mut self, kind: ItemKind) {
        let count = self.items.entry(kind).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Held items with positive counts, in canonical item order.
    pub fn options(&self) -> Vec<ItemOption> {
        ItemKind::ALL
            .iter()
            .filter_map(|&kind| {
                let count = self.count(kind);
                (count > 0).then(|| ItemOption {
                    kind,
                    name: kind.display_name().to_owned(),
                    count,
                })
            })
            .collect()
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::starting()
    }
}

// ---------------------------------------------------------------------------
// Search finds
// ---------------------------------------------------------------------------

/// Relative odds of each item turning up, in water, ration, bandage, scrap
/// order.
pub const fn find_weights(kind: LocationKind) -> [(ItemKind, u64); 4] {
    let [water, ration, bandage, scrap] = match kind {
        LocationKind::Structure(StructureType::PumpWorks) => [5, 2, 2, 4],
        LocationKind::Structure(StructureType::StoreRoom) => [2, 5, 2, 3],
        LocationKind::Structure(StructureType::Barracks) => [2, 3, 4, 3],
        LocationKind::Structure(StructureType::Workshop) => [1, 2, 2, 6],
        LocationKind::Structure(StructureType::Chapel) => [2, 2, 5, 2],
        LocationKind::Exterior(_) => [2, 2, 1, 5],
    };
    [
        (ItemKind::Water, water),
        (ItemKind::Ration, ration),
        (ItemKind::Bandage, bandage),
        (ItemKind::Scrap, scrap),
    ]
}

/// Draw one item from the weight table for `kind`. Consumes one roll.
pub fn weighted_find<R: RngCore + ?Sized>(kind: LocationKind, rng: &mut R) -> ItemKind {
    let table = find_weights(kind);
    let total = table.iter().fold(0_u64, |sum, (_, w)| sum.saturating_add(*w));
    let mut roll = rng.roll_below(total);
    for (item, weight) in table {
        if roll < weight {
            return item;
        }
        roll = roll.saturating_sub(weight);
    }
    ItemKind::Scrap
}

/// Narration for finding `item`, phrased for open ground or an interior.
pub const fn search_line(item: ItemKind, exterior: bool) -> &'static str {
    match (item, exterior) {
        (ItemKind::Water, true) => "Under broken piping, you find a canteen with a little water left.",
        (ItemKind::Water, false) => "You find water pooled in a clean jar and keep what you can.",
        (ItemKind::Ration, true) => "A sealed ration turns up beneath windblown cloth.",
        (ItemKind::Ration, false) => "In a warped drawer, you find food that still passes for safe.",
        (ItemKind::Bandage, true) => "Cloth caught on wire still serves as binding.",
        (ItemKind::Bandage, false) => "A dry box hides strips of cloth and old salve.",
        (ItemKind::Scrap, true) => "You gather bent metal and pocket the least corroded pieces.",
        (ItemKind::Scrap, false) => "You pull useful scrap from under collapsed shelving.",
    }
}

/// Narration for a search that went wrong.
pub const fn hazard_line(exterior: bool) -> &'static str {
    if exterior {
        "Loose stone slips beneath you. You catch yourself too late."
    } else {
        "A shelf gives way in your hands. Splinters rake your palm."
    }
}

/// Narration for a search that turned up nothing.
pub const fn empty_search_line(exterior: bool) -> &'static str {
    if exterior {
        "You search the open ground and come up with dust and old nails."
    } else {
        "You turn the room over and find nothing worth carrying."
    }
}

#[cfg(test)]
mod tests {
    use scorn_types::ExteriorType;
    use scorn_world::DeterministicRng;

    use super::*;

    #[test]
    fn starting_inventory_hides_empty_bandages() {
        let inventory = Inventory::starting();
        assert_eq!(inventory.count(ItemKind::Bandage), 0);
        let kinds: Vec<ItemKind> = inventory.options().iter().map(|o| o.kind).collect();
        assert_eq!(kinds, vec![ItemKind::Water, ItemKind::Ration, ItemKind::Scrap]);
    }

    #[test]
    fn consume_refuses_at_zero() {
        let mut inventory = Inventory::starting();
        assert!(inventory.consume(ItemKind::Water));
        assert!(!inventory.consume(ItemKind::Water));
        assert!(!inventory.consume(ItemKind::Bandage));
        assert_eq!(inventory.count(ItemKind::Water), 0);
        inventory.gain(ItemKind::Bandage);
        assert!(inventory.consume(ItemKind::Bandage));
    }

    #[test]
    fn weights_sum_per_kind() {
        let total = |kind| find_weights(kind).iter().map(|(_, w)| *w).sum::<u64>();
        assert_eq!(total(LocationKind::Structure(StructureType::PumpWorks)), 13);
        assert_eq!(total(LocationKind::Structure(StructureType::Workshop)), 11);
        assert_eq!(total(LocationKind::Exterior(ExteriorType::Yard)), 10);
    }

    #[test]
    fn weighted_find_favors_heavy_items() {
        let mut rng = DeterministicRng::new(734_221);
        let kind = LocationKind::Structure(StructureType::Workshop);
        let finds: Vec<ItemKind> = (0..1_100).map(|_| weighted_find(kind, &mut rng)).collect();
        let scrap = finds.iter().filter(|&&k| k == ItemKind::Scrap).count();
        let water = finds.iter().filter(|&&k| k == ItemKind::Water).count();
        assert!(scrap > water.saturating_mul(2));
    }

    #[test]
    fn lines_differ_by_setting() {
        for item in ItemKind::ALL {
            assert_ne!(search_line(item, true), search_line(item, false));
        }
        assert_ne!(hazard_line(true), hazard_line(false));
        assert_ne!(empty_search_line(true), empty_search_line(false));
    }
}
