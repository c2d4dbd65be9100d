//! Static item definitions: weapons, armors and potions.

use super::types::{DamageType, Item, ItemKind, Rarity};
use crate::core::constants::{HEALTH_POTION_ID, MANA_POTION_ID};

#[allow(clippy::too_many_arguments)]
fn weapon(
    id: &str,
    name: &str,
    rarity: Rarity,
    description: &str,
    value: u32,
    damage: u32,
    attack_speed: f64,
    damage_type: DamageType,
) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        rarity,
        description: description.to_string(),
        value,
        kind: ItemKind::Weapon {
            damage,
            attack_speed,
            damage_type,
        },
    }
}

fn armor(
    id: &str,
    name: &str,
    rarity: Rarity,
    description: &str,
    value: u32,
    defense: u32,
    resistance: u32,
) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        rarity,
        description: description.to_string(),
        value,
        kind: ItemKind::Armor {
            defense,
            resistance,
        },
    }
}

fn potion(id: &str, name: &str, description: &str, value: u32) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        rarity: Rarity::Common,
        description: description.to_string(),
        value,
        kind: ItemKind::Potion,
    }
}

pub fn weapons() -> Vec<Item> {
    vec![
        weapon(
            "sword_1",
            "Rusty Sword",
            Rarity::Common,
            "An old blade for beginners",
            50,
            8,
            1.2,
            DamageType::Physical,
        ),
        weapon(
            "staff_1",
            "Staff of Fire",
            Rarity::Rare,
            "A magic staff burning with fire",
            200,
            15,
            0.8,
            DamageType::Magical,
        ),
        weapon(
            "dagger_1",
            "Shadow Dagger",
            Rarity::Epic,
            "A quick dagger for strikes from hiding",
            350,
            12,
            2.0,
            DamageType::Physical,
        ),
        weapon(
            "sword_legendary",
            "Sunset Blade",
            Rarity::Legendary,
            "Legendary sword of the ancient heroes",
            1000,
            35,
            1.5,
            DamageType::Physical,
        ),
    ]
}

pub fn armors() -> Vec<Item> {
    vec![
        armor(
            "armor_1",
            "Leather Armor",
            Rarity::Common,
            "Simple leather protection",
            80,
            5,
            2,
        ),
        armor(
            "armor_2",
            "Steel Cuirass",
            Rarity::Rare,
            "Sturdy steel plate",
            250,
            15,
            8,
        ),
        armor(
            "armor_legendary",
            "Dragon Plate",
            Rarity::Legendary,
            "Legendary armor forged from dragon scales",
            1500,
            40,
            25,
        ),
    ]
}

pub fn potions() -> Vec<Item> {
    vec![
        potion(HEALTH_POTION_ID, "Health Potion", "Restores 50 HP", 25),
        potion(MANA_POTION_ID, "Mana Potion", "Restores 30 mana", 30),
    ]
}

/// Weapons followed by armors, the pool equipment loot is drawn from.
pub fn equipment() -> Vec<Item> {
    let mut items = weapons();
    items.extend(armors());
    items
}

/// Looks up any catalog item by id.
pub fn find_item(id: &str) -> Option<Item> {
    weapons()
        .into_iter()
        .chain(armors())
        .chain(potions())
        .find(|item| item.id == id)
}
