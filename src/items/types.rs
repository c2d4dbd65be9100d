use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Rare = 1,
    Epic = 2,
    Legendary = 3,
}

impl Rarity {
    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageType {
    Physical,
    Magical,
}

/// What an item does, with the stats that only make sense for its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon {
        damage: u32,
        /// Carried for display; combat does not read it.
        attack_speed: f64,
        damage_type: DamageType,
    },
    Armor {
        defense: u32,
        resistance: u32,
    },
    Potion,
    Scroll,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Catalog id. Several inventory entries may share one id.
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    pub description: String,
    /// Gold received when sold
    pub value: u32,
    pub kind: ItemKind,
}

impl Item {
    pub fn is_weapon(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon { .. })
    }

    pub fn is_armor(&self) -> bool {
        matches!(self.kind, ItemKind::Armor { .. })
    }

    pub fn is_potion(&self) -> bool {
        matches!(self.kind, ItemKind::Potion)
    }
}
