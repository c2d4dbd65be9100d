use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::constants::*;
use crate::core::error::Rejection;
use crate::items::{find_item, Item};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterClass {
    /// Melee, strength-focused
    Warrior,
    /// Magic, intelligence-focused
    Mage,
    /// Agility-focused
    Rogue,
}

/// Starting stats and pool multipliers for one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassBonuses {
    pub strength: u32,
    pub dexterity: u32,
    pub intelligence: u32,
    pub vitality: u32,
    pub health_multiplier: u32,
    pub mana_multiplier: u32,
}

impl CharacterClass {
    pub fn all() -> [CharacterClass; 3] {
        [
            CharacterClass::Warrior,
            CharacterClass::Mage,
            CharacterClass::Rogue,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Mage => "Mage",
            CharacterClass::Rogue => "Rogue",
        }
    }

    pub fn bonuses(&self) -> ClassBonuses {
        match self {
            CharacterClass::Warrior => ClassBonuses {
                strength: 10,
                dexterity: 5,
                intelligence: 2,
                vitality: 12,
                health_multiplier: 15,
                mana_multiplier: 5,
            },
            CharacterClass::Mage => ClassBonuses {
                strength: 2,
                dexterity: 5,
                intelligence: 12,
                vitality: 5,
                health_multiplier: 8,
                mana_multiplier: 15,
            },
            CharacterClass::Rogue => ClassBonuses {
                strength: 5,
                dexterity: 12,
                intelligence: 5,
                vitality: 8,
                health_multiplier: 10,
                mana_multiplier: 10,
            },
        }
    }

    /// Parses a class name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|class| class.name().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub strength: u32,
    pub dexterity: u32,
    pub intelligence: u32,
    pub vitality: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub health: u32,
    pub max_health: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub damage: u32,
    pub defense: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Applies a signed offset, returning None when either axis goes negative.
    pub fn offset(&self, dx: i32, dy: i32) -> Option<Position> {
        let x = self.x.checked_add_signed(dx as isize)?;
        let y = self.y.checked_add_signed(dy as isize)?;
        Some(Position { x, y })
    }

    pub fn chebyshev_distance(&self, other: Position) -> usize {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

/// Weapon and armor slots. An equipped item is a copy of an inventory entry;
/// equipping never removes it from the inventory.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Equipped {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
}

impl Equipped {
    /// True when `item_id` sits in either slot.
    pub fn holds(&self, item_id: &str) -> bool {
        self.weapon.as_ref().is_some_and(|w| w.id == item_id)
            || self.armor.as_ref().is_some_and(|a| a.id == item_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: Uuid,
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next_level: u32,
    pub stats: BaseStats,
    pub combat: CombatStats,
    pub position: Position,
    pub gold: u32,
    /// Acquisition order; duplicate ids allowed
    pub inventory: Vec<Item>,
    pub equipped: Equipped,
}

impl Character {
    /// Creates a level 1 character of the given class.
    ///
    /// The name is trimmed and must be between 1 and `MAX_NAME_LENGTH`
    /// characters long.
    pub fn new(name: &str, class: CharacterClass) -> Result<Self, Rejection> {
        Self::with_id(Uuid::new_v4(), name, class)
    }

    pub fn with_id(id: Uuid, name: &str, class: CharacterClass) -> Result<Self, Rejection> {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > MAX_NAME_LENGTH {
            return Err(Rejection::InvalidName {
                max: MAX_NAME_LENGTH,
            });
        }

        let bonuses = class.bonuses();
        let max_health = bonuses.vitality * bonuses.health_multiplier;
        let max_mana = bonuses.intelligence * bonuses.mana_multiplier;

        Ok(Self {
            id,
            name: name.to_string(),
            class,
            level: STARTING_LEVEL,
            experience: 0,
            experience_to_next_level: STARTING_XP_TO_NEXT_LEVEL,
            stats: BaseStats {
                strength: bonuses.strength,
                dexterity: bonuses.dexterity,
                intelligence: bonuses.intelligence,
                vitality: bonuses.vitality,
            },
            combat: CombatStats {
                health: max_health,
                max_health,
                mana: max_mana,
                max_mana,
                damage: bonuses.strength + BASE_DAMAGE_BONUS,
                defense: bonuses.vitality,
            },
            position: Position::new(SPAWN_POSITION.0, SPAWN_POSITION.1),
            gold: STARTING_GOLD,
            inventory: find_item(STARTING_WEAPON_ID).into_iter().collect(),
            equipped: Equipped::default(),
        })
    }

    /// Health at zero is the terminal defeated state.
    pub fn is_defeated(&self) -> bool {
        self.combat.health == 0
    }

    pub fn has_item(&self, item_id: &str) -> bool {
        self.inventory.iter().any(|item| item.id == item_id)
    }

    pub fn count_item(&self, item_id: &str) -> usize {
        self.inventory.iter().filter(|item| item.id == item_id).count()
    }

    pub fn health_percent(&self) -> f64 {
        percent(self.combat.health, self.combat.max_health)
    }

    pub fn experience_percent(&self) -> f64 {
        percent(self.experience, self.experience_to_next_level)
    }
}

fn percent(current: u32, max: u32) -> f64 {
    if max == 0 {
        return 0.0;
    }
    current as f64 / max as f64 * 100.0
}
