use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::character::Position;
use crate::core::constants::*;
use crate::items::{equipment, potions, Item};

/// Monster family. Flavor only; damage formulas never read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonsterKind {
    Undead,
    Demon,
    Beast,
}

impl MonsterKind {
    pub fn name(&self) -> &'static str {
        match self {
            MonsterKind::Undead => "undead",
            MonsterKind::Demon => "demon",
            MonsterKind::Beast => "beast",
        }
    }
}

/// Level 1 stats a monster is scaled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterTemplate {
    pub name: &'static str,
    pub kind: MonsterKind,
    pub base_health: u32,
    pub base_damage: u32,
    pub base_defense: u32,
    pub experience: u32,
    pub gold_drop: u32,
}

pub const MONSTER_TEMPLATES: [MonsterTemplate; 5] = [
    MonsterTemplate {
        name: "Skeleton",
        kind: MonsterKind::Undead,
        base_health: 30,
        base_damage: 5,
        base_defense: 2,
        experience: 15,
        gold_drop: 10,
    },
    MonsterTemplate {
        name: "Zombie",
        kind: MonsterKind::Undead,
        base_health: 50,
        base_damage: 8,
        base_defense: 3,
        experience: 25,
        gold_drop: 15,
    },
    MonsterTemplate {
        name: "Demon",
        kind: MonsterKind::Demon,
        base_health: 80,
        base_damage: 12,
        base_defense: 5,
        experience: 50,
        gold_drop: 30,
    },
    MonsterTemplate {
        name: "Dragon",
        kind: MonsterKind::Beast,
        base_health: 200,
        base_damage: 25,
        base_defense: 15,
        experience: 150,
        gold_drop: 100,
    },
    MonsterTemplate {
        name: "Imp",
        kind: MonsterKind::Demon,
        base_health: 40,
        base_damage: 10,
        base_defense: 2,
        experience: 20,
        gold_drop: 12,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub id: Uuid,
    pub name: String,
    pub kind: MonsterKind,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub damage: u32,
    pub defense: u32,
    /// Spawn cell; monsters never move
    pub position: Position,
    pub experience: u32,
    pub gold_drop: u32,
    /// Rolled at creation, handed over on death
    pub loot: Vec<Item>,
    pub is_alive: bool,
}

impl Monster {
    /// Builds a full-health monster from a template at `level`.
    pub fn from_template(template: &MonsterTemplate, level: u32, id: Uuid, loot: Vec<Item>) -> Self {
        let multiplier = level_multiplier(level);
        let max_health = scale_stat(template.base_health, multiplier);
        Self {
            id,
            name: template.name.to_string(),
            kind: template.kind,
            level,
            health: max_health,
            max_health,
            damage: scale_stat(template.base_damage, multiplier),
            defense: scale_stat(template.base_defense, multiplier),
            position: Position::default(),
            experience: scale_stat(template.experience, multiplier),
            gold_drop: scale_stat(template.gold_drop, multiplier),
            loot,
            is_alive: true,
        }
    }

    /// Lowers health, never below zero. Reaching zero marks the monster dead.
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.is_alive = false;
        }
    }
}

/// `1 + (level - 1) * 0.3`
pub fn level_multiplier(level: u32) -> f64 {
    1.0 + level.saturating_sub(1) as f64 * MONSTER_LEVEL_SCALING
}

/// Applies a level multiplier to a template value, flooring the result.
pub fn scale_stat(base: u32, multiplier: f64) -> u32 {
    (base as f64 * multiplier).floor() as u32
}

/// Independent draws: one potion at 30%, one piece of equipment at 10%.
pub fn roll_loot(rng: &mut impl Rng) -> Vec<Item> {
    let mut loot = Vec::new();
    if rng.gen_bool(POTION_DROP_CHANCE) {
        loot.extend(potions().choose(rng).cloned());
    }
    if rng.gen_bool(EQUIPMENT_DROP_CHANCE) {
        loot.extend(equipment().choose(rng).cloned());
    }
    loot
}

/// Picks a template uniformly and scales it to `level`, loot included.
///
/// The id is drawn from `rng`, so a seeded generator reproduces ids as well.
pub fn generate_monster(level: u32, rng: &mut impl Rng) -> Monster {
    let template = MONSTER_TEMPLATES[rng.gen_range(0..MONSTER_TEMPLATES.len())];
    let loot = roll_loot(rng);
    let id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
    Monster::from_template(&template, level, id, loot)
}
