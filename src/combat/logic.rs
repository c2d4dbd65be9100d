use log::{debug, info};

use super::types::Monster;
use crate::character::{gain_experience, Character};
use crate::core::constants::MIN_DAMAGE;
use crate::core::error::Rejection;
use crate::items::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    /// Both sides still standing
    Ongoing,
    /// The monster died this exchange
    Victory,
    /// The character's health reached zero
    Defeat,
}

/// Everything one exchange produced.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackResult {
    pub character: Character,
    pub monster: Monster,
    pub log: Vec<String>,
    pub outcome: CombatOutcome,
    /// Damage the character dealt
    pub player_damage: u32,
    /// Damage the monster dealt back, None when it died first
    pub monster_damage: Option<u32>,
    pub leveled_up: bool,
    /// Items moved from the monster's loot into the inventory
    pub loot: Vec<Item>,
}

/// Damage after defense, never below the one-point floor.
pub fn calculate_damage(attack: u32, defense: u32) -> u32 {
    attack.saturating_sub(defense).max(MIN_DAMAGE)
}

/// Resolves one exchange between the character and a monster.
///
/// Both damage values are computed from the state before the exchange. The
/// character's blow lands first; a monster brought to zero health dies without
/// striking back and pays out experience, gold and loot. Otherwise the monster
/// hits back and the character may be defeated.
pub fn attack(character: &Character, monster: &Monster) -> Result<AttackResult, Rejection> {
    if character.is_defeated() {
        return Err(Rejection::CharacterDefeated);
    }
    if !monster.is_alive {
        return Err(Rejection::MonsterAlreadyDefeated);
    }

    let player_damage = calculate_damage(character.combat.damage, monster.defense);
    let monster_damage = calculate_damage(monster.damage, character.combat.defense);

    let mut monster = monster.clone();
    let mut log = vec![format!("You deal {} damage!", player_damage)];
    monster.take_damage(player_damage);

    if !monster.is_alive {
        log.push(format!("{} is defeated!", monster.name));
        log.push(format!(
            "+{} experience, +{} gold",
            monster.experience, monster.gold_drop
        ));

        let mut updated = character.clone();
        updated.gold = updated.gold.saturating_add(monster.gold_drop);
        for item in &monster.loot {
            log.push(format!("Found item: {}", item.name));
            updated.inventory.push(item.clone());
        }
        let (updated, leveled_up) = gain_experience(updated, monster.experience);
        if leveled_up {
            log.push(format!("Level up! You are now level {}!", updated.level));
        }

        info!(
            "{} defeated {} (level {}): +{} xp, +{} gold, {} item(s)",
            updated.name,
            monster.name,
            monster.level,
            monster.experience,
            monster.gold_drop,
            monster.loot.len()
        );

        let loot = monster.loot.clone();
        return Ok(AttackResult {
            character: updated,
            monster,
            log,
            outcome: CombatOutcome::Victory,
            player_damage,
            monster_damage: None,
            leveled_up,
            loot,
        });
    }

    let mut updated = character.clone();
    updated.combat.health = updated.combat.health.saturating_sub(monster_damage);
    log.push(format!("{} deals {} damage!", monster.name, monster_damage));

    let outcome = if updated.is_defeated() {
        log.push("You have fallen!".to_string());
        info!("{} was defeated by {}", updated.name, monster.name);
        CombatOutcome::Defeat
    } else {
        CombatOutcome::Ongoing
    };

    debug!(
        "exchange: dealt {}, took {}, monster hp {}/{}, hero hp {}/{}",
        player_damage,
        monster_damage,
        monster.health,
        monster.max_health,
        updated.combat.health,
        updated.combat.max_health
    );

    Ok(AttackResult {
        character: updated,
        monster,
        log,
        outcome,
        player_damage,
        monster_damage: Some(monster_damage),
        leveled_up: false,
        loot: Vec::new(),
    })
}
