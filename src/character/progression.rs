//! Experience and level-up rules.

use log::info;

use super::types::Character;
use crate::core::constants::*;

/// Threshold for the level after one that needed `current`.
///
/// Saturates at `u32::MAX`; [`MAX_LEVEL`] keeps real characters far below it.
pub fn next_level_threshold(current: u32) -> u32 {
    (current as f64 * XP_CURVE_MULTIPLIER).floor() as u32
}

/// Adds experience and performs at most one level-up.
///
/// The threshold in effect before the gain is the one compared, and the
/// overflow above it carries over as the new experience. A gain large enough
/// to cross two thresholds still levels only once; the rest waits for the
/// next gain.
///
/// At [`MAX_LEVEL`] experience keeps accumulating but no level-up happens.
///
/// Returns the updated character and whether it leveled up.
pub fn gain_experience(mut character: Character, amount: u32) -> (Character, bool) {
    let total = character.experience.saturating_add(amount);
    if character.level < MAX_LEVEL && total >= character.experience_to_next_level {
        character.experience = total - character.experience_to_next_level;
        level_up(&mut character);
        (character, true)
    } else {
        character.experience = total;
        (character, false)
    }
}

/// Applies one level's growth as a single transition: threshold, base stats,
/// pools refilled to their new maximums, damage and defense.
fn level_up(character: &mut Character) {
    character.level = character.level.saturating_add(1);
    character.experience_to_next_level = next_level_threshold(character.experience_to_next_level);

    let stats = &mut character.stats;
    stats.strength = stats.strength.saturating_add(LEVEL_UP_STAT_GAIN);
    stats.dexterity = stats.dexterity.saturating_add(LEVEL_UP_STAT_GAIN);
    stats.intelligence = stats.intelligence.saturating_add(LEVEL_UP_STAT_GAIN);
    stats.vitality = stats.vitality.saturating_add(LEVEL_UP_STAT_GAIN);

    let combat = &mut character.combat;
    combat.max_health = combat.max_health.saturating_add(LEVEL_UP_MAX_HEALTH_GAIN);
    combat.health = combat.max_health;
    combat.max_mana = combat.max_mana.saturating_add(LEVEL_UP_MAX_MANA_GAIN);
    combat.mana = combat.max_mana;
    combat.damage = combat.damage.saturating_add(LEVEL_UP_DAMAGE_GAIN);
    combat.defense = combat.defense.saturating_add(LEVEL_UP_DEFENSE_GAIN);

    info!(
        "{} reached level {} ({} xp to next)",
        character.name, character.level, character.experience_to_next_level
    );
}
