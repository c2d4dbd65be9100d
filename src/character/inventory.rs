//! Equip, consume and sell.
//!
//! Each operation takes the current character and returns an updated copy, or
//! a [`Rejection`] with the input left untouched.

use log::debug;

use super::types::Character;
use crate::core::constants::*;
use crate::core::error::Rejection;
use crate::items::{Item, ItemKind};

/// Puts an inventory item into its slot.
///
/// Weapons overwrite damage with `strength + weapon damage`; armor overwrites
/// defense with `vitality + armor defense`. Nothing from a replaced item is
/// subtracted because the stat is recomputed from scratch. Potions are drunk
/// instead of equipped.
pub fn equip(character: &Character, item: &Item) -> Result<Character, Rejection> {
    if !character.has_item(&item.id) {
        return Err(Rejection::NotInInventory {
            item_id: item.id.clone(),
        });
    }

    let mut updated = character.clone();
    match &item.kind {
        ItemKind::Weapon { damage, .. } => {
            updated.combat.damage = updated.stats.strength + damage;
            updated.equipped.weapon = Some(item.clone());
        }
        ItemKind::Armor { defense, .. } => {
            updated.combat.defense = updated.stats.vitality + defense;
            updated.equipped.armor = Some(item.clone());
        }
        ItemKind::Potion => return consume(character, &item.id),
        ItemKind::Scroll => {
            return Err(Rejection::NotEquippable {
                item_id: item.id.clone(),
            })
        }
    }

    debug!("{} equipped {}", updated.name, item.name);
    Ok(updated)
}

/// Drinks one potion with the given id.
///
/// Restores are capped at the pool maximum and exactly one matching entry
/// leaves the inventory.
pub fn consume(character: &Character, potion_id: &str) -> Result<Character, Rejection> {
    let restore_health = match potion_id {
        HEALTH_POTION_ID => true,
        MANA_POTION_ID => false,
        _ => {
            return Err(Rejection::UnknownPotion {
                item_id: potion_id.to_string(),
            })
        }
    };

    let mut updated = character.clone();
    remove_one(&mut updated, potion_id)?;

    let combat = &mut updated.combat;
    if restore_health {
        combat.health = (combat.health + HEALTH_POTION_RESTORE).min(combat.max_health);
    } else {
        combat.mana = (combat.mana + MANA_POTION_RESTORE).min(combat.max_mana);
    }

    debug!(
        "{} drank {} (hp {}/{}, mana {}/{})",
        updated.name,
        potion_id,
        updated.combat.health,
        updated.combat.max_health,
        updated.combat.mana,
        updated.combat.max_mana
    );
    Ok(updated)
}

/// Sells the earliest inventory entry with `item.id` for that entry's value.
///
/// An item whose id occupies the weapon or armor slot cannot be sold.
pub fn sell(character: &Character, item: &Item) -> Result<Character, Rejection> {
    if character.equipped.holds(&item.id) {
        return Err(Rejection::ItemEquipped {
            item_id: item.id.clone(),
        });
    }

    let mut updated = character.clone();
    let sold = remove_one(&mut updated, &item.id)?;
    updated.gold = updated.gold.saturating_add(sold.value);

    debug!("{} sold {} for {} gold", updated.name, sold.name, sold.value);
    Ok(updated)
}

/// Removes the earliest inventory entry with `item_id`.
fn remove_one(character: &mut Character, item_id: &str) -> Result<Item, Rejection> {
    let index = character
        .inventory
        .iter()
        .position(|entry| entry.id == item_id)
        .ok_or_else(|| Rejection::NotInInventory {
            item_id: item_id.to_string(),
        })?;
    Ok(character.inventory.remove(index))
}
