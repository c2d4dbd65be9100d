//! Rejection reasons for state transitions that did not happen.
//!
//! A rejection never carries partial state: the caller's snapshot is exactly
//! what it was before the call.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("cannot move while in combat")]
    InCombat,

    #[error("target cell is outside the dungeon")]
    OutOfBounds,

    #[error("target cell is not walkable")]
    NotWalkable,

    #[error("no combat in progress")]
    NotInCombat,

    /// The monster is dead and the combat is waiting out its resolution delay.
    #[error("combat is resolving")]
    CombatResolving,

    #[error("monster is already defeated")]
    MonsterAlreadyDefeated,

    #[error("character is defeated")]
    CharacterDefeated,

    #[error("item {item_id} is not in the inventory")]
    NotInInventory { item_id: String },

    #[error("item {item_id} is equipped and cannot be sold")]
    ItemEquipped { item_id: String },

    #[error("item {item_id} cannot be equipped")]
    NotEquippable { item_id: String },

    #[error("{item_id} is not a known potion")]
    UnknownPotion { item_id: String },

    #[error("character name must be 1 to {max} characters")]
    InvalidName { max: usize },

    #[error("quest {quest_id} not found")]
    QuestNotFound { quest_id: String },

    #[error("quest {quest_id} is not completed")]
    QuestNotCompleted { quest_id: String },

    #[error("rewards for quest {quest_id} were already claimed")]
    RewardsAlreadyClaimed { quest_id: String },
}
