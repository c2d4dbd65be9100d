//! Dungeon Legacy - turn-based dungeon crawler engine
//!
//! Dungeon generation, fog of war, movement, combat, progression, loot and
//! quests as pure state transitions, plus a `GameSession` that drives them and
//! a checksummed snapshot store.

pub mod character;
pub mod combat;
pub mod core;
pub mod dungeon;
pub mod items;
pub mod quests;
pub mod save_manager;
pub mod utils;
