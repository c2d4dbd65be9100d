//! Dungeon grid, generation and movement.

pub mod generation;
pub mod logic;
pub mod types;

pub use generation::*;
pub use logic::*;
pub use types::*;
