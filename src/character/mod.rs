//! Character data, progression and inventory operations.

pub mod inventory;
pub mod progression;
pub mod types;

pub use inventory::*;
pub use progression::*;
pub use types::*;
