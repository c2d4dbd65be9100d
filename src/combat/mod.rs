//! Monster generation and combat resolution.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
