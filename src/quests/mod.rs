//! Quest log and progress tracking.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
