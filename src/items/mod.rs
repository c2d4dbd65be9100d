//! Item system: types and the static catalog.

pub mod catalog;
pub mod types;

pub use catalog::*;
pub use types::*;
