//! Core session state, configuration and shared constants.

pub mod config;
pub mod constants;
pub mod error;
pub mod game_state;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use game_state::*;
