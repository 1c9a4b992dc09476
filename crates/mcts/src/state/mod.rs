//! State primitives for turn-based games.
//!
//! This module defines the contract between the engine and a rules engine:
//! - Edge types (actions a player can take)
//! - Game state (whose turn, how many players)
//! - Forward model (transitions, legality, scoring)

mod edge;
mod game;
mod model;

pub use edge::*;
pub use game::*;
pub use model::*;
