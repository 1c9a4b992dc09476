//! Multi-player Monte Carlo Tree Search for turn-based tabletop games.
//!
//! Re-exports the workspace crates under one name:
//!
//! - `tabletop_core`: type aliases, default tunables, logging, interrupts
//! - `tabletop_mcts`: the search engine and the Nim reference game
pub use tabletop_core::*;
pub use tabletop_mcts::*;
