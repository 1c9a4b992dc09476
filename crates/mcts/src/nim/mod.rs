//! Multi-player Nim as a minimal search test case.
//!
//! A single pile of stones; players take turns removing one to three of them,
//! and whoever removes the last stone wins. The game is small enough to solve
//! by hand yet has a real winning line, which makes it a good check that the
//! search actually searches.
//!
//! # Why Nim?
//!
//! - **Known answer**: with two players, leaving a multiple of four wins
//! - **Any player count**: exercises per-seat rewards beyond two players
//! - **Shrinking action set**: fewer than three stones narrows the choices,
//!   so selection must respect what is legal in the replayed state
//!
//! # File Structure
//!
//! - [`NimEdge`]: `MctsEdge`: stones taken
//! - [`NimGame`]: `MctsGame`: pile, seat to act, winner
//! - [`Nim`]: `ForwardModel`: rules and scoring
//! - [`NimEncoder`]: state and action features for export

mod edge;
mod encoder;
mod game;
mod model;

pub use edge::*;
pub use encoder::*;
pub use game::*;
pub use model::*;
