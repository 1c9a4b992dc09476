//! Game-agnostic multi-player Monte Carlo Tree Search.
//!
//! The engine picks one action per call for a seat in a turn-based game,
//! talking to the rules only through a [`ForwardModel`]. Around the core
//! four-phase loop it offers several ways of modeling opponents, a MAST
//! memory that survives between decisions, and hooks for learners.
//!
//! # Module Structure
//!
//! - `state`: contracts with the rules engine (Edge, Game, ForwardModel)
//! - `tree`: petgraph-backed search tree, plain and OMA vertices
//! - `mast`: cross-decision action values and the MAST rollout
//! - `strategy`: injectable heuristics, rollouts, tree processors
//! - `search`: budget, tree policy, single- and multi-tree iterations
//! - `agent`: builder, configuration, decisions, expert-iteration export
//! - `metrics`: search counters
//! - `nim`: Nim reference implementation

mod agent;
mod mast;
mod metrics;
mod nim;
mod search;
mod state;
mod strategy;
mod tree;

pub use agent::*;
pub use mast::*;
pub use metrics::*;
pub use nim::*;
pub use search::*;
pub use state::*;
pub use strategy::*;
pub use tree::*;
