//! Core type aliases, default tunables, and runtime helpers for tabletop.
//!
//! This crate provides the foundational types and configuration defaults
//! shared by the search engine and the binaries built on top of it.
#![allow(dead_code)]

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Player index around the table (0-based, in turn order).
pub type Seat = usize;
/// Rewards, heuristic scores, and accumulated node values.
pub type Utility = f32;
/// Visit shares, sampling weights, and decay factors.
pub type Probability = f32;
/// Softmax temperatures.
pub type Entropy = f32;

// ============================================================================
// TREE POLICY
// UCB1: mean + K * sqrt(ln(N) / n), evaluated per decision player.
// ============================================================================
/// Exploration constant K. sqrt(2) is the textbook value for rewards in [0, 1].
pub const EXPLORATION: Utility = std::f32::consts::SQRT_2;
/// Maximum depth of the tree portion of one simulation.
pub const MAX_TREE_DEPTH: usize = 100;
/// Maximum actions taken by the rollout policy after leaving the tree.
pub const ROLLOUT_LENGTH: usize = 10;

// ============================================================================
// SEARCH BUDGET
// Checked only between full iterations.
// ============================================================================
/// Default number of iterations per decision.
pub const BUDGET_ITERATIONS: usize = 1000;

// ============================================================================
// MAST (Move-Average Sampling Technique)
// Per-player action values that survive across decisions.
// ============================================================================
/// Decay applied to stored visit counts at every new decision.
/// 1.0 keeps everything, values near 0 forget the previous decision.
pub const MAST_GAMMA: Probability = 0.5;
/// Softmax temperature over MAST means. Lower is greedier.
pub const MAST_BOLTZMANN: Entropy = 0.1;

// ============================================================================
// OPPONENT MOVE ABSTRACTION
// ============================================================================
/// Samples a conditioned (action, signature) tally needs before it is trusted
/// over the pooled estimate.
pub const OMA_VISITS: u32 = 30;

#[cfg(feature = "server")]
mod runtime;
#[cfg(feature = "server")]
pub use runtime::*;

/// Searches never stop early without the arena's stop conditions.
#[cfg(not(feature = "server"))]
pub fn interrupted() -> bool {
    false
}
