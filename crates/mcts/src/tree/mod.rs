//! Search tree storage.
//!
//! Trees live in a petgraph arena: vertices carry statistics, arcs carry the
//! action taken. Parent and child links are indices, so backpropagation walks
//! incoming arcs without any ownership cycle.
//!
//! - [`Tree`]: arena, growth, backpropagation, final action choice
//! - [`Node`]: borrowed navigation handle
//! - [`Vertex`]: per-node statistics
//! - [`OmaTable`]: opponent-move-abstraction tallies
//! - [`NodeKind`]: which ledger every vertex of a tree carries

mod kind;
mod node;
mod oma;
mod tree;
mod vertex;

pub use kind::*;
pub use node::*;
pub use oma::*;
pub use tree::*;
pub use vertex::*;
