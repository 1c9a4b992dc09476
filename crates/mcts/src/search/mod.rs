//! The four-phase search loop and its configuration.
//!
//! A [`Search`] borrows everything one decision needs (forward model,
//! strategies, MAST table, rng) and drives a [`Root`] until its [`Budget`]
//! runs out. Each iteration replays actions from a copy of the root state:
//!
//! 1. **Selection**: descend fully expanded nodes by [`TreePolicy`]
//! 2. **Expansion**: add one random untried action
//! 3. **Simulation**: roll out with the rollout policy or opponent model
//! 4. **Backpropagation**: credit the path and the MAST table

mod backup;
mod budget;
mod multi;
mod policy;
mod root;
mod search;
mod single;

pub use backup::*;
pub use budget::*;
pub use multi::*;
pub use policy::*;
pub use root::*;
pub use search::*;
