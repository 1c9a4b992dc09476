//! The decision-making front end.
//!
//! - [`AgentBuilder`]: assembles strategies and validates configuration
//! - [`Agent`]: runs one search per decision and keeps MAST between them
//! - [`ActionStats`]: per-action diagnostics of the last decision
//! - [`ExpertIteration`]: optional training-data export

mod agent;
mod builder;
mod decision;
mod export;
mod params;

pub use agent::*;
pub use builder::*;
pub use decision::*;
pub use export::*;
pub use params::*;
