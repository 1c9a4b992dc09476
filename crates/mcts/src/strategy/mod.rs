mod boltzmann;
mod heuristic;
mod processor;
mod rollout;

pub use boltzmann::*;
pub use heuristic::*;
pub use processor::*;
pub use rollout::*;
