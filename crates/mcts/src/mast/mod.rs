mod entry;
mod rollout;
mod table;

pub use entry::*;
pub use rollout::*;
pub use table::*;
