use crate::*;

/// Post-search hook run on the finished tree before the root action is chosen.
///
/// Strategies that learn from search results (value targets, policy
/// statistics, ...) expose one of these through their `processor()` accessor.
pub trait TreeProcessor<G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    fn process(&mut self, tree: &Tree<G, E>);
}

/// Strategy slot whose processor runs after every search.
///
/// Resolved once when the agent is built, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Advantage,
    Rollout,
    Heuristic,
    Opponent,
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Advantage => write!(f, "advantage"),
            Self::Rollout => write!(f, "rollout"),
            Self::Heuristic => write!(f, "heuristic"),
            Self::Opponent => write!(f, "opponent"),
        }
    }
}
