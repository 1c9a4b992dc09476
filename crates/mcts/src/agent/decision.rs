use crate::*;
use tabletop_core::Probability;
use tabletop_core::Utility;

/// What the last search learned about one root action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionStats<E>
where
    E: MctsEdge,
{
    pub edge: E,
    pub visits: u32,
    /// Share of all root visits.
    pub share: Probability,
    /// Mean value for the deciding seat.
    pub mean: Utility,
    /// State heuristic of the decision state for the deciding seat, if a
    /// heuristic is configured. Identical across every action.
    pub heuristic: Option<Utility>,
    /// Action heuristic at the root, if an advantage function is configured.
    pub advantage: Option<Utility>,
}

impl<E> std::fmt::Display for ActionStats<E>
where
    E: MctsEdge,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<12}{:<10}{:<10.3}{:<10.3}",
            format!("{:?}", self.edge),
            self.visits,
            self.share,
            self.mean
        )?;
        if let Some(h) = self.heuristic {
            write!(f, "h={:<8.3}", h)?;
        }
        if let Some(a) = self.advantage {
            write!(f, "a={:<8.3}", a)?;
        }
        Ok(())
    }
}
