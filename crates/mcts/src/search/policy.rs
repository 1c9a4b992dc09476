use tabletop_core::Utility;

/// Scores a child during selection; the highest score is descended.
pub trait TreePolicy {
    /// `mean` is the child's value for the deciding seat, `visits` its visit
    /// count, and `parent` the visit count of the node being descended from.
    fn score(&self, mean: Utility, visits: u32, parent: u32) -> Utility;
}

/// Upper confidence bound: mean + k * sqrt(ln(N) / n).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ucb1 {
    k: Utility,
}

impl Ucb1 {
    pub fn new(k: Utility) -> Self {
        Self { k }
    }
}

impl Default for Ucb1 {
    fn default() -> Self {
        Self::new(tabletop_core::EXPLORATION)
    }
}

impl TreePolicy for Ucb1 {
    fn score(&self, mean: Utility, visits: u32, parent: u32) -> Utility {
        match visits {
            0 => Utility::INFINITY,
            n => {
                let explore = (parent.max(1) as Utility).ln() / n as Utility;
                mean + self.k * explore.sqrt()
            }
        }
    }
}
