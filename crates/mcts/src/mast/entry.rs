use tabletop_core::Probability;
use tabletop_core::Utility;

/// Decaying visit count and running mean reward of one action.
///
/// Visits are real-valued so that old evidence can fade geometrically
/// while the mean it produced stays put.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MastEntry {
    visits: Probability,
    mean: Utility,
}

impl MastEntry {
    pub fn new(visits: Probability, mean: Utility) -> Self {
        Self { visits, mean }
    }
    pub fn visits(&self) -> Probability {
        self.visits
    }
    pub fn mean(&self) -> Utility {
        self.mean
    }
    /// Scale evidence by `gamma` without moving the mean.
    pub fn decay(&mut self, gamma: Probability) {
        self.visits *= gamma;
    }
    /// Pool two entries: visits add, means combine weighted by visits.
    pub fn merge(&mut self, other: &Self) {
        let visits = self.visits + other.visits;
        if visits > 0.0 {
            self.mean = (self.visits * self.mean + other.visits * other.mean) / visits;
        }
        self.visits = visits;
    }
    /// Fold in a single reward sample.
    pub fn observe(&mut self, reward: Utility) {
        self.merge(&Self::new(1.0, reward));
    }
}

impl std::fmt::Display for MastEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}@{:.1}", self.mean, self.visits)
    }
}
