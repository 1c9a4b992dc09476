use crate::*;
use std::collections::HashMap;
use tabletop_core::Probability;
use tabletop_core::Seat;
use tabletop_core::Utility;

/// Per-player action values that outlive any single search tree.
///
/// One map per seat, grown on demand. The agent owns it between decisions;
/// each search borrows it decayed and folds every simulated (seat, action)
/// reward back in during backpropagation.
#[derive(Debug, Clone)]
pub struct Mast<E>
where
    E: MctsEdge,
{
    seats: Vec<HashMap<E, MastEntry>>,
}

impl<E> Default for Mast<E>
where
    E: MctsEdge,
{
    fn default() -> Self {
        Self { seats: Vec::new() }
    }
}

impl<E> Mast<E>
where
    E: MctsEdge,
{
    pub fn get(&self, seat: Seat, edge: &E) -> Option<&MastEntry> {
        self.seats.get(seat).and_then(|table| table.get(edge))
    }
    /// Mean reward of `edge` for `seat`; unseen actions count as 0.
    pub fn mean(&self, seat: Seat, edge: &E) -> Utility {
        self.get(seat, edge).map(MastEntry::mean).unwrap_or_default()
    }
    /// Fold one reward for `seat` taking `edge`.
    pub fn observe(&mut self, seat: Seat, edge: E, reward: Utility) {
        self.table(seat).entry(edge).or_default().observe(reward);
    }
    /// Scale every stored visit count by `gamma`.
    pub fn decay(&mut self, gamma: Probability) {
        self.seats
            .iter_mut()
            .flat_map(|table| table.values_mut())
            .for_each(|entry| entry.decay(gamma));
    }
    pub fn decayed(mut self, gamma: Probability) -> Self {
        self.decay(gamma);
        self
    }
    /// Number of (seat, action) entries.
    pub fn len(&self) -> usize {
        self.seats.iter().map(HashMap::len).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn clear(&mut self) {
        self.seats.clear();
    }
    fn table(&mut self, seat: Seat) -> &mut HashMap<E, MastEntry> {
        if self.seats.len() <= seat {
            self.seats.resize_with(seat + 1, HashMap::new);
        }
        &mut self.seats[seat]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NimEdge;

    #[test]
    fn unseen_actions_are_neutral() {
        let mast = Mast::<NimEdge>::default();
        assert_eq!(mast.mean(3, &NimEdge::from(1)), 0.0);
        assert!(mast.is_empty());
    }

    #[test]
    fn seats_are_independent() {
        let mut mast = Mast::default();
        mast.observe(0, NimEdge::from(1), 1.0);
        mast.observe(2, NimEdge::from(1), 0.0);
        assert_eq!(mast.mean(0, &NimEdge::from(1)), 1.0);
        assert_eq!(mast.mean(1, &NimEdge::from(1)), 0.0);
        assert_eq!(mast.mean(2, &NimEdge::from(1)), 0.0);
        assert_eq!(mast.len(), 2);
    }

    #[test]
    fn decay_without_new_data() {
        let mut mast = Mast::default();
        let edge = NimEdge::from(2);
        for _ in 0..10 {
            mast.observe(0, edge, 5.0);
        }
        let mast = mast.decayed(0.9);
        let entry = mast.get(0, &edge).copied().unwrap();
        assert!((entry.visits() - 9.0).abs() < 1e-4);
        assert!((entry.mean() - 5.0).abs() < 1e-5);
    }
}
