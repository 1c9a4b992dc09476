use crate::*;
use std::collections::HashMap;
use tabletop_core::Utility;

/// Running count and sum of one player's rewards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tally {
    count: u32,
    total: Utility,
}

impl Tally {
    pub fn count(&self) -> u32 {
        self.count
    }
    pub fn total(&self) -> Utility {
        self.total
    }
    /// Mean reward, or None if nothing was recorded.
    pub fn mean(&self) -> Option<Utility> {
        match self.count {
            0 => None,
            n => Some(self.total / n as Utility),
        }
    }
    pub(crate) fn add(&mut self, value: Utility) {
        self.count += 1;
        self.total += value;
    }
}

/// Ordered opponent actions observed between two decisions of the same player.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature<E>(Vec<E>)
where
    E: MctsEdge;

impl<E> Signature<E>
where
    E: MctsEdge,
{
    pub fn edges(&self) -> &[E] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<E> From<Vec<E>> for Signature<E>
where
    E: MctsEdge,
{
    fn from(edges: Vec<E>) -> Self {
        Self(edges)
    }
}

impl<E> FromIterator<E> for Signature<E>
where
    E: MctsEdge,
{
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Opponent-move-abstraction statistics held by a vertex X of player p.
///
/// For every later decision Z of the same player below X, reached after p took
/// `a` at X and the opponents answered with `signature`, the table tallies p's
/// reward for p's action `b` at Z twice:
///
/// - pooled over every signature, keyed `(a, b)`: the unconditioned estimate
/// - per signature, keyed `(a, signature, b)`: the conditioned estimate
///
/// The conditioned estimate wins once it has enough samples, so opponent
/// dependent values are captured without trusting thinly sampled branches.
#[derive(Debug, Clone)]
pub struct OmaTable<E>
where
    E: MctsEdge,
{
    pooled: HashMap<(E, E), Tally>,
    conditioned: HashMap<(E, Signature<E>, E), Tally>,
}

impl<E> Default for OmaTable<E>
where
    E: MctsEdge,
{
    fn default() -> Self {
        Self {
            pooled: HashMap::new(),
            conditioned: HashMap::new(),
        }
    }
}

impl<E> OmaTable<E>
where
    E: MctsEdge,
{
    pub fn pooled(&self, a: E, b: E) -> Tally {
        self.pooled.get(&(a, b)).copied().unwrap_or_default()
    }
    pub fn conditioned(&self, a: E, signature: &Signature<E>, b: E) -> Tally {
        self.conditioned
            .get(&(a, signature.clone(), b))
            .copied()
            .unwrap_or_default()
    }
    /// Conditioned mean once it has `threshold` samples, pooled mean otherwise.
    pub fn estimate(&self, a: E, signature: &Signature<E>, b: E, threshold: u32) -> Option<Utility> {
        let conditioned = self.conditioned(a, signature, b);
        match conditioned.count() >= threshold.max(1) {
            true => conditioned.mean(),
            false => self.pooled(a, b).mean(),
        }
    }
    pub(crate) fn record(&mut self, a: E, signature: Signature<E>, b: E, value: Utility) {
        self.pooled.entry((a, b)).or_default().add(value);
        self.conditioned
            .entry((a, signature, b))
            .or_default()
            .add(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NimEdge;

    fn signature(edges: &[u8]) -> Signature<NimEdge> {
        edges.iter().copied().map(NimEdge::from).collect()
    }

    #[test]
    fn tally_mean() {
        let mut tally = Tally::default();
        assert_eq!(tally.mean(), None);
        tally.add(1.0);
        tally.add(0.0);
        assert_eq!(tally.count(), 2);
        assert_eq!(tally.mean(), Some(0.5));
    }

    #[test]
    fn thin_signature_falls_back_to_pooled() {
        let a = NimEdge::from(1);
        let b = NimEdge::from(2);
        let mut table = OmaTable::default();
        for _ in 0..10 {
            table.record(a, signature(&[1]), b, 1.0);
        }
        for _ in 0..3 {
            table.record(a, signature(&[3]), b, 0.0);
        }
        let thin = signature(&[3]);
        let pooled = table.pooled(a, b).mean();
        assert_eq!(table.conditioned(a, &thin, b).count(), 3);
        assert_eq!(table.estimate(a, &thin, b, 5), pooled);
        assert_eq!(pooled, Some(10.0 / 13.0));
    }

    #[test]
    fn thick_signature_is_conditioned() {
        let a = NimEdge::from(1);
        let b = NimEdge::from(2);
        let mut table = OmaTable::default();
        for _ in 0..10 {
            table.record(a, signature(&[1]), b, 1.0);
        }
        for _ in 0..3 {
            table.record(a, signature(&[3]), b, 0.0);
        }
        assert_eq!(table.estimate(a, &signature(&[1]), b, 5), Some(1.0));
        assert_eq!(table.conditioned(a, &signature(&[1]), b).count(), 10);
    }

    #[test]
    fn unseen_pair_has_no_estimate() {
        let table = OmaTable::<NimEdge>::default();
        let a = NimEdge::from(1);
        assert_eq!(table.estimate(a, &signature(&[]), a, 1), None);
    }
}
