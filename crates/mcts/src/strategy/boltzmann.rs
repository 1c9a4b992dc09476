use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::SmallRng;
use tabletop_core::Entropy;
use tabletop_core::Utility;

/// Sample one choice with probability proportional to exp(score / temperature).
///
/// Scores are shifted by their maximum before exponentiation, so the best
/// choice always has weight 1. Degenerate weights (NaN scores) fall back to
/// a uniform pick.
pub fn boltzmann<E, F>(choices: &[E], score: F, temperature: Entropy, rng: &mut SmallRng) -> E
where
    E: Copy,
    F: Fn(&E) -> Utility,
{
    debug_assert!(!choices.is_empty());
    debug_assert!(temperature > 0.0);
    let scores = choices.iter().map(score).collect::<Vec<_>>();
    let max = scores.iter().copied().fold(Utility::MIN, Utility::max);
    let weights = scores
        .iter()
        .map(|s| ((s - max) / temperature).exp())
        .collect::<Vec<_>>();
    let i = WeightedIndex::new(weights)
        .map(|w| w.sample(rng))
        .unwrap_or_else(|_| rng.random_range(0..choices.len()));
    choices[i]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn hot_temperature_is_uniformish() {
        let ref mut rng = SmallRng::seed_from_u64(7);
        let choices = [0usize, 1, 2];
        let mut counts = [0usize; 3];
        for _ in 0..3000 {
            counts[boltzmann(&choices, |&c| c as Utility, 1000.0, rng)] += 1;
        }
        assert!(counts.iter().all(|&n| n > 800));
    }

    #[test]
    fn nan_scores_still_pick() {
        let ref mut rng = SmallRng::seed_from_u64(7);
        let pick = boltzmann(&['a', 'b'], |_| Utility::NAN, 1.0, rng);
        assert!(pick == 'a' || pick == 'b');
    }
}
