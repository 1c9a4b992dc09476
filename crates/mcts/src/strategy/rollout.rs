use crate::*;
use rand::Rng;
use rand::rngs::SmallRng;
use tabletop_core::Entropy;

/// Picks actions once a simulation has left the tree.
///
/// Serves both as the rollout policy for the searching seat and as the
/// opponent model for everyone else. `choices` is never empty.
pub trait RolloutPolicy<G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    fn choose(&mut self, game: &G, choices: &[E], mast: &Mast<E>, rng: &mut SmallRng) -> E;
    fn processor(&mut self) -> Option<&mut dyn TreeProcessor<G, E>> {
        None
    }
}

/// Uniformly random play.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRollout;

impl<G, E> RolloutPolicy<G, E> for RandomRollout
where
    G: MctsGame,
    E: MctsEdge,
{
    fn choose(&mut self, _: &G, choices: &[E], _: &Mast<E>, rng: &mut SmallRng) -> E {
        choices[rng.random_range(0..choices.len())]
    }
}

/// Softmax over an action heuristic.
pub struct HeuristicRollout<G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    heuristic: Box<dyn ActionHeuristic<G, E>>,
    temperature: Entropy,
}

impl<G, E> HeuristicRollout<G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    pub fn new(heuristic: Box<dyn ActionHeuristic<G, E>>, temperature: Entropy) -> Self {
        Self {
            heuristic,
            temperature,
        }
    }
}

impl<G, E> RolloutPolicy<G, E> for HeuristicRollout<G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    fn choose(&mut self, game: &G, choices: &[E], _: &Mast<E>, rng: &mut SmallRng) -> E {
        let heuristic = &self.heuristic;
        boltzmann(choices, |e| heuristic.evaluate(e, game), self.temperature, rng)
    }
    fn processor(&mut self) -> Option<&mut dyn TreeProcessor<G, E>> {
        self.heuristic.processor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    struct Greedy;
    impl ActionHeuristic<NimGame, NimEdge> for Greedy {
        fn evaluate(&self, edge: &NimEdge, _: &NimGame) -> tabletop_core::Utility {
            edge.stones() as tabletop_core::Utility
        }
    }

    #[test]
    fn random_rollout_stays_legal() {
        let game = NimGame::new(3, 2);
        let choices = Nim.choices(&game);
        let ref mut rng = SmallRng::seed_from_u64(3);
        let mast = Mast::default();
        for _ in 0..50 {
            let pick = RandomRollout.choose(&game, &choices, &mast, rng);
            assert!(choices.contains(&pick));
        }
    }

    #[test]
    fn heuristic_rollout_follows_heuristic() {
        let game = NimGame::new(2, 9);
        let choices = Nim.choices(&game);
        let ref mut rng = SmallRng::seed_from_u64(3);
        let ref mut policy = HeuristicRollout::new(Box::new(Greedy), 0.01);
        let pick = policy.choose(&game, &choices, &Mast::default(), rng);
        assert_eq!(pick, NimEdge::from(3));
        assert!(RolloutPolicy::processor(policy).is_none());
    }
}
