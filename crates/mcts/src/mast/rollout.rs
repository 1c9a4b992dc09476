use crate::*;
use rand::rngs::SmallRng;
use tabletop_core::Entropy;

/// Rollout policy sampling by softmax over the acting seat's MAST means.
///
/// Lower temperatures approach greedy play on the best remembered action;
/// with an empty table every action is equally likely.
#[derive(Debug, Clone, Copy)]
pub struct MastRollout {
    temperature: Entropy,
}

impl MastRollout {
    pub fn new(temperature: Entropy) -> Self {
        Self { temperature }
    }
    pub fn temperature(&self) -> Entropy {
        self.temperature
    }
}

impl Default for MastRollout {
    fn default() -> Self {
        Self::new(tabletop_core::MAST_BOLTZMANN)
    }
}

impl<G, E> RolloutPolicy<G, E> for MastRollout
where
    G: MctsGame,
    E: MctsEdge,
{
    fn choose(&mut self, game: &G, choices: &[E], mast: &Mast<E>, rng: &mut SmallRng) -> E {
        let seat = game.player();
        boltzmann(choices, |e| mast.mean(seat, e), self.temperature, rng)
    }
}
