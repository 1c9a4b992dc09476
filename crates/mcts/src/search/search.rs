use crate::*;
use rand::rngs::SmallRng;
use std::time::Instant;
use tabletop_core::Seat;
use tabletop_core::Utility;

/// Everything one decision's search borrows.
///
/// Built fresh per decision by the agent; the MAST table it writes into is
/// the agent's own, already decayed.
pub struct Search<'a, F>
where
    F: ForwardModel,
{
    pub(crate) model: &'a F,
    pub(crate) params: &'a MctsParams,
    pub(crate) hero: Seat,
    pub(crate) rollout: &'a mut dyn RolloutPolicy<F::G, F::E>,
    pub(crate) opponent: &'a mut dyn RolloutPolicy<F::G, F::E>,
    pub(crate) heuristic: Option<&'a dyn StateHeuristic<F::G, F::E>>,
    pub(crate) mast: &'a mut Mast<F::E>,
    pub(crate) rng: &'a mut SmallRng,
    pub(crate) policy: &'a dyn TreePolicy,
    calls: usize,
}

impl<'a, F> Search<'a, F>
where
    F: ForwardModel,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        model: &'a F,
        params: &'a MctsParams,
        hero: Seat,
        policy: &'a dyn TreePolicy,
        rollout: &'a mut dyn RolloutPolicy<F::G, F::E>,
        opponent: &'a mut dyn RolloutPolicy<F::G, F::E>,
        heuristic: Option<&'a dyn StateHeuristic<F::G, F::E>>,
        mast: &'a mut Mast<F::E>,
        rng: &'a mut SmallRng,
    ) -> Self {
        Self {
            model,
            params,
            hero,
            policy,
            rollout,
            opponent,
            heuristic,
            mast,
            rng,
            calls: 0,
        }
    }

    /// Forward-model transitions so far.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Iterate until the budget runs out or an interrupt is requested.
    pub fn run(&mut self, root: &mut Root<F::G, F::E>) -> anyhow::Result<SearchStats> {
        let start = Instant::now();
        let mut iterations = 0;
        loop {
            match root {
                Root::Single(tree) => self.single(tree)?,
                Root::Multi(forest) => self.multi(forest)?,
            }
            iterations += 1;
            if self
                .params
                .budget
                .exhausted(iterations, self.calls, start.elapsed())
            {
                break;
            }
            if tabletop_core::interrupted() {
                log::warn!("search interrupted after {} iterations", iterations);
                break;
            }
        }
        Ok(SearchStats {
            iterations,
            nodes: root.nodes(),
            calls: self.calls,
            elapsed: start.elapsed(),
        })
    }

    /// Counted transition on a private copy.
    pub(crate) fn apply(&mut self, game: &F::G, edge: F::E) -> anyhow::Result<F::G> {
        self.calls += 1;
        self.model.apply(game, edge)
    }

    /// Out-of-tree pick: rollout policy for the hero, opponent model otherwise.
    pub(crate) fn play(&mut self, game: &F::G, choices: &[F::E]) -> F::E {
        match game.player() == self.hero {
            true => self.rollout.choose(game, choices, self.mast, self.rng),
            false => self.opponent.choose(game, choices, self.mast, self.rng),
        }
    }

    /// Play out from `game` until terminal or the rollout length is spent,
    /// appending every action to `trajectory`, then score the final state.
    pub(crate) fn simulate(
        &mut self,
        mut game: F::G,
        trajectory: &mut Vec<(Seat, F::E)>,
    ) -> anyhow::Result<Vec<Utility>> {
        for _ in 0..self.params.rollout_length {
            if self.model.terminal(&game) {
                break;
            }
            let choices = self.model.choices(&game);
            if choices.is_empty() {
                break;
            }
            let seat = game.player();
            let edge = self.play(&game, &choices);
            game = self.apply(&game, edge)?;
            trajectory.push((seat, edge));
        }
        Ok(self.evaluate(&game))
    }

    /// Terminal states take the forward model's payoff; cut-off states
    /// prefer the state heuristic when one is configured.
    pub(crate) fn evaluate(&self, game: &F::G) -> Vec<Utility> {
        match (self.model.terminal(game), self.heuristic) {
            (false, Some(heuristic)) => (0..game.players())
                .map(|seat| heuristic.evaluate(game, seat))
                .collect(),
            _ => self.model.rewards(game),
        }
    }

    /// Fold a finished simulation into the MAST table.
    pub(crate) fn remember(&mut self, trajectory: &[(Seat, F::E)], reward: &[Utility]) {
        for (seat, edge) in trajectory {
            self.mast.observe(*seat, *edge, reward[*seat]);
        }
    }
}
