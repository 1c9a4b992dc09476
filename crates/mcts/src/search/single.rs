use crate::*;
use petgraph::graph::NodeIndex;
use rand::Rng;
use tabletop_core::Seat;
use tabletop_core::Utility;

impl<'a, F> Search<'a, F>
where
    F: ForwardModel,
{
    /// One iteration over a shared tree.
    pub(crate) fn single(&mut self, tree: &mut Tree<F::G, F::E>) -> anyhow::Result<()> {
        let mut game = self.model.copy(tree.game());
        let mut node = tree.root();
        let mut trail = Vec::<(NodeIndex, F::E)>::new();
        let mut trajectory = Vec::<(Seat, F::E)>::new();
        loop {
            if tree.at(node).vertex().terminal() {
                break;
            }
            if self.model.terminal(&game) {
                tree.terminate(node);
                break;
            }
            let choices = self.model.choices(&game);
            if choices.is_empty() {
                tree.terminate(node);
                break;
            }
            if trail.len() >= self.params.max_depth {
                break;
            }
            let seat = game.player();
            let untried = choices
                .iter()
                .filter(|edge| tree.at(node).follow(edge).is_none())
                .copied()
                .collect::<Vec<_>>();
            if !untried.is_empty() {
                let edge = untried[self.rng.random_range(0..untried.len())];
                game = self.apply(&game, edge)?;
                let terminal = self.model.terminal(&game);
                let child = tree.grow(node, edge, game.player(), terminal);
                trail.push((node, edge));
                trajectory.push((seat, edge));
                node = child;
                break;
            }
            let edge = self.select(tree, &trail, node, &choices);
            game = self.apply(&game, edge)?;
            trail.push((node, edge));
            trajectory.push((seat, edge));
            node = match tree.at(node).follow(&edge) {
                Some(child) => child.index(),
                None => unreachable!("selected edges are expanded"),
            };
        }
        let reward = self.simulate(game, &mut trajectory)?;
        tree.backprop(node, &reward);
        self.remember(&trajectory, &reward);
        Ok(())
    }

    /// Best child under the tree policy among actions legal right now,
    /// scored for the seat deciding at `node`. Earlier choices win ties.
    pub(crate) fn select(
        &self,
        tree: &Tree<F::G, F::E>,
        trail: &[(NodeIndex, F::E)],
        node: NodeIndex,
        choices: &[F::E],
    ) -> F::E {
        let parent = tree.at(node);
        let seat = parent.seat();
        let abstracts =
            tree.kind() == NodeKind::Oma && self.params.mode.abstracts(seat, self.hero);
        let mut best = (choices[0], Utility::NEG_INFINITY);
        for edge in choices {
            let Some(child) = parent.follow(edge) else {
                continue;
            };
            let mean = match abstracts {
                true => tree
                    .abstracted(trail, node, *edge, self.params.oma_visits)
                    .unwrap_or_else(|| child.vertex().mean(seat)),
                false => child.vertex().mean(seat),
            };
            let score = self.policy.score(mean, child.visits(), parent.visits());
            if score > best.1 {
                best = (*edge, score);
            }
        }
        best.0
    }
}
