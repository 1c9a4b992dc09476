use crate::*;
use petgraph::graph::NodeIndex;
use rand::Rng;
use tabletop_core::Seat;

/// One tree per seat, each holding only that seat's decisions.
///
/// Every iteration walks all trees in lock-step along a single simulated
/// game: whenever a seat acts, its own tree selects or expands, and once a
/// tree has expanded it stays out of play until the next iteration.
#[derive(Debug)]
pub struct MultiTree<G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    trees: Vec<Tree<G, E>>,
    hero: Seat,
}

impl<G, E> MultiTree<G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    pub fn new(kind: NodeKind, game: G, hero: Seat) -> Self {
        let trees = (0..game.players())
            .map(|seat| Tree::owned(kind, game.clone(), seat))
            .collect();
        Self { trees, hero }
    }
    pub fn hero(&self) -> Seat {
        self.hero
    }
    pub fn tree(&self, seat: Seat) -> &Tree<G, E> {
        &self.trees[seat]
    }
    pub fn tree_mut(&mut self, seat: Seat) -> &mut Tree<G, E> {
        &mut self.trees[seat]
    }
    pub fn trees(&self) -> &[Tree<G, E>] {
        &self.trees
    }
    /// Best root action for `seat`, read from that seat's tree alone.
    pub fn best(&self, seat: Seat, choices: &[E]) -> anyhow::Result<E> {
        self.tree(seat).best_action(choices)
    }
}

/// Where one seat's tree stands during an iteration.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    node: NodeIndex,
    inside: bool,
}

impl<'a, F> Search<'a, F>
where
    F: ForwardModel,
{
    /// One lock-step iteration over every seat's tree. Only moves made
    /// outside a seat's tree count against the rollout length.
    pub(crate) fn multi(&mut self, forest: &mut MultiTree<F::G, F::E>) -> anyhow::Result<()> {
        let mut game = self.model.copy(forest.tree(forest.hero()).game());
        let mut cursors = forest
            .trees()
            .iter()
            .map(|tree| Cursor {
                node: tree.root(),
                inside: true,
            })
            .collect::<Vec<_>>();
        let mut trajectory = Vec::<(Seat, F::E)>::new();
        let mut outside = 0;
        loop {
            if self.model.terminal(&game) {
                break;
            }
            let choices = self.model.choices(&game);
            if choices.is_empty() {
                break;
            }
            let seat = game.player();
            let cursor = cursors[seat];
            let edge = match cursor.inside {
                true => {
                    let tree = forest.tree_mut(seat);
                    let (edge, next) = self.descend(tree, cursor.node, &choices);
                    cursors[seat] = next;
                    edge
                }
                false if outside < self.params.rollout_length => {
                    outside += 1;
                    self.play(&game, &choices)
                }
                false => break,
            };
            game = self.apply(&game, edge)?;
            trajectory.push((seat, edge));
        }
        let reward = self.evaluate(&game);
        let backed = self.params.mode.backup().apply(&reward, self.hero);
        for (seat, cursor) in cursors.iter().enumerate() {
            forest.tree_mut(seat).backprop(cursor.node, &backed);
        }
        self.remember(&trajectory, &reward);
        Ok(())
    }

    /// Select or expand one step inside a seat's own tree.
    fn descend(
        &mut self,
        tree: &mut Tree<F::G, F::E>,
        node: NodeIndex,
        choices: &[F::E],
    ) -> (F::E, Cursor) {
        let owner = tree.at(node).seat();
        let untried = choices
            .iter()
            .filter(|edge| tree.at(node).follow(edge).is_none())
            .copied()
            .collect::<Vec<_>>();
        if !untried.is_empty() {
            let edge = untried[self.rng.random_range(0..untried.len())];
            let child = tree.grow(node, edge, owner, false);
            let cursor = Cursor {
                node: child,
                inside: false,
            };
            return (edge, cursor);
        }
        let edge = self.select(tree, &[], node, choices);
        let child = match tree.at(node).follow(&edge) {
            Some(child) => child.index(),
            None => unreachable!("selected edges are expanded"),
        };
        let cursor = Cursor {
            node: child,
            inside: tree.at(child).depth() < self.params.max_depth,
        };
        (edge, cursor)
    }
}
