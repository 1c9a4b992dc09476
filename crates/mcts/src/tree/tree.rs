use crate::*;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use tabletop_core::Seat;
use tabletop_core::Utility;

/// Aggregated statistics for one root action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary<E>
where
    E: MctsEdge,
{
    pub edge: E,
    pub visits: u32,
    pub mean: Utility,
}

/// A search tree grown one vertex per iteration.
///
/// Internally wraps a petgraph `DiGraph`. Vertices carry [`Vertex`]
/// statistics; arcs are labeled with the action taken. The root is always
/// index 0 and is the only vertex holding a state snapshot.
///
/// # Growth
///
/// - `grow(parent, edge, seat, terminal)`: add one child
/// - `backprop(leaf, reward)`: credit a finished simulation to the path
///
/// # Reading
///
/// - `at(index)`: navigation handle
/// - `summary(choices)` / `best_action(choices)`: final root decision
/// - `postorder()`: leaves-first traversal
#[derive(Debug)]
pub struct Tree<G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    graph: DiGraph<Vertex<G, E>, E>,
    kind: NodeKind,
    players: usize,
}

impl<G, E> Tree<G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    /// Seed a tree with a root bound to `game`, decided by its acting player.
    pub fn new(kind: NodeKind, game: G, terminal: bool) -> Self {
        let seat = game.player();
        Self::seeded(kind, game, seat, terminal)
    }
    /// Seed a tree whose vertices all belong to `seat`, whoever acts at the root.
    pub fn owned(kind: NodeKind, game: G, seat: Seat) -> Self {
        Self::seeded(kind, game, seat, false)
    }
    fn seeded(kind: NodeKind, game: G, seat: Seat, terminal: bool) -> Self {
        let players = game.players();
        let mut graph = DiGraph::default();
        graph.add_node(Vertex::seeded(game, seat, terminal, kind));
        Self {
            graph,
            kind,
            players,
        }
    }
    pub fn kind(&self) -> NodeKind {
        self.kind
    }
    pub fn players(&self) -> usize {
        self.players
    }
    /// Number of vertices in the tree.
    pub fn n(&self) -> usize {
        self.graph.node_count()
    }
    pub fn root(&self) -> NodeIndex {
        NodeIndex::new(0)
    }
    /// get a Node by index
    pub fn at(&self, index: NodeIndex) -> Node<'_, G, E> {
        Node::from(index, &self.graph)
    }
    /// get all Nodes in the Tree
    pub fn all(&self) -> impl Iterator<Item = Node<'_, G, E>> {
        self.graph.node_indices().map(|n| self.at(n))
    }
    /// The state the root was bound to.
    pub fn game(&self) -> &G {
        self.graph[self.root()]
            .game()
            .expect("root always holds a state")
    }

    /// extend the Tree by one child of `parent`
    pub fn grow(&mut self, parent: NodeIndex, edge: E, seat: Seat, terminal: bool) -> NodeIndex {
        debug_assert!(self.at(parent).follow(&edge).is_none(), "one slot per action");
        let child = self
            .graph
            .add_node(Vertex::new(seat, self.players, terminal, self.kind));
        self.graph.add_edge(parent, child, edge);
        child
    }
    /// Mark a vertex terminal once its state turns out to have no choices.
    pub fn terminate(&mut self, index: NodeIndex) {
        self.graph[index].terminate();
    }

    /// Credit one finished simulation to every vertex from `leaf` to the root.
    pub fn backprop(&mut self, leaf: NodeIndex, reward: &[Utility]) {
        debug_assert!(reward.len() == self.players);
        if self.kind == NodeKind::Oma {
            self.abstraction(leaf, reward);
        }
        self.graph[leaf].halt();
        let mut cursor = Some(leaf);
        while let Some(index) = cursor {
            self.graph[index].absorb(reward);
            cursor = self.at(index).parent().map(|p| p.index());
        }
    }

    /// Root-first list of (vertex, action taken there) leading to `leaf`.
    pub fn path(&self, leaf: NodeIndex) -> Vec<(NodeIndex, E)> {
        let mut path = self
            .at(leaf)
            .map(|(node, edge)| (node.index(), edge))
            .collect::<Vec<_>>();
        path.reverse();
        path
    }

    /// Opponent-move-abstracted value of `edge` at `node`, given the
    /// root-first trail that led to it.
    pub fn abstracted(
        &self,
        trail: &[(NodeIndex, E)],
        node: NodeIndex,
        edge: E,
        threshold: u32,
    ) -> Option<Utility> {
        let seat = self.graph[node].seat();
        let j = trail
            .iter()
            .rposition(|(x, _)| self.graph[*x].seat() == seat)?;
        let (parent, taken) = trail[j];
        let signature = trail[j + 1..]
            .iter()
            .map(|(_, e)| *e)
            .collect::<Signature<E>>();
        self.graph[parent]
            .oma()?
            .estimate(taken, &signature, edge, threshold)
    }

    /// Record every same-player (action, signature, follow-up) triple on the
    /// path to `leaf` in the OMA table of the earlier decision.
    fn abstraction(&mut self, leaf: NodeIndex, reward: &[Utility]) {
        let path = self.path(leaf);
        for (i, (z, b)) in path.iter().enumerate() {
            let seat = self.graph[*z].seat();
            let Some(j) = path[..i]
                .iter()
                .rposition(|(x, _)| self.graph[*x].seat() == seat)
            else {
                continue;
            };
            let (x, a) = path[j];
            let signature = path[j + 1..i]
                .iter()
                .map(|(_, e)| *e)
                .collect::<Signature<E>>();
            if let Some(table) = self.graph[x].oma_mut() {
                table.record(a, signature, *b, reward[seat]);
            }
        }
    }

    /// Per-action statistics at the root, in the order `choices` were given.
    ///
    /// Every child slot reached by an action contributes: visits are summed
    /// and the mean is visit-weighted, read from the root player's seat.
    pub fn summary(&self, choices: &[E]) -> Vec<Summary<E>> {
        let root = self.at(self.root());
        let seat = root.seat();
        choices
            .iter()
            .map(|edge| {
                let slots = root.slots(edge);
                let visits = slots.iter().map(|n| n.visits()).sum::<u32>();
                let value = slots
                    .iter()
                    .map(|n| n.vertex().value(seat))
                    .sum::<Utility>();
                let mean = match visits {
                    0 => 0.0,
                    n => value / n as Utility,
                };
                Summary {
                    edge: *edge,
                    visits,
                    mean,
                }
            })
            .collect()
    }

    /// Highest mean root action; ties go to more visits, then to the
    /// earlier position in `choices`.
    ///
    /// More root children than twice the legal actions means two distinct
    /// choices collided on one identity (or one choice was generated under
    /// many identities), and no selection can be trusted.
    pub fn best_action(&self, choices: &[E]) -> anyhow::Result<E> {
        let width = self.at(self.root()).width();
        anyhow::ensure!(
            width <= 2 * choices.len(),
            "unexpectedly large number of children: {} with action size of {}",
            width,
            choices.len()
        );
        self.summary(choices)
            .into_iter()
            .enumerate()
            .filter(|(_, s)| s.visits > 0)
            .max_by(|(i, x), (j, y)| {
                x.mean
                    .total_cmp(&y.mean)
                    .then(x.visits.cmp(&y.visits))
                    .then(j.cmp(i))
            })
            .map(|(_, s)| s.edge)
            .ok_or_else(|| anyhow::anyhow!("none of {} root actions explored", choices.len()))
    }

    /// Iterate nodes in postorder (leaves first) for bottom-up traversal.
    pub fn postorder(&self) -> Vec<NodeIndex> {
        let mut result = Vec::with_capacity(self.n());
        let mut stack = vec![(self.root(), false)];
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                result.push(node);
            } else {
                stack.push((node, true));
                for child in self.at(node).children() {
                    stack.push((child.index(), false));
                }
            }
        }
        result
    }

    /// display the Tree in a human-readable format
    /// be careful because it's really big and recursive
    fn show(&self, f: &mut std::fmt::Formatter, x: NodeIndex, prefix: &str) -> std::fmt::Result {
        if x == self.root() {
            writeln!(f, "\nROOT   {}", self.graph[x])?;
        }
        let children = self.at(x).children();
        let n = children.len();
        for (i, child) in children.into_iter().rev().enumerate() {
            let last = i == n - 1;
            let gaps = if last { "    " } else { "│   " };
            let stem = if last { "└" } else { "├" };
            if let Some(edge) = child.incoming() {
                writeln!(f, "{}{}──{:?} → {}", prefix, stem, edge, child.vertex())?;
            }
            self.show(f, child.index(), &format!("{}{}", prefix, gaps))?;
        }
        Ok(())
    }
}

impl<G, E> std::fmt::Display for Tree<G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.show(f, self.root(), "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NimEdge;
    use crate::NimGame;

    fn tree(kind: NodeKind) -> Tree<NimGame, NimEdge> {
        Tree::new(kind, NimGame::new(2, 9), false)
    }

    fn credit(tree: &mut Tree<NimGame, NimEdge>, leaf: NodeIndex, times: usize, value: Utility) {
        for _ in 0..times {
            tree.backprop(leaf, &[value, 1.0 - value]);
        }
    }

    #[test]
    fn ties_prefer_more_visits() {
        let mut tree = tree(NodeKind::Plain);
        let a = NimEdge::from(1);
        let b = NimEdge::from(2);
        let x = tree.grow(tree.root(), a, 1, false);
        let y = tree.grow(tree.root(), b, 1, false);
        credit(&mut tree, x, 10, 2.0);
        credit(&mut tree, y, 12, 2.0);
        assert_eq!(tree.best_action(&[a, b]).unwrap(), b);
        assert_eq!(tree.best_action(&[b, a]).unwrap(), b);
    }

    #[test]
    fn full_ties_prefer_earlier_choice() {
        let mut tree = tree(NodeKind::Plain);
        let a = NimEdge::from(1);
        let b = NimEdge::from(2);
        let x = tree.grow(tree.root(), a, 1, false);
        let y = tree.grow(tree.root(), b, 1, false);
        credit(&mut tree, x, 4, 1.0);
        credit(&mut tree, y, 4, 1.0);
        assert_eq!(tree.best_action(&[a, b]).unwrap(), a);
        assert_eq!(tree.best_action(&[b, a]).unwrap(), b);
    }

    #[test]
    fn higher_mean_beats_more_visits() {
        let mut tree = tree(NodeKind::Plain);
        let a = NimEdge::from(1);
        let b = NimEdge::from(3);
        let x = tree.grow(tree.root(), a, 1, false);
        let y = tree.grow(tree.root(), b, 1, false);
        credit(&mut tree, x, 3, 1.0);
        credit(&mut tree, y, 30, 0.5);
        assert_eq!(tree.best_action(&[a, b]).unwrap(), a);
    }

    #[test]
    fn too_many_children_is_fatal() {
        let mut tree = tree(NodeKind::Plain);
        for take in 1..=3 {
            let child = tree.grow(tree.root(), NimEdge::from(take), 1, false);
            credit(&mut tree, child, 1, 1.0);
        }
        let error = tree.best_action(&[NimEdge::from(1)]).unwrap_err();
        assert!(error.to_string().contains("unexpectedly large number of children"));
        assert!(tree.best_action(&[NimEdge::from(1), NimEdge::from(2)]).is_ok());
    }

    #[test]
    fn unexplored_root_is_an_error() {
        let tree = tree(NodeKind::Plain);
        assert!(tree.best_action(&[NimEdge::from(1)]).is_err());
    }

    #[test]
    fn backprop_counts_visits_and_halts() {
        let mut tree = tree(NodeKind::Plain);
        let x = tree.grow(tree.root(), NimEdge::from(1), 1, false);
        let y = tree.grow(x, NimEdge::from(2), 0, false);
        tree.backprop(x, &[1.0, 0.0]);
        tree.backprop(y, &[0.0, 1.0]);
        tree.backprop(y, &[0.0, 1.0]);
        let root = tree.at(tree.root());
        assert_eq!(root.visits(), 3);
        assert_eq!(root.vertex().total(), &[1.0, 2.0]);
        assert_eq!(tree.at(x).visits(), 3);
        assert_eq!(tree.at(x).vertex().halts(), 1);
        assert_eq!(tree.at(y).vertex().halts(), 2);
        for index in tree.postorder() {
            let node = tree.at(index);
            let below = node.children().iter().map(|c| c.visits()).sum::<u32>();
            assert_eq!(node.visits(), below + node.vertex().halts());
        }
    }

    #[test]
    fn path_runs_root_first() {
        let mut tree = tree(NodeKind::Plain);
        let x = tree.grow(tree.root(), NimEdge::from(1), 1, false);
        let y = tree.grow(x, NimEdge::from(3), 0, false);
        let path = tree.path(y);
        assert_eq!(
            path,
            vec![(tree.root(), NimEdge::from(1)), (x, NimEdge::from(3))]
        );
        assert_eq!(tree.at(y).depth(), 2);
    }

    #[test]
    fn oma_records_follow_ups_at_earlier_decision() {
        // P0 takes 1, P1 answers 2, P0 follows with 3.
        let mut tree = tree(NodeKind::Oma);
        let root = tree.root();
        let x = tree.grow(root, NimEdge::from(1), 1, false);
        let y = tree.grow(x, NimEdge::from(2), 0, false);
        let z = tree.grow(y, NimEdge::from(3), 1, true);
        tree.backprop(z, &[1.0, 0.0]);
        let table = tree.at(root).vertex().oma().expect("oma ledger");
        let signature = Signature::from(vec![NimEdge::from(2)]);
        let tally = table.conditioned(NimEdge::from(1), &signature, NimEdge::from(3));
        assert_eq!(tally.count(), 1);
        assert_eq!(tally.mean(), Some(1.0));
        let trail = tree.path(y);
        assert_eq!(
            tree.abstracted(&trail, y, NimEdge::from(3), 1),
            Some(1.0)
        );
        assert!(tree.at(x).vertex().oma().is_some());
    }

    #[test]
    fn plain_trees_carry_no_oma_ledger() {
        let mut tree = tree(NodeKind::Plain);
        let x = tree.grow(tree.root(), NimEdge::from(1), 1, false);
        tree.backprop(x, &[1.0, 0.0]);
        assert!(tree.all().all(|n| n.vertex().oma().is_none()));
    }

    #[test]
    fn renders() {
        let mut tree = tree(NodeKind::Plain);
        let x = tree.grow(tree.root(), NimEdge::from(1), 1, false);
        tree.backprop(x, &[1.0, 0.0]);
        let text = tree.to_string();
        assert!(text.contains("ROOT"));
        assert!(text.contains("n=1"));
    }
}
