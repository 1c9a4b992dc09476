use crate::*;
use tabletop_core::Seat;

/// The trees of one decision.
#[derive(Debug)]
pub enum Root<G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    Single(Tree<G, E>),
    Multi(MultiTree<G, E>),
}

impl<G, E> Root<G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    /// Fresh root for `mode`, bound to the state `hero` is deciding in.
    pub fn new(mode: OpponentTree, kind: NodeKind, game: G, hero: Seat) -> Self {
        match mode.multi() {
            true => Self::Multi(MultiTree::new(kind, game, hero)),
            false => Self::Single(Tree::new(kind, game, false)),
        }
    }
    /// The tree holding the searching seat's root decision.
    pub fn hero(&self) -> &Tree<G, E> {
        match self {
            Self::Single(tree) => tree,
            Self::Multi(forest) => forest.tree(forest.hero()),
        }
    }
    pub fn nodes(&self) -> usize {
        match self {
            Self::Single(tree) => tree.n(),
            Self::Multi(forest) => forest.trees().iter().map(Tree::n).sum(),
        }
    }
    pub fn best_action(&self, choices: &[E]) -> anyhow::Result<E> {
        match self {
            Self::Single(tree) => tree.best_action(choices),
            Self::Multi(forest) => forest.best(forest.hero(), choices),
        }
    }
}
