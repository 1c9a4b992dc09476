/// An action available at a decision point.
///
/// Edges label the arcs of the search tree and key the MAST table, so they
/// must be cheap to copy and usable as hash map keys. Two edges that compare
/// equal are treated as the same choice everywhere in the engine; a game that
/// generates distinct choices with colliding identities will trip the
/// consistency check in [`Tree::best_action`](crate::Tree::best_action).
///
/// # Requirements
///
/// - Copyable and hashable for child lookup and MAST lookups
/// - Thread-safe so independent searches can run in parallel
pub trait MctsEdge:
    Copy + Clone + PartialEq + Eq + Send + Sync + std::hash::Hash + std::fmt::Debug
{
}
