use crate::*;
use tabletop_core::Seat;
use tabletop_core::Utility;

/// The rules engine consumed by the search.
///
/// Implements state transitions, legality, and scoring for one game. The
/// search only ever calls [`apply`](Self::apply) on private copies, so
/// implementations are free to assume exclusive access to the state they
/// return.
///
/// # Required Methods
///
/// - `apply(game, edge)`: Returns the successor state, or an error if the
///   transition is illegal or the state is corrupt. Errors abort the search.
/// - `terminal(game)`: Whether the game is over.
/// - `choices(game)`: Legal actions for `game.player()`, in a stable order.
/// - `score(game, seat)`: Reward for a seat. Called on terminal states for
///   final payoffs and on cut-off states when no heuristic is configured.
pub trait ForwardModel {
    type E: MctsEdge;
    type G: MctsGame;

    fn apply(&self, game: &Self::G, edge: Self::E) -> anyhow::Result<Self::G>;
    fn terminal(&self, game: &Self::G) -> bool;
    fn choices(&self, game: &Self::G) -> Vec<Self::E>;
    fn score(&self, game: &Self::G, seat: Seat) -> Utility;

    /// Private copy of a state. Defaults to `Clone`.
    fn copy(&self, game: &Self::G) -> Self::G {
        game.clone()
    }
    /// Score vector for every seat in turn order.
    fn rewards(&self, game: &Self::G) -> Vec<Utility> {
        (0..game.players()).map(|seat| self.score(game, seat)).collect()
    }
}

/// Blanket impl allowing references to forward models to be used directly.
impl<F> ForwardModel for &F
where
    F: ForwardModel,
{
    type E = F::E;
    type G = F::G;
    fn apply(&self, game: &Self::G, edge: Self::E) -> anyhow::Result<Self::G> {
        (*self).apply(game, edge)
    }
    fn terminal(&self, game: &Self::G) -> bool {
        (*self).terminal(game)
    }
    fn choices(&self, game: &Self::G) -> Vec<Self::E> {
        (*self).choices(game)
    }
    fn score(&self, game: &Self::G, seat: Seat) -> Utility {
        (*self).score(game, seat)
    }
    fn copy(&self, game: &Self::G) -> Self::G {
        (*self).copy(game)
    }
    fn rewards(&self, game: &Self::G) -> Vec<Utility> {
        (*self).rewards(game)
    }
}
