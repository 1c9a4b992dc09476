use crate::*;
use tabletop_core::Seat;
use tabletop_core::Utility;

/// Scores a whole state from one seat's perspective.
///
/// Used in place of the forward model's score when a simulation ends.
pub trait StateHeuristic<G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    fn evaluate(&self, game: &G, seat: Seat) -> Utility;
    fn processor(&mut self) -> Option<&mut dyn TreeProcessor<G, E>> {
        None
    }
}

/// Scores one action in a state for the player about to take it.
pub trait ActionHeuristic<G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    fn evaluate(&self, edge: &E, game: &G) -> Utility;
    fn processor(&mut self) -> Option<&mut dyn TreeProcessor<G, E>> {
        None
    }
}
