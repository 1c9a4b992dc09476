use crate::*;
use tabletop_core::Seat;

/// Features for Nim: pile size and seat distances for states, stones taken
/// and stones left for actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NimEncoder;

impl StateEncoder<NimGame> for NimEncoder {
    fn encode(&self, game: &NimGame, seat: Seat) -> Vec<f32> {
        let players = game.players();
        vec![
            game.stones() as f32,
            (game.stones() % (NIM_MAX_TAKE + 1)) as f32,
            ((seat + players - game.player()) % players) as f32,
        ]
    }
}

impl ActionEncoder<NimGame, NimEdge> for NimEncoder {
    fn encode(&self, edge: &NimEdge, game: &NimGame) -> Vec<f32> {
        let left = game.stones().saturating_sub(edge.stones());
        vec![edge.stones() as f32, left as f32]
    }
}
