use crate::*;
use tabletop_core::Seat;
use tabletop_core::Utility;

/// Most stones a single move may take.
pub const NIM_MAX_TAKE: u8 = 3;

/// Rules of Nim: take 1..=3, last stone wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nim;

impl ForwardModel for Nim {
    type E = NimEdge;
    type G = NimGame;

    fn apply(&self, game: &NimGame, edge: NimEdge) -> anyhow::Result<NimGame> {
        anyhow::ensure!(!self.terminal(game), "move {} after game over", edge);
        anyhow::ensure!(
            (1..=NIM_MAX_TAKE.min(game.stones())).contains(&edge.stones()),
            "cannot take {} from {}",
            edge.stones(),
            game.stones()
        );
        Ok(game.take(edge.stones()))
    }
    fn terminal(&self, game: &NimGame) -> bool {
        game.winner().is_some()
    }
    fn choices(&self, game: &NimGame) -> Vec<NimEdge> {
        match self.terminal(game) {
            true => vec![],
            false => (1..=NIM_MAX_TAKE.min(game.stones()))
                .map(NimEdge::from)
                .collect(),
        }
    }
    /// 1 to the winner, 0 to everyone else, an even share while undecided.
    fn score(&self, game: &NimGame, seat: Seat) -> Utility {
        match game.winner() {
            Some(winner) if winner == seat => 1.0,
            Some(_) => 0.0,
            None => 1.0 / game.players() as Utility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_shrink_with_pile() {
        let game = NimGame::new(2, 2);
        assert_eq!(Nim.choices(&game), vec![NimEdge::from(1), NimEdge::from(2)]);
        let game = NimGame::new(2, 9);
        assert_eq!(Nim.choices(&game).len(), 3);
    }

    #[test]
    fn last_stone_wins() {
        let game = NimGame::new(3, 4);
        let game = Nim.apply(&game, NimEdge::from(3)).unwrap();
        let game = Nim.apply(&game, NimEdge::from(1)).unwrap();
        assert!(Nim.terminal(&game));
        assert_eq!(game.winner(), Some(1));
        assert_eq!(Nim.rewards(&game), vec![0.0, 1.0, 0.0]);
        assert!(Nim.choices(&game).is_empty());
    }

    #[test]
    fn turns_rotate() {
        let game = NimGame::new(3, 9);
        let game = Nim.apply(&game, NimEdge::from(1)).unwrap();
        assert_eq!(game.player(), 1);
        let game = Nim.apply(&game, NimEdge::from(1)).unwrap();
        let game = Nim.apply(&game, NimEdge::from(1)).unwrap();
        assert_eq!(game.player(), 0);
        assert_eq!(Nim.rewards(&game), vec![1.0 / 3.0; 3]);
    }

    #[test]
    fn borrowed_models_delegate() {
        fn width<F: ForwardModel>(model: F, game: &F::G) -> usize {
            model.choices(game).len()
        }
        assert_eq!(width(&Nim, &NimGame::new(2, 9)), 3);
        assert_eq!(width(&&Nim, &NimGame::new(2, 1)), 1);
    }

    #[test]
    fn borrowed_models_keep_custom_rewards() {
        struct Spite;
        impl ForwardModel for Spite {
            type E = NimEdge;
            type G = NimGame;
            fn apply(&self, game: &NimGame, edge: NimEdge) -> anyhow::Result<NimGame> {
                Nim.apply(game, edge)
            }
            fn terminal(&self, game: &NimGame) -> bool {
                Nim.terminal(game)
            }
            fn choices(&self, game: &NimGame) -> Vec<NimEdge> {
                Nim.choices(game)
            }
            fn score(&self, game: &NimGame, seat: Seat) -> Utility {
                Nim.score(game, seat)
            }
            fn rewards(&self, game: &NimGame) -> Vec<Utility> {
                vec![-1.0; game.players()]
            }
        }
        fn payoff<F: ForwardModel>(model: F, game: &F::G) -> Vec<Utility> {
            model.rewards(game)
        }
        let game = NimGame::new(3, 2);
        assert_eq!(payoff(&Spite, &game), vec![-1.0; 3]);
        assert_eq!(payoff(&&Spite, &game), vec![-1.0; 3]);
    }

    #[test]
    fn illegal_moves_are_errors() {
        let game = NimGame::new(2, 2);
        assert!(Nim.apply(&game, NimEdge::from(3)).is_err());
        assert!(Nim.apply(&game, NimEdge::from(0)).is_err());
        let over = Nim.apply(&game, NimEdge::from(2)).unwrap();
        assert!(Nim.apply(&over, NimEdge::from(1)).is_err());
    }
}
