use crate::*;
use tabletop_core::Seat;

/// Pile size, seat to act, and the winner once the pile is empty.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct NimGame {
    players: usize,
    stones: u8,
    player: Seat,
    winner: Option<Seat>,
}

impl NimGame {
    /// Fresh game with seat 0 to act.
    pub fn new(players: usize, stones: u8) -> Self {
        debug_assert!(players > 0);
        Self {
            players,
            stones,
            player: 0,
            winner: None,
        }
    }
    pub fn stones(&self) -> u8 {
        self.stones
    }
    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }
    /// Remove `n` stones for the acting seat and pass the turn.
    pub(crate) fn take(&self, n: u8) -> Self {
        let stones = self.stones - n;
        Self {
            players: self.players,
            stones,
            player: (self.player + 1) % self.players,
            winner: (stones == 0).then_some(self.player),
        }
    }
}

impl MctsGame for NimGame {
    fn player(&self) -> Seat {
        self.player
    }
    fn players(&self) -> usize {
        self.players
    }
}

impl std::fmt::Display for NimGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.winner {
            Some(seat) => write!(f, "P{} wins", seat),
            None => write!(f, "P{} to take from {}", self.player, self.stones),
        }
    }
}
