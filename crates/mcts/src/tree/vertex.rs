use crate::*;
use tabletop_core::Seat;
use tabletop_core::Utility;

/// Kind-specific statistics carried by a vertex.
#[derive(Debug, Clone)]
pub enum Ledger<E>
where
    E: MctsEdge,
{
    Plain,
    Oma(OmaTable<E>),
}

impl<E> From<NodeKind> for Ledger<E>
where
    E: MctsEdge,
{
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Plain => Self::Plain,
            NodeKind::Oma => Self::Oma(OmaTable::default()),
        }
    }
}

/// Statistics stored at one node of the search tree.
///
/// Only the root keeps a state snapshot; every other state is rebuilt by
/// replaying actions from a copy of the root. The value accumulator holds one
/// running sum per seat and is only ever added to by backpropagation.
#[derive(Debug, Clone)]
pub struct Vertex<G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    game: Option<G>,
    seat: Seat,
    visits: u32,
    halts: u32,
    total: Vec<Utility>,
    terminal: bool,
    ledger: Ledger<E>,
}

impl<G, E> Vertex<G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    pub(crate) fn new(seat: Seat, players: usize, terminal: bool, kind: NodeKind) -> Self {
        Self {
            game: None,
            seat,
            visits: 0,
            halts: 0,
            total: vec![0.0; players],
            terminal,
            ledger: Ledger::from(kind),
        }
    }
    pub(crate) fn seeded(game: G, seat: Seat, terminal: bool, kind: NodeKind) -> Self {
        let mut vertex = Self::new(seat, game.players(), terminal, kind);
        vertex.game = Some(game);
        vertex
    }

    /// State snapshot, present on roots only.
    pub fn game(&self) -> Option<&G> {
        self.game.as_ref()
    }
    /// Seat deciding at this node.
    pub fn seat(&self) -> Seat {
        self.seat
    }
    /// Completed simulations that passed through this node.
    pub fn visits(&self) -> u32 {
        self.visits
    }
    /// Completed simulations whose tree portion ended here.
    pub fn halts(&self) -> u32 {
        self.halts
    }
    pub fn terminal(&self) -> bool {
        self.terminal
    }
    /// Accumulated reward per seat.
    pub fn total(&self) -> &[Utility] {
        &self.total
    }
    pub fn value(&self, seat: Seat) -> Utility {
        self.total.get(seat).copied().unwrap_or_default()
    }
    /// Mean reward for a seat, 0 while unvisited.
    pub fn mean(&self, seat: Seat) -> Utility {
        match self.visits {
            0 => 0.0,
            n => self.value(seat) / n as Utility,
        }
    }
    pub fn oma(&self) -> Option<&OmaTable<E>> {
        match self.ledger {
            Ledger::Oma(ref table) => Some(table),
            Ledger::Plain => None,
        }
    }

    pub(crate) fn oma_mut(&mut self) -> Option<&mut OmaTable<E>> {
        match self.ledger {
            Ledger::Oma(ref mut table) => Some(table),
            Ledger::Plain => None,
        }
    }
    pub(crate) fn absorb(&mut self, reward: &[Utility]) {
        debug_assert!(reward.len() == self.total.len());
        self.visits += 1;
        self.total
            .iter_mut()
            .zip(reward)
            .for_each(|(total, r)| *total += r);
    }
    pub(crate) fn halt(&mut self) {
        self.halts += 1;
    }
    pub(crate) fn terminate(&mut self) {
        self.terminal = true;
    }
}

impl<G, E> std::fmt::Display for Vertex<G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "P{} n={} v={:.3}{}",
            self.seat,
            self.visits,
            self.mean(self.seat),
            if self.terminal { " *" } else { "" }
        )
    }
}
