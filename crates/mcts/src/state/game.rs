use tabletop_core::Seat;

/// An opaque game state.
///
/// The engine never inspects a state beyond asking who acts next and how many
/// players take part; everything else goes through the [`ForwardModel`].
/// States are cloned, never mutated in place, so a state held by the root of
/// a tree is never disturbed by a simulation.
///
/// For simultaneous-move games the forward model decides which seat is
/// reported as acting; the engine only requires that `player()` names the
/// seat whose choice `choices()` enumerates.
pub trait MctsGame: Clone + Send + Sync + std::fmt::Debug {
    /// Seat whose decision this state is waiting on.
    fn player(&self) -> Seat;
    /// Number of seats in the game. Fixes the length of reward vectors.
    fn players(&self) -> usize;
}
