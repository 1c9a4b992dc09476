/// Node flavor fixed once per tree.
///
/// The tree stamps every vertex it grows with a ledger of its own kind, so a
/// single tree can never mix plain and OMA vertices.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum NodeKind {
    /// Visit count and per-player value only.
    #[default]
    Plain,
    /// Additionally tallies follow-up actions by opponent-move signature.
    Oma,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Oma => write!(f, "oma"),
        }
    }
}
