use crate::*;

/// Number of stones taken from the pile.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct NimEdge(u8);

impl NimEdge {
    pub fn stones(&self) -> u8 {
        self.0
    }
}

impl From<u8> for NimEdge {
    fn from(stones: u8) -> Self {
        Self(stones)
    }
}

impl std::fmt::Display for NimEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "-{}", self.0)
    }
}

impl MctsEdge for NimEdge {}
