use tabletop_core::Seat;
use tabletop_core::Utility;

/// What a per-player tree credits when a simulation finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backup {
    /// Every tree receives the raw reward vector.
    #[default]
    Independent,
    /// Every opponent is assumed to minimize the hero's reward: each
    /// non-hero component is replaced by the negated hero component.
    Paranoid,
}

impl Backup {
    pub fn apply(&self, reward: &[Utility], hero: Seat) -> Vec<Utility> {
        match self {
            Self::Independent => reward.to_vec(),
            Self::Paranoid => {
                let mine = reward[hero];
                (0..reward.len())
                    .map(|seat| if seat == hero { mine } else { -mine })
                    .collect()
            }
        }
    }
}
