use crate::*;
use tabletop_core::Entropy;
use tabletop_core::Probability;
use tabletop_core::Seat;
use tabletop_core::Utility;

/// How opponents are represented during search.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum OpponentTree {
    /// One shared tree; every node scored for its own decision player.
    #[default]
    SingleTree,
    /// One tree per player, each backing up the raw reward vector.
    MultiTree,
    /// One tree per player; opponents back up the negated hero reward.
    MultiTreeParanoid,
    /// Shared tree of OMA nodes; abstraction at the hero's nodes only.
    Oma,
    /// Shared tree of OMA nodes; abstraction at every player's nodes.
    OmaAll,
}

impl OpponentTree {
    pub const ALL: [Self; 5] = [
        Self::SingleTree,
        Self::MultiTree,
        Self::MultiTreeParanoid,
        Self::Oma,
        Self::OmaAll,
    ];
    /// Node kind every tree of this mode is built from.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Oma | Self::OmaAll => NodeKind::Oma,
            _ => NodeKind::Plain,
        }
    }
    pub fn multi(&self) -> bool {
        matches!(self, Self::MultiTree | Self::MultiTreeParanoid)
    }
    pub fn backup(&self) -> Backup {
        match self {
            Self::MultiTreeParanoid => Backup::Paranoid,
            _ => Backup::Independent,
        }
    }
    /// Whether selection at a node of `seat` uses the abstracted estimate.
    pub fn abstracts(&self, seat: Seat, hero: Seat) -> bool {
        match self {
            Self::OmaAll => true,
            Self::Oma => seat == hero,
            _ => false,
        }
    }
}

impl std::str::FromStr for OpponentTree {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "single" | "singletree" => Ok(Self::SingleTree),
            "multi" | "multitree" => Ok(Self::MultiTree),
            "paranoid" | "multitreeparanoid" => Ok(Self::MultiTreeParanoid),
            "oma" => Ok(Self::Oma),
            "omaall" => Ok(Self::OmaAll),
            _ => anyhow::bail!("unknown opponent tree mode: {}", s),
        }
    }
}

impl std::fmt::Display for OpponentTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SingleTree => write!(f, "single"),
            Self::MultiTree => write!(f, "multi"),
            Self::MultiTreeParanoid => write!(f, "paranoid"),
            Self::Oma => write!(f, "oma"),
            Self::OmaAll => write!(f, "oma-all"),
        }
    }
}

/// Which policy plays a seat once a simulation leaves the tree.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum RolloutKind {
    #[default]
    Random,
    /// Softmax over MAST means.
    Mast,
    /// A strategy injected through the builder.
    Custom,
}

impl std::str::FromStr for RolloutKind {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "mast" => Ok(Self::Mast),
            "custom" => Ok(Self::Custom),
            _ => anyhow::bail!("unknown rollout kind: {}", s),
        }
    }
}

impl std::fmt::Display for RolloutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Random => write!(f, "random"),
            Self::Mast => write!(f, "mast"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// Search configuration.
///
/// Defaults come from the tunables in `tabletop_core`.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsParams {
    /// UCB1 exploration constant.
    pub k: Utility,
    pub budget: Budget,
    /// Deepest the tree portion of a simulation may go.
    pub max_depth: usize,
    /// Most out-of-tree actions per simulation before scoring the state.
    pub rollout_length: usize,
    pub mode: OpponentTree,
    /// Policy for the searching seat outside the tree.
    pub rollout: RolloutKind,
    /// Policy for every other seat outside the tree.
    pub opponent: RolloutKind,
    /// MAST decay applied at every decision.
    pub gamma: Probability,
    /// Softmax temperature of the MAST rollout.
    pub temperature: Entropy,
    /// Conditioned samples an OMA estimate needs before it is trusted.
    pub oma_visits: u32,
    pub seed: u64,
}

impl Default for MctsParams {
    fn default() -> Self {
        Self {
            k: tabletop_core::EXPLORATION,
            budget: Budget::default(),
            max_depth: tabletop_core::MAX_TREE_DEPTH,
            rollout_length: tabletop_core::ROLLOUT_LENGTH,
            mode: OpponentTree::default(),
            rollout: RolloutKind::default(),
            opponent: RolloutKind::default(),
            gamma: tabletop_core::MAST_GAMMA,
            temperature: tabletop_core::MAST_BOLTZMANN,
            oma_visits: tabletop_core::OMA_VISITS,
            seed: 0,
        }
    }
}

impl MctsParams {
    pub fn validate(&self) -> anyhow::Result<()> {
        self.budget.validate()?;
        anyhow::ensure!(
            self.gamma > 0.0 && self.gamma <= 1.0,
            "mast decay must lie in (0, 1], got {}",
            self.gamma
        );
        anyhow::ensure!(
            self.temperature > 0.0,
            "rollout temperature must be positive, got {}",
            self.temperature
        );
        anyhow::ensure!(
            self.k >= 0.0,
            "exploration constant must be non-negative, got {}",
            self.k
        );
        anyhow::ensure!(self.max_depth > 0, "tree depth limit must be at least 1");
        Ok(())
    }
}
