use crate::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Assembles an [`Agent`] and rejects inconsistent configurations.
///
/// Strategies passed here are only used when the matching
/// [`RolloutKind`] is `Custom`; built-in kinds are constructed from
/// [`MctsParams`].
pub struct AgentBuilder<F>
where
    F: ForwardModel,
{
    model: F,
    params: MctsParams,
    policy: Option<Box<dyn TreePolicy>>,
    rollout: Option<Box<dyn RolloutPolicy<F::G, F::E>>>,
    opponent: Option<Box<dyn RolloutPolicy<F::G, F::E>>>,
    heuristic: Option<Box<dyn StateHeuristic<F::G, F::E>>>,
    advantage: Option<Box<dyn ActionHeuristic<F::G, F::E>>>,
    exporter: Option<ExpertIteration<F::G, F::E>>,
    factory: Option<NodeKind>,
}

impl<F> AgentBuilder<F>
where
    F: ForwardModel,
{
    pub fn new(model: F) -> Self {
        Self {
            model,
            params: MctsParams::default(),
            policy: None,
            rollout: None,
            opponent: None,
            heuristic: None,
            advantage: None,
            exporter: None,
            factory: None,
        }
    }
    pub fn params(mut self, params: MctsParams) -> Self {
        self.params = params;
        self
    }
    /// Replace UCB1 as the in-tree selection rule.
    pub fn policy(mut self, policy: Box<dyn TreePolicy>) -> Self {
        self.policy = Some(policy);
        self
    }
    pub fn rollout(mut self, rollout: Box<dyn RolloutPolicy<F::G, F::E>>) -> Self {
        self.rollout = Some(rollout);
        self
    }
    pub fn opponent(mut self, opponent: Box<dyn RolloutPolicy<F::G, F::E>>) -> Self {
        self.opponent = Some(opponent);
        self
    }
    pub fn heuristic(mut self, heuristic: Box<dyn StateHeuristic<F::G, F::E>>) -> Self {
        self.heuristic = Some(heuristic);
        self
    }
    pub fn advantage(mut self, advantage: Box<dyn ActionHeuristic<F::G, F::E>>) -> Self {
        self.advantage = Some(advantage);
        self
    }
    pub fn exporter(mut self, exporter: ExpertIteration<F::G, F::E>) -> Self {
        self.exporter = Some(exporter);
        self
    }
    /// Pin the node kind. Must agree with the configured mode.
    pub fn factory(mut self, kind: NodeKind) -> Self {
        self.factory = Some(kind);
        self
    }

    pub fn build(self) -> anyhow::Result<Agent<F>> {
        self.params.validate()?;
        let kind = self.params.mode.kind();
        if let Some(factory) = self.factory {
            anyhow::ensure!(
                factory == kind,
                "{} node factory does not match {} opponent tree mode",
                factory,
                self.params.mode
            );
        }
        let rollout = Self::strategy("rollout", self.params.rollout, &self.params, self.rollout)?;
        let opponent = Self::strategy("opponent", self.params.opponent, &self.params, self.opponent)?;
        let policy: Box<dyn TreePolicy> = match self.policy {
            Some(policy) => policy,
            None => Box::new(Ucb1::new(self.params.k)),
        };
        let mut agent = Agent {
            rng: SmallRng::seed_from_u64(self.params.seed),
            model: self.model,
            params: self.params,
            kind,
            policy,
            rollout,
            opponent,
            heuristic: self.heuristic,
            advantage: self.advantage,
            exporter: self.exporter,
            slots: Vec::new(),
            mast: Mast::default(),
            decision: Vec::new(),
            stats: None,
        };
        let slots = [Slot::Advantage, Slot::Rollout, Slot::Heuristic, Slot::Opponent]
            .into_iter()
            .filter(|slot| agent.processor(*slot).is_some())
            .collect();
        agent.slots = slots;
        log::debug!(
            "built {} agent ({} rollout, {} opponent, {} processors)",
            agent.params.mode,
            agent.params.rollout,
            agent.params.opponent,
            agent.slots.len()
        );
        Ok(agent)
    }

    fn strategy(
        role: &str,
        kind: RolloutKind,
        params: &MctsParams,
        injected: Option<Box<dyn RolloutPolicy<F::G, F::E>>>,
    ) -> anyhow::Result<Box<dyn RolloutPolicy<F::G, F::E>>> {
        match (kind, injected) {
            (RolloutKind::Custom, Some(policy)) => Ok(policy),
            (RolloutKind::Custom, None) => {
                anyhow::bail!("custom {} kind requires an injected strategy", role)
            }
            (kind, Some(_)) => {
                anyhow::bail!("{} strategy injected but {} kind is {}", role, role, kind)
            }
            (RolloutKind::Random, None) => Ok(Box::new(RandomRollout)),
            (RolloutKind::Mast, None) => Ok(Box::new(MastRollout::new(params.temperature))),
        }
    }
}
