use crate::*;
use rand::rngs::SmallRng;
use tabletop_core::Probability;

/// A search-based player.
///
/// Owns its strategies, its rng, and the MAST table that carries over from
/// one decision to the next. Everything else (trees, counters) lives only as
/// long as a single call to [`decide`](Self::decide).
pub struct Agent<F>
where
    F: ForwardModel,
{
    pub(super) model: F,
    pub(super) params: MctsParams,
    pub(super) kind: NodeKind,
    pub(super) policy: Box<dyn TreePolicy>,
    pub(super) rollout: Box<dyn RolloutPolicy<F::G, F::E>>,
    pub(super) opponent: Box<dyn RolloutPolicy<F::G, F::E>>,
    pub(super) heuristic: Option<Box<dyn StateHeuristic<F::G, F::E>>>,
    pub(super) advantage: Option<Box<dyn ActionHeuristic<F::G, F::E>>>,
    pub(super) exporter: Option<ExpertIteration<F::G, F::E>>,
    pub(super) slots: Vec<Slot>,
    pub(super) mast: Mast<F::E>,
    pub(super) rng: SmallRng,
    pub(super) decision: Vec<ActionStats<F::E>>,
    pub(super) stats: Option<SearchStats>,
}

impl<F> Agent<F>
where
    F: ForwardModel,
{
    pub fn builder(model: F) -> AgentBuilder<F> {
        AgentBuilder::new(model)
    }
    pub fn params(&self) -> &MctsParams {
        &self.params
    }
    pub fn mast(&self) -> &Mast<F::E> {
        &self.mast
    }
    /// Per-action diagnostics of the last decision, in the order its
    /// choices were given. Empty until a search visits the root twice.
    pub fn decision(&self) -> &[ActionStats<F::E>] {
        &self.decision
    }
    pub fn stats(&self) -> Option<&SearchStats> {
        self.stats.as_ref()
    }
    /// Strategy slots whose processors run after every search.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Forget everything learned in the current game.
    pub fn reset(&mut self) {
        self.mast.clear();
        self.decision.clear();
        self.stats = None;
    }

    /// Search from `game` and return the chosen member of `choices`.
    pub fn decide(&mut self, game: &F::G, choices: &[F::E]) -> anyhow::Result<F::E> {
        anyhow::ensure!(!choices.is_empty(), "no actions to decide between");
        let hero = game.player();
        let mut root = Root::new(self.params.mode, self.kind, self.model.copy(game), hero);
        let mut mast = std::mem::take(&mut self.mast).decayed(self.params.gamma);
        let result = Search::new(
            &self.model,
            &self.params,
            hero,
            self.policy.as_ref(),
            self.rollout.as_mut(),
            self.opponent.as_mut(),
            self.heuristic.as_deref(),
            &mut mast,
            &mut self.rng,
        )
        .run(&mut root);
        self.mast = mast;
        let stats = result?;
        log::debug!("{}", stats);
        log::trace!("{}", root.hero());
        self.stats = Some(stats);
        for slot in self.slots.clone() {
            if let Some(processor) = self.processor(slot) {
                processor.process(root.hero());
            }
        }
        self.decision = self.diagnose(game, choices, root.hero());
        self.decision.iter().for_each(|s| log::trace!("{}", s));
        if let Some(exporter) = self.exporter.as_ref() {
            exporter.export(game, choices, root.hero())?;
        }
        root.best_action(choices)
    }

    pub(super) fn processor(&mut self, slot: Slot) -> Option<&mut dyn TreeProcessor<F::G, F::E>> {
        match slot {
            Slot::Advantage => self.advantage.as_mut()?.processor(),
            Slot::Rollout => self.rollout.processor(),
            Slot::Heuristic => self.heuristic.as_mut()?.processor(),
            Slot::Opponent => self.opponent.processor(),
        }
    }

    fn diagnose(
        &self,
        game: &F::G,
        choices: &[F::E],
        tree: &Tree<F::G, F::E>,
    ) -> Vec<ActionStats<F::E>> {
        let root = tree.at(tree.root());
        if root.visits() <= 1 {
            return Vec::new();
        }
        let seat = root.seat();
        let total = root.visits() as Probability;
        tree.summary(choices)
            .into_iter()
            .map(|s| ActionStats {
                edge: s.edge,
                visits: s.visits,
                share: s.visits as Probability / total,
                mean: s.mean,
                heuristic: self.heuristic.as_ref().map(|h| h.evaluate(game, seat)),
                advantage: self.advantage.as_ref().map(|a| a.evaluate(&s.edge, game)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use tabletop_core::Seat;
    use tabletop_core::Utility;

    fn agent(params: MctsParams) -> Agent<Nim> {
        Agent::builder(Nim).params(params).build().unwrap()
    }

    fn budget(n: usize) -> MctsParams {
        MctsParams {
            budget: Budget::iterations(n),
            ..Default::default()
        }
    }

    /// Counts how often the finished tree is handed over.
    struct Counter(Rc<Cell<usize>>);
    impl StateHeuristic<NimGame, NimEdge> for Counter {
        fn evaluate(&self, game: &NimGame, seat: Seat) -> Utility {
            Nim.score(game, seat)
        }
        fn processor(&mut self) -> Option<&mut dyn TreeProcessor<NimGame, NimEdge>> {
            Some(self)
        }
    }
    impl TreeProcessor<NimGame, NimEdge> for Counter {
        fn process(&mut self, tree: &Tree<NimGame, NimEdge>) {
            assert!(tree.n() > 1);
            self.0.set(self.0.get() + 1);
        }
    }

    /// Nim whose transitions always fail.
    struct Broken;
    impl ForwardModel for Broken {
        type E = NimEdge;
        type G = NimGame;
        fn apply(&self, _: &NimGame, _: NimEdge) -> anyhow::Result<NimGame> {
            anyhow::bail!("rules engine unavailable")
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
    }

    /// Scores by stones left, so every action sees the same root value.
    struct Stones;
    impl StateHeuristic<NimGame, NimEdge> for Stones {
        fn evaluate(&self, game: &NimGame, _: Seat) -> Utility {
            game.stones() as Utility
        }
    }

    /// Always descends into the least visited child.
    struct Even(Rc<Cell<usize>>);
    impl TreePolicy for Even {
        fn score(&self, _: Utility, visits: u32, _: u32) -> Utility {
            self.0.set(self.0.get() + 1);
            -(visits as Utility)
        }
    }

    #[test]
    fn finds_winning_move() {
        let game = NimGame::new(2, 5);
        let choices = Nim.choices(&game);
        let ref mut agent = agent(budget(3000));
        assert_eq!(agent.decide(&game, &choices).unwrap(), NimEdge::from(1));
    }

    #[test]
    fn oma_finds_winning_move() {
        let game = NimGame::new(2, 6);
        let choices = Nim.choices(&game);
        let ref mut agent = agent(MctsParams {
            mode: OpponentTree::Oma,
            oma_visits: 1,
            ..budget(3000)
        });
        assert_eq!(agent.decide(&game, &choices).unwrap(), NimEdge::from(2));
    }

    #[test]
    fn diagnostics_follow_choices() {
        let game = NimGame::new(3, 10);
        let choices = vec![NimEdge::from(3), NimEdge::from(1), NimEdge::from(2)];
        let ref mut agent = agent(budget(300));
        agent.decide(&game, &choices).unwrap();
        let decision = agent.decision();
        assert_eq!(decision.len(), 3);
        assert_eq!(
            decision.iter().map(|s| s.edge).collect::<Vec<_>>(),
            choices
        );
        assert_eq!(decision.iter().map(|s| s.visits).sum::<u32>(), 300);
        let share = decision.iter().map(|s| s.share).sum::<f32>();
        assert!((share - 1.0).abs() < 1e-4);
        assert!(decision.iter().all(|s| s.heuristic.is_none()));
        assert_eq!(agent.stats().map(|s| s.iterations), Some(300));
    }

    #[test]
    fn heuristic_diagnostics_score_the_decision_state() {
        let game = NimGame::new(2, 9);
        let choices = Nim.choices(&game);
        let ref mut agent = Agent::builder(Nim)
            .params(budget(100))
            .heuristic(Box::new(Stones))
            .build()
            .unwrap();
        agent.decide(&game, &choices).unwrap();
        assert_eq!(agent.decision().len(), 3);
        assert!(agent.decision().iter().all(|s| s.heuristic == Some(9.0)));
    }

    #[test]
    fn injected_tree_policy_drives_selection() {
        let calls = Rc::new(Cell::new(0));
        let ref mut agent = Agent::builder(Nim)
            .params(budget(300))
            .policy(Box::new(Even(calls.clone())))
            .build()
            .unwrap();
        let game = NimGame::new(2, 12);
        let choices = Nim.choices(&game);
        agent.decide(&game, &choices).unwrap();
        assert!(calls.get() > 0);
        assert!(agent.decision().iter().all(|s| s.visits == 100));
    }

    #[test]
    fn single_visit_has_no_diagnostics() {
        let game = NimGame::new(2, 9);
        let choices = Nim.choices(&game);
        let ref mut agent = agent(budget(1));
        agent.decide(&game, &choices).unwrap();
        assert!(agent.decision().is_empty());
    }

    #[test]
    fn processors_run_once_per_decision() {
        let count = Rc::new(Cell::new(0));
        let ref mut agent = Agent::builder(Nim)
            .params(budget(50))
            .heuristic(Box::new(Counter(count.clone())))
            .build()
            .unwrap();
        assert_eq!(agent.slots(), &[Slot::Heuristic]);
        let game = NimGame::new(2, 12);
        for _ in 0..3 {
            agent.decide(&game, &Nim.choices(&game)).unwrap();
        }
        assert_eq!(count.get(), 3);
        assert!(agent.decision().iter().all(|s| s.heuristic.is_some()));
    }

    #[test]
    fn mast_persists_until_reset() {
        let game = NimGame::new(2, 9);
        let choices = Nim.choices(&game);
        let ref mut agent = agent(MctsParams {
            rollout: RolloutKind::Mast,
            ..budget(100)
        });
        agent.decide(&game, &choices).unwrap();
        let first = agent.mast().get(0, &NimEdge::from(1)).copied().unwrap();
        agent.decide(&game, &choices).unwrap();
        let second = agent.mast().get(0, &NimEdge::from(1)).copied().unwrap();
        assert!(second.visits() > first.visits() * agent.params().gamma);
        agent.reset();
        assert!(agent.mast().is_empty());
        assert!(agent.decision().is_empty());
        assert!(agent.stats().is_none());
    }

    #[test]
    fn empty_choices_are_rejected() {
        let ref mut agent = agent(budget(10));
        assert!(agent.decide(&NimGame::new(2, 3), &[]).is_err());
    }

    #[test]
    fn forward_model_errors_propagate() {
        let ref mut agent = Agent::builder(Broken).params(budget(10)).build().unwrap();
        let game = NimGame::new(2, 5);
        let error = agent.decide(&game, &Nim.choices(&game)).unwrap_err();
        assert!(error.to_string().contains("rules engine unavailable"));
    }

    #[test]
    fn configuration_errors() {
        let custom = MctsParams {
            rollout: RolloutKind::Custom,
            ..Default::default()
        };
        assert!(Agent::builder(Nim).params(custom.clone()).build().is_err());
        assert!(
            Agent::builder(Nim)
                .params(custom)
                .rollout(Box::new(RandomRollout))
                .build()
                .is_ok()
        );
        let custom = MctsParams {
            opponent: RolloutKind::Custom,
            ..Default::default()
        };
        assert!(Agent::builder(Nim).params(custom).build().is_err());
        assert!(
            Agent::builder(Nim)
                .opponent(Box::new(RandomRollout))
                .build()
                .is_err()
        );
        assert!(Agent::builder(Nim).factory(NodeKind::Oma).build().is_err());
        let oma = MctsParams {
            mode: OpponentTree::OmaAll,
            ..Default::default()
        };
        assert!(
            Agent::builder(Nim)
                .params(oma)
                .factory(NodeKind::Oma)
                .build()
                .is_ok()
        );
        let broke = MctsParams {
            budget: Budget::unlimited(),
            ..Default::default()
        };
        assert!(Agent::builder(Nim).params(broke).build().is_err());
    }

    macro_rules! legal {
        ($M:ident, $R:ident, $P:literal, $S:literal) => {
            paste::paste! {
                #[test]
                fn [<$M:snake _ $R:lower _ $P _players>]() {
                    let ref mut agent = agent(MctsParams {
                        mode: OpponentTree::$M,
                        rollout: RolloutKind::$R,
                        opponent: RolloutKind::$R,
                        ..budget(200)
                    });
                    let mut game = NimGame::new($P, $S);
                    while !Nim.terminal(&game) {
                        let choices = Nim.choices(&game);
                        let edge = agent.decide(&game, &choices).unwrap();
                        assert!(choices.contains(&edge));
                        let stats = agent.stats().copied().unwrap();
                        assert_eq!(stats.iterations, 200);
                        game = Nim.apply(&game, edge).unwrap();
                    }
                    assert!(game.winner().is_some());
                }
            }
        };
    }

    #[rustfmt::skip] legal!(SingleTree,        Random, 2, 11);
    #[rustfmt::skip] legal!(SingleTree,        Mast,   3, 13);
    #[rustfmt::skip] legal!(MultiTree,         Random, 2, 11);
    #[rustfmt::skip] legal!(MultiTree,         Mast,   4, 13);
    #[rustfmt::skip] legal!(MultiTreeParanoid, Random, 3, 11);
    #[rustfmt::skip] legal!(MultiTreeParanoid, Mast,   2, 13);
    #[rustfmt::skip] legal!(Oma,               Random, 3, 11);
    #[rustfmt::skip] legal!(Oma,               Mast,   2, 13);
    #[rustfmt::skip] legal!(OmaAll,            Random, 2, 11);
    #[rustfmt::skip] legal!(OmaAll,            Mast,   3, 13);
}
