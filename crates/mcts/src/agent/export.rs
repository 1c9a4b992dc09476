use crate::*;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tabletop_core::Probability;
use tabletop_core::Seat;
use tabletop_core::Utility;

/// Turns a state into the feature vector a learner trains on.
pub trait StateEncoder<G>
where
    G: MctsGame,
{
    fn encode(&self, game: &G, seat: Seat) -> Vec<f32>;
}

/// Turns a root action into features, in the context of its state.
pub trait ActionEncoder<G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    fn encode(&self, edge: &E, game: &G) -> Vec<f32>;
}

/// One decision as written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct Sample {
    pub seat: Seat,
    pub state: Vec<f32>,
    pub targets: Vec<Target>,
}

/// Search result for one root action.
#[derive(Debug, Clone, Serialize)]
pub struct Target {
    pub features: Vec<f32>,
    pub visits: u32,
    pub share: Probability,
    pub mean: Utility,
}

/// Appends one JSON line per decision to `{stem}.jsonl`.
///
/// The file is opened, written, flushed and closed inside every call, so a
/// crash never loses more than the decision in flight.
pub struct ExpertIteration<G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    stem: PathBuf,
    state: Box<dyn StateEncoder<G>>,
    action: Box<dyn ActionEncoder<G, E>>,
}

impl<G, E> ExpertIteration<G, E>
where
    G: MctsGame,
    E: MctsEdge,
{
    pub fn new(
        stem: impl Into<PathBuf>,
        state: Box<dyn StateEncoder<G>>,
        action: Box<dyn ActionEncoder<G, E>>,
    ) -> Self {
        Self {
            stem: stem.into(),
            state,
            action,
        }
    }
    pub fn path(&self) -> PathBuf {
        self.stem.with_extension("jsonl")
    }
    /// Encode the finished root into a sample.
    pub fn sample(&self, game: &G, choices: &[E], tree: &Tree<G, E>) -> Sample {
        let seat = tree.at(tree.root()).seat();
        let total = tree.at(tree.root()).visits().max(1) as Probability;
        let targets = tree
            .summary(choices)
            .into_iter()
            .map(|s| Target {
                features: self.action.encode(&s.edge, game),
                visits: s.visits,
                share: s.visits as Probability / total,
                mean: s.mean,
            })
            .collect();
        Sample {
            seat,
            state: self.state.encode(game, seat),
            targets,
        }
    }
    pub fn export(&self, game: &G, choices: &[E], tree: &Tree<G, E>) -> anyhow::Result<()> {
        let sample = self.sample(game, choices, tree);
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path())?;
        serde_json::to_writer(&mut file, &sample)?;
        file.write_all(b"\n")?;
        file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Tree<NimGame, NimEdge> {
        let mut tree = Tree::new(NodeKind::Plain, NimGame::new(2, 5), false);
        let a = tree.grow(tree.root(), NimEdge::from(1), 1, false);
        let b = tree.grow(tree.root(), NimEdge::from(2), 1, false);
        for _ in 0..3 {
            tree.backprop(a, &[1.0, 0.0]);
        }
        tree.backprop(b, &[0.0, 1.0]);
        tree
    }

    #[test]
    fn sample_shares_visits() {
        let exporter: ExpertIteration<NimGame, NimEdge> =
            ExpertIteration::new("unused", Box::new(NimEncoder), Box::new(NimEncoder));
        let game = NimGame::new(2, 5);
        let choices = Nim.choices(&game);
        let sample = exporter.sample(&game, &choices, &tree());
        assert_eq!(sample.targets.len(), 3);
        assert_eq!(sample.targets[0].visits, 3);
        assert_eq!(sample.targets[0].share, 0.75);
        assert_eq!(sample.targets[0].mean, 1.0);
        assert_eq!(sample.targets[2].visits, 0);
    }

    #[test]
    fn one_line_per_export() {
        let stem = std::env::temp_dir().join(format!("tabletop-export-{}", std::process::id()));
        let exporter: ExpertIteration<NimGame, NimEdge> =
            ExpertIteration::new(&stem, Box::new(NimEncoder), Box::new(NimEncoder));
        let _ = std::fs::remove_file(exporter.path());
        let game = NimGame::new(2, 5);
        let choices = Nim.choices(&game);
        let tree = tree();
        exporter.export(&game, &choices, &tree).unwrap();
        exporter.export(&game, &choices, &tree).unwrap();
        let text = std::fs::read_to_string(exporter.path()).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        let json = serde_json::from_str::<serde_json::Value>(lines[0]).unwrap();
        assert_eq!(json["seat"], 0);
        assert_eq!(json["targets"].as_array().unwrap().len(), 3);
        std::fs::remove_file(exporter.path()).unwrap();
    }
}
