//! Arena Binary
//!
//! Pits search configurations against each other at Nim and reports how
//! often each one takes the last stone. Seats rotate between matches so no
//! configuration keeps the first move.
//!
//! Options: --players, --stones, --games, --iterations, --modes, --rollout, --seed

use clap::Parser;
use rayon::prelude::*;
use tabletop::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Pit MCTS configurations against each other at Nim", long_about = None)]
struct Args {
    #[arg(long, default_value_t = 2)]
    players: usize,
    #[arg(long, default_value_t = 21)]
    stones: u8,
    #[arg(long, default_value_t = 100)]
    games: usize,
    #[arg(long, default_value_t = 1000)]
    iterations: usize,
    /// Comma-separated opponent tree modes, one configuration each.
    #[arg(long, value_delimiter = ',', default_value = "single,multi")]
    modes: Vec<OpponentTree>,
    #[arg(long, default_value = "random")]
    rollout: RolloutKind,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

impl Args {
    fn params(&self, mode: OpponentTree, seed: u64) -> MctsParams {
        MctsParams {
            mode,
            rollout: self.rollout,
            budget: Budget::iterations(self.iterations),
            seed,
            ..Default::default()
        }
    }
}

/// Play one match; returns the configuration that won, or None if interrupted.
fn play(args: &Args, index: usize) -> anyhow::Result<Option<usize>> {
    let n = args.modes.len();
    let config = |seat: usize| (seat + index) % n;
    let mut agents = (0..args.players)
        .map(|seat| {
            let seed = args.seed + (index * args.players + seat) as u64;
            Agent::builder(Nim)
                .params(args.params(args.modes[config(seat)], seed))
                .build()
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let mut game = NimGame::new(args.players, args.stones);
    while !Nim.terminal(&game) {
        if interrupted() {
            return Ok(None);
        }
        let choices = Nim.choices(&game);
        let edge = agents[game.player()].decide(&game, &choices)?;
        game = Nim.apply(&game, edge)?;
    }
    let winner = game.winner().map(config);
    log::debug!("match {:>4} {}", index, game);
    Ok(winner)
}

fn main() -> anyhow::Result<()> {
    log();
    brb();
    let args = Args::parse();
    anyhow::ensure!(!args.modes.is_empty(), "at least one mode is required");
    anyhow::ensure!(args.players > 0, "at least one player is required");
    log::info!(
        "{} games of {}-player nim from {} stones, {} iterations per decision",
        args.games,
        args.players,
        args.stones,
        args.iterations
    );
    let winners = (0..args.games)
        .into_par_iter()
        .map(|index| play(&args, index))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let played = winners.iter().flatten().count();
    let mut wins = vec![0usize; args.modes.len()];
    winners.into_iter().flatten().for_each(|i| wins[i] += 1);
    log::info!("{:<12}{:>8}{:>8}", "mode", "wins", "rate");
    for (mode, n) in args.modes.iter().zip(wins) {
        let rate = n as f32 / played.max(1) as f32;
        log::info!("{:<12}{:>8}{:>8.3}", mode.to_string(), n, rate);
    }
    Ok(())
}
