use clap::{Parser, Subcommand};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

use self::{auto::AutoArg, play::PlayArg, train::TrainArg};

mod auto;
mod play;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in (defaults to `auto`)
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Train heuristic weights with the genetic algorithm
    Train(#[clap(flatten)] TrainArg),
    /// Play one game with trained weights, printing the board after every placement
    Play(#[clap(flatten)] PlayArg),
    /// Load weights (training them first if that fails), then play
    Auto(#[clap(flatten)] AutoArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Auto(AutoArg::default())) {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Auto(arg) => auto::run(&arg)?,
    }
    Ok(())
}

/// Returns a generator seeded with `seed`, or from the thread RNG if none is given.
fn new_rng(seed: Option<u64>) -> Pcg32 {
    match seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_rng(&mut rand::rng()),
    }
}
