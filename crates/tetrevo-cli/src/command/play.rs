use std::{
    io::{self, Write},
    path::PathBuf,
};

use rand::Rng;
use tetrevo_engine::{GameField, GameStats};
use tetrevo_evaluator::{
    HeuristicWeights, session_evaluator::MAX_MOVES_PER_GAME, turn_evaluator::TurnEvaluator,
};
use tetrevo_training::weights;

use crate::util::{self, DEFAULT_WEIGHTS_PATH};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Weights file (four-line text, or a `.json` AI model)
    #[arg(long, default_value = DEFAULT_WEIGHTS_PATH)]
    weights: PathBuf,
    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum placements
    #[arg(long, default_value_t = MAX_MOVES_PER_GAME)]
    turn_limit: usize,
    /// Print only the final result
    #[arg(long)]
    quiet: bool,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        weights: weights_path,
        seed,
        turn_limit,
        quiet,
    } = arg;
    let mut rng = super::new_rng(*seed);

    let weights = match util::load_weights(weights_path) {
        Ok(weights) => weights,
        Err(e) => {
            eprintln!("Failed to load weights: {e:#}");
            eprintln!("Playing with random weights");
            weights::random(&mut rng)
        }
    };
    eprintln!("Weights: {weights}");

    let mut out = io::stdout().lock();
    play_game(&mut out, &weights, &mut rng, *turn_limit, *quiet)?;
    Ok(())
}

/// Plays one game, writing the board after every placement and a final summary to `out`.
pub(crate) fn play_game<W, R>(
    out: &mut W,
    weights: &HeuristicWeights,
    rng: &mut R,
    turn_limit: usize,
    quiet: bool,
) -> anyhow::Result<GameStats>
where
    W: Write,
    R: Rng + ?Sized,
{
    let turn_evaluator = TurnEvaluator::new(Box::new(*weights));
    let mut field = GameField::new(rng);
    let mut stats = GameStats::new();
    let mut game_over = false;

    while stats.completed_pieces() < turn_limit {
        let Some(outcome) = turn_evaluator.play_turn(&mut field, rng) else {
            game_over = true;
            break;
        };
        stats.complete_piece_drop(outcome.cleared_lines);
        if !quiet {
            writeln!(
                out,
                "Turn {} | Placed {} | Next {} | Score {} | Lines {} | Level {}",
                stats.completed_pieces(),
                outcome.chosen.placement(),
                field.next_piece(),
                stats.score(),
                stats.total_cleared_lines(),
                stats.level(),
            )?;
            writeln!(out, "{}", field.board())?;
        }
    }

    let reason = if game_over {
        "Game over"
    } else {
        "Turn limit reached"
    };
    writeln!(
        out,
        "{reason}! Score: {} | Lines: {} | Pieces: {}",
        stats.score(),
        stats.total_cleared_lines(),
        stats.completed_pieces(),
    )?;
    out.flush()?;
    Ok(stats)
}
