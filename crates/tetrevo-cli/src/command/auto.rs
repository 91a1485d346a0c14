use std::{
    io,
    path::{Path, PathBuf},
};

use rand::Rng;
use tetrevo_evaluator::{HeuristicWeights, session_evaluator::MAX_MOVES_PER_GAME};
use tetrevo_training::genetic::GeneticParams;

use crate::util::{self, DEFAULT_WEIGHTS_PATH};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoArg {
    /// Weights file to load, or to write after training
    #[arg(long, default_value = DEFAULT_WEIGHTS_PATH)]
    weights: PathBuf,
}

impl Default for AutoArg {
    fn default() -> Self {
        Self {
            weights: PathBuf::from(DEFAULT_WEIGHTS_PATH),
        }
    }
}

pub(crate) fn run(arg: &AutoArg) -> anyhow::Result<()> {
    let AutoArg { weights: path } = arg;
    let mut rng = super::new_rng(None);

    let weights = match util::load_weights(path) {
        Ok(weights) => {
            eprintln!("Loaded weights from {}", path.display());
            weights
        }
        Err(e) => {
            eprintln!("Failed to load weights: {e:#}");
            eprintln!("Training new weights");
            train_for_play(&GeneticParams::default(), &mut rng, path)?
        }
    };
    eprintln!("Weights: {weights}");

    let mut out = io::stdout().lock();
    super::play::play_game(&mut out, &weights, &mut rng, MAX_MOVES_PER_GAME, false)?;
    Ok(())
}

/// Trains weights and tries to save them to `path`.
///
/// A failed save is only reported: the trained weights are still returned for play.
fn train_for_play<R>(
    params: &GeneticParams,
    rng: &mut R,
    path: &Path,
) -> anyhow::Result<HeuristicWeights>
where
    R: Rng + ?Sized,
{
    let trained = super::train::train(params, rng)?;
    if let Err(e) = super::train::save_trained(&trained, path, None) {
        eprintln!("Warning: Failed to save weights: {e:#}");
    }
    Ok(trained.weights)
}
