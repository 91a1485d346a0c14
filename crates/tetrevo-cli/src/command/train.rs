use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::Rng;
use tetrevo_evaluator::{HeuristicWeights, session_evaluator::MAX_MOVES_PER_GAME};
use tetrevo_training::genetic::{self, GeneticParams, Population};

use crate::{
    model::ai_model::AiModel,
    util::{self, DEFAULT_WEIGHTS_PATH},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Number of individuals per generation
    #[arg(long, default_value_t = 50)]
    population: usize,
    /// Number of generations
    #[arg(long, default_value_t = 20)]
    generations: usize,
    /// Games played per fitness evaluation
    #[arg(long, default_value_t = 1)]
    games: usize,
    /// Maximum placements per game
    #[arg(long, default_value_t = MAX_MOVES_PER_GAME)]
    turn_limit: usize,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Weights file to write
    #[arg(long, default_value = DEFAULT_WEIGHTS_PATH)]
    output: PathBuf,
    /// Also save the result as a JSON AI model
    #[arg(long)]
    model: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let TrainArg {
        population,
        generations,
        games,
        turn_limit,
        seed,
        output,
        model,
    } = arg;
    let params = GeneticParams {
        population_size: *population,
        generations: *generations,
        games_per_fitness: *games,
        turn_limit: *turn_limit,
        ..GeneticParams::default()
    };
    let mut rng = super::new_rng(*seed);
    train_and_save(&params, &mut rng, output, model.as_deref())?;
    Ok(())
}

/// Result of a training run.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TrainedWeights {
    pub(crate) weights: HeuristicWeights,
    pub(crate) final_fitness: f64,
}

/// Trains weights, reporting progress on stderr, and saves them to `output`.
pub(crate) fn train_and_save<R>(
    params: &GeneticParams,
    rng: &mut R,
    output: &Path,
    model_path: Option<&Path>,
) -> anyhow::Result<HeuristicWeights>
where
    R: Rng + ?Sized,
{
    let trained = train(params, rng)?;
    save_trained(&trained, output, model_path)?;
    Ok(trained.weights)
}

pub(crate) fn train<R>(params: &GeneticParams, rng: &mut R) -> anyhow::Result<TrainedWeights>
where
    R: Rng + ?Sized,
{
    eprintln!(
        "Starting genetic algorithm training: {} individuals, {} generations",
        params.population_size, params.generations
    );
    let mut final_fitness = 0.0;
    let weights = genetic::run_genetic_algorithm(params, rng, |generation, population| {
        report_generation(generation, population);
        if let Some(fitness) = population.best().and_then(|ind| ind.fitness()) {
            final_fitness = fitness;
        }
    })?;
    eprintln!("Training completed.");

    Ok(TrainedWeights {
        weights,
        final_fitness,
    })
}

/// Writes the weights file and, if requested, the JSON AI model.
pub(crate) fn save_trained(
    trained: &TrainedWeights,
    output: &Path,
    model_path: Option<&Path>,
) -> anyhow::Result<()> {
    let TrainedWeights {
        weights,
        final_fitness,
    } = *trained;

    util::save_weights(output, &weights)?;
    eprintln!();
    eprintln!("Weights saved successfully");
    eprintln!("  Path: {}", output.display());
    eprintln!("  Weights: {weights}");
    eprintln!("  Final fitness: {final_fitness:.3}");

    if let Some(path) = model_path {
        let model = AiModel {
            name: "genetic".to_owned(),
            trained_at: Utc::now(),
            final_fitness,
            weights,
        };
        eprintln!("  Model: {}", path.display());
        util::save_json(path, &model)?;
    }

    Ok(())
}

fn report_generation(generation: usize, population: &Population) {
    eprintln!("Generation #{}:", generation + 1);

    if let Some(best) = population.best() {
        eprintln!("  Best: {} => {:.3?}", best.weights(), best.fitness());
    }

    let weight_stats = population.compute_weight_stats();
    eprintln!("  Weights Stats ({}):", HeuristicWeights::NAMES.join(", "));
    eprintln!(
        "    Min:    {:.3?}",
        weight_stats.iter().map(|s| s.min).collect::<Vec<_>>(),
    );
    eprintln!(
        "    Max:    {:.3?}",
        weight_stats.iter().map(|s| s.max).collect::<Vec<_>>(),
    );
    eprintln!(
        "    Mean:   {:.3?}",
        weight_stats.iter().map(|s| s.mean).collect::<Vec<_>>(),
    );
    eprintln!(
        "    Stddev: {:.3?}",
        weight_stats.iter().map(|s| s.std_dev).collect::<Vec<_>>(),
    );

    if let Some(fitness_stats) = population.compute_fitness_stats() {
        eprintln!("  Fitness Stats:");
        eprintln!("    Min:    {:.3}", fitness_stats.min);
        eprintln!("    Max:    {:.3}", fitness_stats.max);
        eprintln!("    Mean:   {:.3}", fitness_stats.mean);
        eprintln!("    Median: {:.3}", fitness_stats.median);
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_save_failure_is_fatal() {
        let params = GeneticParams {
            population_size: 3,
            generations: 1,
            turn_limit: 5,
            ..GeneticParams::default()
        };
        let mut rng = Pcg32::seed_from_u64(4);
        let err = train_and_save(&params, &mut rng, &env::temp_dir(), None).unwrap_err();
        assert!(err.to_string().contains("Failed to write weights file"));
    }
}
