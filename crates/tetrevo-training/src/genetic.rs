//! Genetic algorithm evolving [`HeuristicWeights`].
//!
//! # Algorithm Overview
//!
//! Every generation:
//!
//! 1. **Evaluate Fitness** - Each individual without a fitness plays game sessions; its fitness
//!    is the mean number of cleared lines
//! 2. **Sort** - Best individual first
//! 3. **Elite Selection** - The top ⌊size × elite rate⌋ individuals move on unchanged, keeping
//!    their fitness
//! 4. **Tournament Selection** - Two parents, each the fittest of a random sample
//! 5. **Crossover** - Component-wise mean of the parents
//! 6. **Mutation** - Gaussian noise on randomly chosen components
//!
//! Since elites are never re-evaluated, the best fitness never decreases from one
//! generation to the next.
//!
//! # Parallelization
//!
//! Fitness evaluation runs one scoped thread per individual. Each thread plays with its own
//! [`Pcg32`] seeded from the caller's RNG before any thread starts, so a seeded run is
//! reproducible regardless of scheduling.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_pcg::Pcg32;
//! use tetrevo_training::genetic::{self, GeneticParams};
//!
//! let params = GeneticParams {
//!     population_size: 6,
//!     generations: 2,
//!     turn_limit: 20,
//!     ..GeneticParams::default()
//! };
//! let mut rng = Pcg32::seed_from_u64(0);
//! let best = genetic::run_genetic_algorithm(&params, &mut rng, |_generation, _population| {})
//!     .unwrap();
//! assert!(best.lines.is_finite());
//! ```

use std::{cmp::Ordering, thread};

use rand::{Rng, SeedableRng, seq::IndexedRandom};
use rand_pcg::Pcg32;
use tetrevo_evaluator::{
    HeuristicWeights,
    session_evaluator::{DefaultSessionEvaluator, MAX_MOVES_PER_GAME, SessionEvaluator},
    turn_evaluator::TurnEvaluator,
};
use tetrevo_stats::descriptive::DescriptiveStats;

use crate::weights;

/// Parameters of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneticParams {
    pub population_size: usize,
    pub generations: usize,
    /// Games played per fitness evaluation; fitness is their mean.
    pub games_per_fitness: usize,
    /// Share of the population carried over unchanged (rounded down).
    pub elite_rate: f64,
    pub tournament_size: usize,
    /// Probability of mutating each weight component.
    pub mutation_rate: f64,
    /// Standard deviation of the Gaussian mutation.
    pub mutation_strength: f64,
    /// Maximum placements per game.
    pub turn_limit: usize,
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 20,
            games_per_fitness: 1,
            elite_rate: 0.1,
            tournament_size: 5,
            mutation_rate: 0.1,
            mutation_strength: 0.5,
            turn_limit: MAX_MOVES_PER_GAME,
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum InvalidParamsError {
    #[display("population size must be positive")]
    EmptyPopulation,
    #[display("number of generations must be positive")]
    NoGenerations,
    #[display("games per fitness evaluation must be positive")]
    NoGames,
    #[display("tournament size must be positive")]
    EmptyTournament,
    #[display("{name} must be in [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },
    #[display("mutation strength must be finite and non-negative, got {_0}")]
    InvalidMutationStrength(#[error(not(source))] f64),
}

impl GeneticParams {
    /// Checks that every parameter is usable.
    pub fn validate(&self) -> Result<(), InvalidParamsError> {
        if self.population_size == 0 {
            return Err(InvalidParamsError::EmptyPopulation);
        }
        if self.generations == 0 {
            return Err(InvalidParamsError::NoGenerations);
        }
        if self.games_per_fitness == 0 {
            return Err(InvalidParamsError::NoGames);
        }
        if self.tournament_size == 0 {
            return Err(InvalidParamsError::EmptyTournament);
        }
        for (name, value) in [
            ("elite rate", self.elite_rate),
            ("mutation rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(InvalidParamsError::RateOutOfRange { name, value });
            }
        }
        if !self.mutation_strength.is_finite() || self.mutation_strength < 0.0 {
            return Err(InvalidParamsError::InvalidMutationStrength(
                self.mutation_strength,
            ));
        }
        Ok(())
    }

    /// Returns the number of individuals carried over unchanged.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    #[must_use]
    pub fn elite_count(&self) -> usize {
        (self.population_size as f64 * self.elite_rate).floor() as usize
    }
}

/// A weight vector and its fitness, once evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    weights: HeuristicWeights,
    fitness: Option<f64>,
}

impl Individual {
    /// Creates an unevaluated individual.
    #[must_use]
    pub const fn new(weights: HeuristicWeights) -> Self {
        Self {
            weights,
            fitness: None,
        }
    }

    /// Creates an individual with a known fitness.
    #[must_use]
    pub const fn with_fitness(weights: HeuristicWeights, fitness: f64) -> Self {
        Self {
            weights,
            fitness: Some(fitness),
        }
    }

    /// Creates an unevaluated individual with random weights (see [`weights::random`]).
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(weights::random(rng))
    }

    #[must_use]
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    /// Returns the evaluated fitness, or `None` if not evaluated yet.
    #[must_use]
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    fn cmp_fitness(&self, other: &Self) -> Ordering {
        let key = |ind: &Self| ind.fitness.unwrap_or(f64::NEG_INFINITY);
        key(self).total_cmp(&key(other))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates a population of `count` random individuals.
    pub fn random<R>(count: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let individuals = (0..count).map(|_| Individual::random(rng)).collect();
        Self { individuals }
    }

    #[must_use]
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Returns the first individual; the fittest once [`Self::evaluate_fitness`] has run.
    #[must_use]
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.first()
    }

    /// Evaluates every individual without a fitness, then sorts best first.
    ///
    /// Individuals are evaluated in parallel, each with a [`Pcg32`] seeded from `rng` in
    /// population order.
    pub fn evaluate_fitness<E, R>(&mut self, session_evaluator: &E, games: usize, rng: &mut R)
    where
        E: SessionEvaluator + ?Sized,
        R: Rng + ?Sized,
    {
        let jobs = self
            .individuals
            .iter_mut()
            .filter(|ind| ind.fitness.is_none())
            .map(|ind| (ind, rng.random::<u64>()))
            .collect::<Vec<_>>();

        thread::scope(|s| {
            for (ind, seed) in jobs {
                let turn_evaluator = TurnEvaluator::new(Box::new(ind.weights));
                s.spawn(move || {
                    let mut rng = Pcg32::seed_from_u64(seed);
                    ind.fitness = Some(session_evaluator.play_and_evaluate_sessions(
                        &turn_evaluator,
                        games,
                        &mut rng,
                    ));
                });
            }
        });

        // sort by fitness descending
        self.individuals.sort_by(|a, b| b.cmp_fitness(a));
    }

    /// Statistics of the evaluated fitness values, or `None` if none is evaluated.
    #[must_use]
    pub fn compute_fitness_stats(&self) -> Option<DescriptiveStats> {
        DescriptiveStats::new(self.individuals.iter().filter_map(Individual::fitness))
    }

    /// Statistics of each weight component across the population, in
    /// [`HeuristicWeights::NAMES`] order.
    #[must_use]
    pub fn compute_weight_stats(&self) -> Vec<DescriptiveStats> {
        (0..HeuristicWeights::LEN)
            .filter_map(|i| {
                let values = self.individuals.iter().map(|ind| ind.weights.to_array()[i]);
                DescriptiveStats::new(values)
            })
            .collect()
    }
}

/// Produces the next generation from an evaluated, sorted population.
#[derive(Debug, Clone)]
pub struct PopulationEvolver {
    /// Number of top individuals preserved unchanged (elitism)
    pub elite_count: usize,
    /// Tournament size for selection (larger = stronger selection pressure)
    pub tournament_size: usize,
    /// Probability of mutating each weight component
    pub mutation_rate: f64,
    /// Standard deviation of the Gaussian mutation
    pub mutation_strength: f64,
}

impl PopulationEvolver {
    #[must_use]
    pub fn from_params(params: &GeneticParams) -> Self {
        Self {
            elite_count: params.elite_count(),
            tournament_size: params.tournament_size,
            mutation_rate: params.mutation_rate,
            mutation_strength: params.mutation_strength,
        }
    }

    /// Evolves the population to create the next generation.
    ///
    /// 1. Keeps the top `elite_count` individuals, fitness included
    /// 2. Fills the rest with mutated crossovers of two tournament winners
    ///
    /// The input must be sorted by fitness descending. The result has the same size; new
    /// individuals are unevaluated.
    #[must_use]
    pub fn evolve<R>(&self, population: &Population, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        let current = &population.individuals;
        assert!(current.is_sorted_by(|a, b| a.cmp_fitness(b).is_ge()));

        let mut next = current
            .iter()
            .take(self.elite_count)
            .cloned()
            .collect::<Vec<_>>();

        while next.len() < current.len() {
            let (Some(p1), Some(p2)) = (
                tournament_select(current, self.tournament_size, rng),
                tournament_select(current, self.tournament_size, rng),
            ) else {
                break;
            };
            let mut child = weights::crossover(&p1.weights, &p2.weights);
            weights::mutate(&mut child, self.mutation_rate, self.mutation_strength, rng);
            next.push(Individual::new(child));
        }

        Population { individuals: next }
    }
}

/// Selects an individual using tournament selection.
///
/// Samples `tournament_size` distinct individuals (the whole population if it is smaller)
/// and returns the fittest. A size of 0 is treated as 1. Returns `None` only for an empty
/// population.
pub fn tournament_select<'a, R>(
    population: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> Option<&'a Individual>
where
    R: Rng + ?Sized,
{
    population
        .choose_multiple(rng, tournament_size.max(1))
        .max_by(|a, b| a.cmp_fitness(b))
}

/// Runs a complete training and returns the best weights of the last generation.
///
/// `on_generation` is called after each generation is evaluated, with the zero-based
/// generation index and the sorted population.
pub fn run_genetic_algorithm<R, F>(
    params: &GeneticParams,
    rng: &mut R,
    mut on_generation: F,
) -> Result<HeuristicWeights, InvalidParamsError>
where
    R: Rng + ?Sized,
    F: FnMut(usize, &Population),
{
    params.validate()?;

    let session_evaluator = DefaultSessionEvaluator::new(params.turn_limit);
    let evolver = PopulationEvolver::from_params(params);
    let mut population = Population::random(params.population_size, rng);

    for generation in 0..params.generations {
        population.evaluate_fitness(&session_evaluator, params.games_per_fitness, rng);
        on_generation(generation, &population);
        if generation + 1 < params.generations {
            population = evolver.evolve(&population, rng);
        }
    }

    Ok(population.individuals[0].weights)
}
