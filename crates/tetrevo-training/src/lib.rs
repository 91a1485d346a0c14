//! Training of [`HeuristicWeights`](tetrevo_evaluator::HeuristicWeights) by a genetic
//! algorithm.
//!
//! # How Training Works
//!
//! 1. **Population** - Create individuals with random weights
//! 2. **Evaluation** - Each individual plays games with its weights; fitness is the mean
//!    number of cleared lines
//! 3. **Selection** - Keep the elites, pick parents by tournament
//! 4. **Reproduction** - Crossover and mutation produce the rest of the next generation
//! 5. **Repeat** - For a fixed number of generations
//!
//! # Architecture
//!
//! ```text
//! Genetic Algorithm (genetic)
//!     ↓ evolves
//! Heuristic Weights (weights)
//!     ↓ used by
//! Turn Evaluator (tetrevo-evaluator)
//!     ↓ played by
//! Session Evaluator (fitness = cleared lines)
//! ```
//!
//! See [`genetic::run_genetic_algorithm`] for the entry point.

pub mod genetic;
pub mod weights;
