//! Session evaluation: fitness of a weight vector measured by self-play.
//!
//! A session is one game started on an empty board and played by a [`TurnEvaluator`] until
//! the spawn position is blocked or the turn limit is reached. Its fitness is the total number
//! of cleared lines. The turn limit bounds the cost of a game even for weights that never top
//! out.
//!
//! # Usage
//!
//! ```
//! use rand::SeedableRng;
//! use rand_pcg::Pcg32;
//! use tetrevo_evaluator::{
//!     HeuristicWeights,
//!     session_evaluator::{DefaultSessionEvaluator, SessionEvaluator},
//!     turn_evaluator::TurnEvaluator,
//! };
//!
//! let weights = HeuristicWeights::new(0.76, -0.51, -0.36, -0.18);
//! let turn_evaluator = TurnEvaluator::new(Box::new(weights));
//! let session_evaluator = DefaultSessionEvaluator::new(50);
//!
//! let mut rng = Pcg32::seed_from_u64(3);
//! let fitness = session_evaluator.play_and_evaluate_sessions(&turn_evaluator, 2, &mut rng);
//! assert!(fitness >= 0.0);
//! ```

use std::fmt;

use rand::{Rng, RngCore};
use tetrevo_engine::GameField;

use crate::{HeuristicWeights, turn_evaluator::TurnEvaluator};

/// Default turn limit of a simulated game.
pub const MAX_MOVES_PER_GAME: usize = 500;

/// Plays one game with `weights` and returns the number of cleared lines.
///
/// The game stops when a spawned piece does not fit or after `turn_limit` placements.
#[expect(clippy::cast_precision_loss)]
pub fn simulate_game<R>(weights: &HeuristicWeights, rng: &mut R, turn_limit: usize) -> f64
where
    R: Rng + ?Sized,
{
    let turn_evaluator = TurnEvaluator::new(Box::new(*weights));
    let mut field = GameField::new(rng);
    let stats = turn_evaluator.play_session(&mut field, rng, turn_limit);
    stats.total_cleared_lines() as f64
}

/// Evaluates complete game sessions for training.
///
/// Used by the genetic algorithm to compute fitness scores for individuals.
pub trait SessionEvaluator: fmt::Debug + Send + Sync {
    /// Plays and evaluates a single game session.
    fn play_and_evaluate_session(
        &self,
        turn_evaluator: &TurnEvaluator,
        rng: &mut dyn RngCore,
    ) -> f64;

    /// Plays `games` sessions and returns their mean fitness, or 0 for no games.
    #[expect(clippy::cast_precision_loss)]
    fn play_and_evaluate_sessions(
        &self,
        turn_evaluator: &TurnEvaluator,
        games: usize,
        rng: &mut dyn RngCore,
    ) -> f64 {
        if games == 0 {
            return 0.0;
        }
        let total: f64 = (0..games)
            .map(|_| self.play_and_evaluate_session(turn_evaluator, rng))
            .sum();
        total / games as f64
    }
}

/// Scores a session by its total cleared lines.
#[derive(Debug, Clone)]
pub struct DefaultSessionEvaluator {
    turn_limit: usize,
}

impl Default for DefaultSessionEvaluator {
    fn default() -> Self {
        Self::new(MAX_MOVES_PER_GAME)
    }
}

impl DefaultSessionEvaluator {
    #[must_use]
    pub const fn new(turn_limit: usize) -> Self {
        Self { turn_limit }
    }

    #[must_use]
    pub const fn turn_limit(&self) -> usize {
        self.turn_limit
    }
}

impl SessionEvaluator for DefaultSessionEvaluator {
    #[expect(clippy::cast_precision_loss)]
    fn play_and_evaluate_session(
        &self,
        turn_evaluator: &TurnEvaluator,
        rng: &mut dyn RngCore,
    ) -> f64 {
        let mut field = GameField::new(rng);
        let stats = turn_evaluator.play_session(&mut field, rng, self.turn_limit);
        stats.total_cleared_lines() as f64
    }
}
