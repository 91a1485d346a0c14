//! Move selection and self-play for the falling-block AI.
//!
//! Evaluation works on three levels:
//!
//! 1. **Placement Evaluation** ([`placement_evaluator`]) - Scores one resting position of a
//!    piece from the features of the board it leaves behind.
//! 2. **Turn Evaluation** ([`turn_evaluator`]) - Enumerates every rotation and column,
//!    drops the piece, and keeps the highest-scoring placement.
//! 3. **Session Evaluation** ([`session_evaluator`]) - Plays whole games and turns them
//!    into a fitness value for training.
//!
//! # Architecture
//!
//! ```text
//! Session Evaluation (fitness = cleared lines)
//!     ↓ uses
//! Turn Evaluation (exhaustive drop search)
//!     ↓ uses
//! Placement Evaluation (linear heuristic over board features)
//! ```
//!
//! The only placement evaluator shipped is [`HeuristicWeights`], a linear combination of
//! cleared lines (squared), aggregate height, holes and bumpiness.
//!
//! # Example
//!
//! ```
//! use tetrevo_engine::{BoardGrid, PieceKind};
//! use tetrevo_evaluator::{HeuristicWeights, turn_evaluator};
//!
//! let weights = HeuristicWeights::new(0.76, -0.51, -0.36, -0.18);
//! let best = turn_evaluator::find_best_move(&BoardGrid::EMPTY, PieceKind::T, &weights);
//! assert!(best.is_some());
//! ```

pub use self::heuristic_weights::{HeuristicWeights, ParseWeightsError};

mod heuristic_weights;
pub mod placement_analysis;
pub mod placement_evaluator;
pub mod session_evaluator;
pub mod turn_evaluator;
