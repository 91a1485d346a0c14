//! Placement evaluation: scoring individual piece placements.
//!
//! A [`PlacementEvaluator`] turns a [`PlacementAnalysis`] into a single score; the turn
//! evaluator keeps the placement with the highest one. [`HeuristicWeights`] is the linear
//! evaluator used throughout training and play:
//!
//! ```text
//! score = lines² × w_lines + aggregate_height × w_height + holes × w_holes + bumpiness × w_bumpiness
//! ```
//!
//! Squaring the line count favors clearing several lines at once.

use std::fmt;

use crate::{HeuristicWeights, placement_analysis::PlacementAnalysis};

/// Evaluates piece placements by assigning scores.
pub trait PlacementEvaluator: fmt::Debug + Send + Sync {
    /// Evaluates a placement and returns a score (higher is better).
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> f64;
}

impl PlacementEvaluator for HeuristicWeights {
    #[inline]
    #[expect(clippy::cast_precision_loss)]
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> f64 {
        let lines = analysis.cleared_lines() as f64;
        lines * lines * self.lines
            + f64::from(analysis.aggregate_height()) * self.height
            + f64::from(analysis.holes()) * self.holes
            + f64::from(analysis.bumpiness()) * self.bumpiness
    }
}

#[cfg(test)]
mod tests {
    use tetrevo_engine::{BoardGrid, Piece, PieceKind, PieceRotation};

    use super::*;

    #[test]
    fn test_linear_score() {
        let before = BoardGrid::from_ascii(
            "
            IIII..IIII
            IIII..IIII
            ",
        );
        let o = Piece::at(PieceKind::O, PieceRotation::SPAWN, 3, 18);
        let analysis = PlacementAnalysis::from_board(&before, o);
        assert_eq!(analysis.cleared_lines(), 2);

        let weights = HeuristicWeights::new(1.5, -1.0, -1.0, -1.0);
        // both rows clear, leaving an empty board: only 2² × 1.5 remains
        assert_eq!(analysis.aggregate_height(), 0);
        assert_eq!(analysis.bumpiness(), 0);
        assert!((weights.evaluate_placement(&analysis) - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_feature_terms() {
        let before = BoardGrid::from_ascii(
            "
            I.........
            ",
        );
        let i = Piece::at(PieceKind::I, PieceRotation::SPAWN, 0, 17);
        let analysis = PlacementAnalysis::from_board(&before, i);

        // aggregate height 8, holes 3, bumpiness 2
        let weights = HeuristicWeights::new(10.0, -1.0, -2.0, -3.0);
        assert!((weights.evaluate_placement(&analysis) - (-8.0 - 6.0 - 6.0)).abs() < 1e-9);
        assert!(HeuristicWeights::ZERO.evaluate_placement(&analysis).abs() < f64::EPSILON);
    }
}
