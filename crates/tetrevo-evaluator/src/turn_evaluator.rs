//! Turn evaluation: selecting the best piece placement for the current turn.
//!
//! # How It Works
//!
//! For every rotation and every anchor column in [`SEARCH_X_RANGE`]:
//!
//! 1. **Find a start row** - Starting at row 0, move the piece up until it fits. Columns
//!    where it never fits are skipped.
//! 2. **Drop** - Move the piece down while the next row is still valid.
//! 3. **Score** - Lock it into a copy of the board, clear lines, and ask the
//!    [`PlacementEvaluator`] for a score.
//!
//! The highest score wins. Comparison is strict, so among equal scores the first candidate
//! in enumeration order (rotation ascending, then column ascending) is kept. With all-zero
//! weights this is always rotation 0 at the leftmost column the piece fits in.
//!
//! The search range reaches three columns past each edge so that every offset of a piece
//! inside its 4×4 box is tried.
//!
//! # Usage
//!
//! ```
//! use rand::SeedableRng;
//! use rand_pcg::Pcg32;
//! use tetrevo_engine::{GameField, GameStats};
//! use tetrevo_evaluator::{HeuristicWeights, turn_evaluator::TurnEvaluator};
//!
//! let weights = HeuristicWeights::new(0.76, -0.51, -0.36, -0.18);
//! let turn_evaluator = TurnEvaluator::new(Box::new(weights));
//!
//! let mut rng = Pcg32::seed_from_u64(0);
//! let mut field = GameField::new(&mut rng);
//! let stats: GameStats = turn_evaluator.play_session(&mut field, &mut rng, 100);
//! assert!(stats.completed_pieces() <= 100);
//! ```

use std::ops::RangeInclusive;

use rand::Rng;
use tetrevo_engine::{BoardGrid, GameField, GameStats, Piece, PieceKind, PieceRotation};

use crate::{placement_analysis::PlacementAnalysis, placement_evaluator::PlacementEvaluator};

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const BOARD_WIDTH_I32: i32 = BoardGrid::WIDTH as i32;
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const BOARD_HEIGHT_I32: i32 = BoardGrid::HEIGHT as i32;

/// Anchor columns tried for every rotation.
pub const SEARCH_X_RANGE: RangeInclusive<i32> = -3..=BOARD_WIDTH_I32 + 2;

/// A chosen placement: rotation, anchor column, and resting position with its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    placement: Piece,
    score: f64,
}

impl Move {
    #[must_use]
    pub fn rotation(&self) -> PieceRotation {
        self.placement.rotation()
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.placement.x()
    }

    /// Returns the piece at its resting position.
    #[must_use]
    pub fn placement(&self) -> Piece {
        self.placement
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }
}

/// Result of one played turn.
#[derive(Debug, Clone, Copy)]
pub struct TurnOutcome {
    pub chosen: Move,
    pub cleared_lines: usize,
}

/// Finds the resting position of a piece dropped at column `x`.
///
/// The search starts at row 0 and moves the piece up until it fits, then drops it while the
/// row below is free. Returns `None` if the piece fits nowhere in the column (for example
/// when part of it is outside the side walls).
#[must_use]
pub fn drop_position(
    board: &BoardGrid,
    kind: PieceKind,
    rotation: PieceRotation,
    x: i32,
) -> Option<Piece> {
    let mut piece = Piece::at(kind, rotation, x, 0);
    while !board.is_valid(piece) && piece.y() > -BOARD_HEIGHT_I32 {
        piece = piece.up();
    }
    if piece.y() <= -BOARD_HEIGHT_I32 {
        return None;
    }
    while board.is_valid(piece.down()) {
        piece = piece.down();
    }
    Some(piece)
}

/// Returns every reachable resting position, in search order.
pub fn candidate_placements(board: &BoardGrid, kind: PieceKind) -> impl Iterator<Item = Piece> {
    PieceRotation::ALL.into_iter().flat_map(move |rotation| {
        SEARCH_X_RANGE.filter_map(move |x| drop_position(board, kind, rotation, x))
    })
}

/// Finds the highest-scoring placement of `kind` on `board`.
///
/// Returns `None` when the piece cannot be placed anywhere.
#[must_use]
pub fn find_best_move<E>(board: &BoardGrid, kind: PieceKind, evaluator: &E) -> Option<Move>
where
    E: PlacementEvaluator + ?Sized,
{
    select_best(board, kind, evaluator).map(|(chosen, _analysis)| chosen)
}

fn select_best<E>(
    board: &BoardGrid,
    kind: PieceKind,
    evaluator: &E,
) -> Option<(Move, PlacementAnalysis)>
where
    E: PlacementEvaluator + ?Sized,
{
    let mut best_score = f64::NEG_INFINITY;
    let mut best_result = None;

    for placement in candidate_placements(board, kind) {
        let analysis = PlacementAnalysis::from_board(board, placement);
        let score = evaluator.evaluate_placement(&analysis);
        if score > best_score {
            best_score = score;
            best_result = Some((Move { placement, score }, analysis));
        }
    }

    best_result
}

/// Evaluates and selects the best placement for the current turn.
#[derive(Debug)]
pub struct TurnEvaluator<'a> {
    placement_evaluator: Box<dyn PlacementEvaluator + 'a>,
}

impl<'a> TurnEvaluator<'a> {
    #[must_use]
    pub fn new(placement_evaluator: Box<dyn PlacementEvaluator + 'a>) -> Self {
        Self {
            placement_evaluator,
        }
    }

    /// Selects the best placement of `kind` together with its analysis.
    #[must_use]
    pub fn select_best_move(
        &self,
        board: &BoardGrid,
        kind: PieceKind,
    ) -> Option<(Move, PlacementAnalysis)> {
        select_best(board, kind, self.placement_evaluator.as_ref())
    }

    /// Plays one turn: spawns the next piece, places it at the best position and clears
    /// lines.
    ///
    /// Returns `None` if the spawn position is blocked (game over).
    pub fn play_turn<R>(&self, field: &mut GameField, rng: &mut R) -> Option<TurnOutcome>
    where
        R: Rng + ?Sized,
    {
        let piece = field.spawn(rng)?;
        let (chosen, analysis) = self.select_best_move(field.board(), piece.kind())?;
        let cleared_lines = field.complete_piece_drop(chosen.placement());
        debug_assert_eq!(cleared_lines, analysis.cleared_lines());
        Some(TurnOutcome {
            chosen,
            cleared_lines,
        })
    }

    /// Plays turns until the game is over or `turn_limit` pieces have been placed.
    #[must_use]
    pub fn play_session<R>(
        &self,
        field: &mut GameField,
        rng: &mut R,
        turn_limit: usize,
    ) -> GameStats
    where
        R: Rng + ?Sized,
    {
        let mut stats = GameStats::new();
        for _ in 0..turn_limit {
            let Some(outcome) = self.play_turn(field, rng) else {
                break;
            };
            stats.complete_piece_drop(outcome.cleared_lines);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use tetrevo_engine::Block;

    use super::*;
    use crate::HeuristicWeights;

    const TRAINED: HeuristicWeights =
        HeuristicWeights::new(0.760_666, -0.510_066, -0.356_630, -0.184_483);

    fn rotation(r: u8) -> PieceRotation {
        PieceRotation::new(r).unwrap()
    }

    #[test]
    fn test_search_range() {
        assert_eq!(SEARCH_X_RANGE, -3..=12);
    }

    #[test]
    fn test_drop_position_rests_on_floor_or_stack() {
        let boards = [
            BoardGrid::EMPTY,
            BoardGrid::from_ascii(
                "
                ....I.....
                ..III..I..
                .IIIII.II.
                IIIIIII.II
                ",
            ),
        ];
        for board in &boards {
            for kind in PieceKind::ALL {
                for rotation in PieceRotation::ALL {
                    for x in SEARCH_X_RANGE {
                        if let Some(piece) = drop_position(board, kind, rotation, x) {
                            assert!(board.is_valid(piece), "{piece}");
                            assert!(!board.is_valid(piece.down()), "{piece}");
                            assert_eq!(piece.x(), x);
                            assert_eq!(piece.rotation(), rotation);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_drop_position_outside_walls() {
        let board = BoardGrid::EMPTY;
        // The O piece occupies columns 1-2 of its box.
        assert!(drop_position(&board, PieceKind::O, PieceRotation::SPAWN, -2).is_none());
        assert_eq!(
            drop_position(&board, PieceKind::O, PieceRotation::SPAWN, -1).map(|p| p.y()),
            Some(18)
        );
        assert_eq!(
            drop_position(&board, PieceKind::O, PieceRotation::SPAWN, 7).map(|p| p.y()),
            Some(18)
        );
        assert!(drop_position(&board, PieceKind::O, PieceRotation::SPAWN, 8).is_none());
    }

    #[test]
    fn test_drop_position_above_full_column() {
        let mut board = BoardGrid::EMPTY;
        for y in 0..BoardGrid::HEIGHT {
            board.set_block(0, y, Block::Piece(PieceKind::J));
        }
        // Vertical I in column 0 only fits entirely above the board.
        let piece = drop_position(&board, PieceKind::I, rotation(1), -1).unwrap();
        assert_eq!(piece.y(), -4);
    }

    #[test]
    fn test_vertical_i_fills_well() {
        let board = BoardGrid::from_ascii(
            "
            IIIII.IIII
            ",
        );
        // Rotation 1 occupies column 1 of the box, so anchor x = 4 targets column 5.
        let piece = drop_position(&board, PieceKind::I, rotation(1), 4).unwrap();
        assert_eq!(piece.y(), 16);

        let (after, cleared) = board.with_piece(piece).with_cleared_lines();
        assert_eq!(cleared, 1);
        assert_eq!(after.rows().count(), BoardGrid::HEIGHT);
        assert_eq!(after.column_heights(), [0, 0, 0, 0, 0, 3, 0, 0, 0, 0]);
    }

    #[test]
    fn test_zero_weights_pick_first_candidate() {
        let board = BoardGrid::EMPTY;
        for kind in PieceKind::ALL {
            let best = find_best_move(&board, kind, &HeuristicWeights::ZERO).unwrap();
            let first_x = SEARCH_X_RANGE
                .find(|x| drop_position(&board, kind, PieceRotation::SPAWN, *x).is_some())
                .unwrap();
            assert_eq!(best.rotation(), PieceRotation::SPAWN, "{kind}");
            assert_eq!(best.x(), first_x, "{kind}");
        }

        let i = find_best_move(&board, PieceKind::I, &HeuristicWeights::ZERO).unwrap();
        assert_eq!(i.x(), 0);
        let o = find_best_move(&board, PieceKind::O, &HeuristicWeights::ZERO).unwrap();
        assert_eq!(o.x(), -1);
    }

    #[test]
    fn test_prefers_line_clear() {
        let board = BoardGrid::from_ascii(
            "
            IIII..IIII
            IIII..IIII
            ",
        );
        let weights = HeuristicWeights::new(1.0, 0.0, 0.0, 0.0);
        let best = find_best_move(&board, PieceKind::O, &weights).unwrap();
        assert_eq!(best.rotation(), PieceRotation::SPAWN);
        assert_eq!(best.x(), 3);
        assert_eq!(best.placement().y(), 18);
        assert!((best.score() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_avoids_holes() {
        let board = BoardGrid::from_ascii(
            "
            I.........
            ",
        );
        let weights = HeuristicWeights::new(0.0, 0.0, -1.0, 0.0);
        let best = find_best_move(&board, PieceKind::I, &weights).unwrap();
        let after = board.with_piece(best.placement());
        assert_eq!(after.holes(), 0);
    }

    #[test]
    fn test_full_board_still_has_placements_above() {
        let mut board = BoardGrid::EMPTY;
        for y in 0..BoardGrid::HEIGHT {
            for x in 0..BoardGrid::WIDTH {
                board.set_block(x, y, Block::Piece(PieceKind::T));
            }
        }
        // Every column still has room above the board.
        assert!(find_best_move(&board, PieceKind::T, &TRAINED).is_some());
        assert!(drop_position(&board, PieceKind::T, PieceRotation::SPAWN, -3).is_none());
    }

    #[test]
    fn test_play_turn_updates_field() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut field = GameField::new(&mut rng);
        let evaluator = TurnEvaluator::new(Box::new(TRAINED));
        let kind = field.next_piece();

        let outcome = evaluator.play_turn(&mut field, &mut rng).unwrap();
        assert_eq!(outcome.chosen.placement().kind(), kind);
        assert_eq!(outcome.cleared_lines, 0);
        assert_eq!(
            *field.board(),
            BoardGrid::EMPTY.with_piece(outcome.chosen.placement())
        );
    }

    #[test]
    fn test_play_session_respects_turn_limit() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut field = GameField::new(&mut rng);
        let evaluator = TurnEvaluator::new(Box::new(TRAINED));
        let stats = evaluator.play_session(&mut field, &mut rng, 30);
        assert_eq!(stats.completed_pieces(), 30);
    }

    #[test]
    fn test_trained_weights_clear_lines() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut field = GameField::new(&mut rng);
        let evaluator = TurnEvaluator::new(Box::new(TRAINED));
        let stats = evaluator.play_session(&mut field, &mut rng, 500);
        assert!(stats.total_cleared_lines() > 0);
    }
}
