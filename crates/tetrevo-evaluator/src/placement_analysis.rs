//! Board state after a piece placement.
//!
//! [`PlacementAnalysis`] locks a piece into a copy of the board, clears filled lines, and
//! records the features the heuristic scores: cleared lines, aggregate height, holes and
//! bumpiness of the resulting board.

use tetrevo_engine::{BoardGrid, Piece};

#[derive(Debug, Clone)]
pub struct PlacementAnalysis {
    placement: Piece,
    cleared_lines: usize,
    board: BoardGrid,
    aggregate_height: u32,
    holes: u32,
    bumpiness: u32,
}

impl PlacementAnalysis {
    /// Places `placement` on a copy of `before_placement` and measures the result.
    ///
    /// The board itself is not modified.
    #[must_use]
    pub fn from_board(before_placement: &BoardGrid, placement: Piece) -> Self {
        let (board, cleared_lines) = before_placement
            .with_piece(placement)
            .with_cleared_lines();
        Self {
            placement,
            cleared_lines,
            aggregate_height: board.aggregate_height(),
            holes: board.holes(),
            bumpiness: board.bumpiness(),
            board,
        }
    }

    #[must_use]
    pub fn placement(&self) -> Piece {
        self.placement
    }

    #[must_use]
    pub fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    /// Returns the board after placement and line clears.
    #[must_use]
    pub fn board(&self) -> &BoardGrid {
        &self.board
    }

    #[must_use]
    pub fn aggregate_height(&self) -> u32 {
        self.aggregate_height
    }

    #[must_use]
    pub fn holes(&self) -> u32 {
        self.holes
    }

    #[must_use]
    pub fn bumpiness(&self) -> u32 {
        self.bumpiness
    }
}

#[cfg(test)]
mod tests {
    use tetrevo_engine::{PieceKind, PieceRotation};

    use super::*;

    #[test]
    fn test_analysis_of_line_clear() {
        let before = BoardGrid::from_ascii(
            "
            ..........
            IIII..IIII
            ",
        );
        let o = Piece::at(PieceKind::O, PieceRotation::SPAWN, 3, 18);
        let analysis = PlacementAnalysis::from_board(&before, o);

        assert_eq!(analysis.cleared_lines(), 1);
        assert_eq!(analysis.placement(), o);
        // Only the upper half of the O piece remains, on the bottom row.
        assert_eq!(analysis.aggregate_height(), 2);
        assert_eq!(analysis.holes(), 0);
        assert_eq!(analysis.bumpiness(), 2);
        assert_eq!(analysis.board().column_heights()[4], 1);
        // The input board is untouched.
        assert_eq!(before.column_heights()[4], 0);
    }

    #[test]
    fn test_analysis_counts_new_holes() {
        let before = BoardGrid::from_ascii(
            "
            I.........
            ",
        );
        // Horizontal I resting on the single block leaves three covered empty cells.
        let i = Piece::at(PieceKind::I, PieceRotation::SPAWN, 0, 17);
        let analysis = PlacementAnalysis::from_board(&before, i);

        assert_eq!(analysis.cleared_lines(), 0);
        assert_eq!(analysis.holes(), 3);
        assert_eq!(analysis.aggregate_height(), 8);
        assert_eq!(analysis.bumpiness(), 2);
    }
}
