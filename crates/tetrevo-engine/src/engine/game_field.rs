use rand::Rng;

use crate::core::{BoardGrid, Piece, PieceKind};

use super::piece_queue::PieceQueue;

/// Board plus the pre-drawn next piece.
#[derive(Debug, Clone)]
pub struct GameField {
    board: BoardGrid,
    queue: PieceQueue,
}

impl GameField {
    /// Creates an empty field and draws the first next piece.
    pub fn new<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::with_board(BoardGrid::EMPTY, rng)
    }

    /// Like [`Self::new`], but starting from an existing board.
    pub fn with_board<R>(board: BoardGrid, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            board,
            queue: PieceQueue::new(rng),
        }
    }

    #[must_use]
    pub fn board(&self) -> &BoardGrid {
        &self.board
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.queue.peek_next()
    }

    /// Takes the next piece from the queue and returns it at the spawn position.
    ///
    /// Returns `None` when the spawn position is blocked, i.e. the game is over. The piece
    /// is consumed either way.
    pub fn spawn<R>(&mut self, rng: &mut R) -> Option<Piece>
    where
        R: Rng + ?Sized,
    {
        let piece = Piece::new(self.queue.pop_next(rng));
        (!self.board.is_game_over(piece)).then_some(piece)
    }

    /// Locks `piece` into the board and clears filled lines.
    ///
    /// Returns the number of cleared lines.
    pub fn complete_piece_drop(&mut self, piece: Piece) -> usize {
        self.board.fill_piece(piece);
        self.board.clear_lines()
    }
}
