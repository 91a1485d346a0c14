use std::fmt;

use super::{
    BOARD_HEIGHT, BOARD_WIDTH,
    piece::{Piece, PieceKind},
};

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const HEIGHT_I32: i32 = BOARD_HEIGHT as i32;

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    /// Empty cell (id 0).
    #[default]
    Empty,
    /// Locked cell of a specific piece type (id 1-7).
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Block::Empty)
    }

    /// Returns the cell id: 0 for empty, otherwise the piece id.
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Block::Empty => 0,
            Block::Piece(kind) => kind.id(),
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Block::Empty => '.',
            Block::Piece(kind) => kind.as_char(),
        }
    }
}

type BlockRow = [Block; BOARD_WIDTH];

const EMPTY_ROW: BlockRow = [Block::Empty; BOARD_WIDTH];

fn is_filled(row: &BlockRow) -> bool {
    row.iter().all(|b| !b.is_empty())
}

/// Fixed 10×20 grid of locked cells.
///
/// `BoardGrid` is a plain `Copy` value: every operation either returns a new grid
/// (`with_*`) or mutates a grid the caller owns (`fill_piece`, `clear_lines`). Row 0 is the
/// top of the board.
///
/// # Example
///
/// ```
/// use tetrevo_engine::{BoardGrid, Piece, PieceKind, PieceRotation};
///
/// let board = BoardGrid::EMPTY;
/// let piece = Piece::at(PieceKind::O, PieceRotation::SPAWN, 4, 18);
/// assert!(board.is_valid(piece));
///
/// let (board, cleared) = board.with_piece(piece).with_cleared_lines();
/// assert_eq!(cleared, 0);
/// assert_eq!(board.aggregate_height(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGrid {
    rows: [BlockRow; BOARD_HEIGHT],
}

impl Default for BoardGrid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl BoardGrid {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; BOARD_HEIGHT],
    };

    /// Returns the block at column `x`, row `y`.
    #[must_use]
    pub fn block(&self, x: usize, y: usize) -> Block {
        self.rows[y][x]
    }

    pub fn set_block(&mut self, x: usize, y: usize, block: Block) {
        self.rows[y][x] = block;
    }

    /// Returns an iterator over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block; BOARD_WIDTH]> {
        self.rows.iter()
    }

    /// Checks whether `piece` can occupy its position.
    ///
    /// A piece is rejected if any of its cells is left of column 0, right of the last column,
    /// below the last row, or overlaps a locked cell. Cells above row 0 are always free, so
    /// a piece may stick out of the top of the board.
    #[must_use]
    pub fn is_valid(&self, piece: Piece) -> bool {
        piece.occupied_positions().all(|(x, y)| {
            let Some(x) = usize::try_from(x).ok().filter(|x| *x < Self::WIDTH) else {
                return false;
            };
            if y >= HEIGHT_I32 {
                return false;
            }
            match usize::try_from(y) {
                Ok(y) => self.rows[y][x].is_empty(),
                Err(_) => true,
            }
        })
    }

    /// Returns `true` if the piece cannot be spawned.
    #[must_use]
    pub fn is_game_over(&self, spawn: Piece) -> bool {
        !self.is_valid(spawn)
    }

    /// Locks the piece into the board.
    ///
    /// Cells outside the board (in particular above row 0) are dropped.
    pub fn fill_piece(&mut self, piece: Piece) {
        let block = Block::Piece(piece.kind());
        for (x, y) in piece.occupied_positions() {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if x < Self::WIDTH && y < Self::HEIGHT {
                self.rows[y][x] = block;
            }
        }
    }

    /// Returns a copy of this board with the piece locked in.
    #[must_use]
    pub fn with_piece(&self, piece: Piece) -> Self {
        let mut board = *self;
        board.fill_piece(piece);
        board
    }

    /// Clears filled lines and returns the number of lines cleared.
    ///
    /// Cleared rows are removed, the rows above shift down, and empty rows are inserted at
    /// the top.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..Self::HEIGHT).rev() {
            if is_filled(&self.rows[y]) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(EMPTY_ROW);
        count
    }

    /// Returns a copy of this board with filled lines cleared, and the number cleared.
    #[must_use]
    pub fn with_cleared_lines(&self) -> (Self, usize) {
        let mut board = *self;
        let cleared = board.clear_lines();
        (board, cleared)
    }

    /// Height of column `x`: distance from the floor to its topmost occupied cell.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn column_height(&self, x: usize) -> u32 {
        self.rows
            .iter()
            .position(|row| !row[x].is_empty())
            .map_or(0, |top| (Self::HEIGHT - top) as u32)
    }

    #[must_use]
    pub fn column_heights(&self) -> [u32; BOARD_WIDTH] {
        std::array::from_fn(|x| self.column_height(x))
    }

    /// Sum of all column heights.
    #[must_use]
    pub fn aggregate_height(&self) -> u32 {
        self.column_heights().iter().sum()
    }

    /// Number of empty cells below the topmost occupied cell of their column.
    #[must_use]
    pub fn holes(&self) -> u32 {
        let mut holes = 0;
        for x in 0..Self::WIDTH {
            let mut covered = false;
            for row in &self.rows {
                if !row[x].is_empty() {
                    covered = true;
                } else if covered {
                    holes += 1;
                }
            }
        }
        holes
    }

    /// Sum of absolute height differences between adjacent columns.
    #[must_use]
    pub fn bumpiness(&self) -> u32 {
        self.column_heights()
            .windows(2)
            .map(|w| w[0].abs_diff(w[1]))
            .sum()
    }

    /// Creates a `BoardGrid` from ASCII art, for tests and fixtures.
    ///
    /// `.` is an empty cell, a piece letter (`IOTSZJL`) is a cell of that piece and any other
    /// non-space character is an I cell. Each non-blank line must have exactly 10 cells;
    /// lines are aligned to the bottom of the board.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut board = Self::EMPTY;
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= Self::HEIGHT,
            "at most {} rows allowed, got {}",
            Self::HEIGHT,
            lines.len()
        );
        let top = Self::HEIGHT - lines.len();

        for (i, line) in lines.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            assert_eq!(
                cells.len(),
                Self::WIDTH,
                "Each row must have exactly {} cells, got {} at row {}",
                Self::WIDTH,
                cells.len(),
                i
            );
            for (x, &ch) in cells.iter().enumerate() {
                if ch != '.' {
                    let kind = PieceKind::from_char(ch).unwrap_or(PieceKind::I);
                    board.rows[top + i][x] = Block::Piece(kind);
                }
            }
        }
        board
    }
}

impl fmt::Display for BoardGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for block in row {
                write!(f, "{}", block.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
