use std::fmt;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};

/// Column of the anchor where new pieces appear.
pub const PIECE_SPAWN_X: i32 = 3;
/// Row of the anchor where new pieces appear.
pub const PIECE_SPAWN_Y: i32 = 0;

/// A Tetris piece (tetromino) with position, rotation, and type.
///
/// Pieces are immutable values - movement and rotation return new `Piece` instances.
///
/// # Coordinate System
///
/// - `(x, y)` is the top-left corner of the piece's 4×4 bounding box in board coordinates
/// - X increases rightward (columns), Y increases downward (rows)
/// - Both coordinates are signed: a piece may hang over the left edge of its bounding box or
///   sit partially above the visible board
///
/// # Example
///
/// ```
/// use tetrevo_engine::{Piece, PieceKind, PieceRotation};
///
/// let piece = Piece::new(PieceKind::T);
/// assert_eq!((piece.x(), piece.y()), (3, 0));
///
/// let rotated = piece.rotated_right().down();
/// assert_eq!(rotated.rotation(), PieceRotation::new(1).unwrap());
/// assert_eq!(rotated.y(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rotation: PieceRotation,
    x: i32,
    y: i32,
}

impl Piece {
    /// Creates a piece at the spawn position in its initial rotation.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self::at(kind, PieceRotation::SPAWN, PIECE_SPAWN_X, PIECE_SPAWN_Y)
    }

    #[must_use]
    pub const fn at(kind: PieceKind, rotation: PieceRotation, x: i32, y: i32) -> Self {
        Self {
            kind,
            rotation,
            x,
            y,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        self.kind.shape(self.rotation)
    }

    /// Returns the board coordinates `(x, y)` of every cell the piece occupies.
    ///
    /// Coordinates may lie outside the board.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let (x0, y0) = (self.x, self.y);
        self.shape()
            .occupied_cells()
            .map(move |(dx, dy)| (x0 + dx, y0 + dy))
    }

    #[must_use]
    pub const fn with_y(&self, y: i32) -> Self {
        Self::at(self.kind, self.rotation, self.x, y)
    }

    #[must_use]
    pub const fn up(&self) -> Self {
        self.with_y(self.y - 1)
    }

    #[must_use]
    pub const fn down(&self) -> Self {
        self.with_y(self.y + 1)
    }

    #[must_use]
    pub const fn rotated_right(&self) -> Self {
        Self::at(self.kind, self.rotation.rotated_right(), self.x, self.y)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}@{},{}", self.kind, self.rotation, self.x, self.y)
    }
}

/// Rotation state of a piece.
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise (90° counterclockwise)
///
/// Rotation operations wrap around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub struct PieceRotation(u8);

impl PieceRotation {
    pub const SPAWN: Self = Self(0);
    /// All rotation states in ascending order.
    pub const ALL: [Self; 4] = [Self(0), Self(1), Self(2), Self(3)];

    #[must_use]
    pub const fn new(rotation: u8) -> Option<Self> {
        if rotation < 4 {
            Some(Self(rotation))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    #[must_use]
    pub const fn rotated_left(self) -> Self {
        Self((self.0 + 3) % 4)
    }

    const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Enum representing the type of piece.
///
/// The discriminant is the piece id stored in board cells (1-7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 1,
    /// O-piece.
    O = 2,
    /// T-piece.
    T = 3,
    /// S-piece.
    S = 4,
    /// Z-piece.
    Z = 5,
    /// J-piece.
    J = 6,
    /// L-piece.
    L = 7,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(1..=7) {
            1 => PieceKind::I,
            2 => PieceKind::O,
            3 => PieceKind::T,
            4 => PieceKind::S,
            5 => PieceKind::Z,
            6 => PieceKind::J,
            _ => PieceKind::L,
        }
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in id order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Returns the piece id (1-7).
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Looks up a piece kind by its id.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrevo_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_id(2), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_id(0), None);
    /// assert_eq!(PieceKind::from_id(8), None);
    /// ```
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[id as usize - 1]),
            _ => None,
        }
    }

    /// Returns the occupancy mask of this piece in the given rotation.
    #[must_use]
    pub const fn shape(self, rotation: PieceRotation) -> Shape {
        PIECE_SHAPES[self as usize - 1][rotation.as_usize()]
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

/// Occupancy of a piece within its 4×4 bounding box.
///
/// Each row is a 4-bit mask where bit `c` marks column `c` as occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    rows: [u8; 4],
}

impl Shape {
    pub const SIZE: usize = 4;

    #[must_use]
    pub const fn is_occupied(self, column: usize, row: usize) -> bool {
        self.rows[row] & (1 << column) != 0
    }

    /// Returns the `(column, row)` offsets of the occupied cells, row by row.
    pub fn occupied_cells(self) -> impl Iterator<Item = (i32, i32)> {
        (0u8..4).flat_map(move |dy| {
            (0u8..4)
                .filter(move |&dx| self.is_occupied(usize::from(dx), usize::from(dy)))
                .map(move |dx| (i32::from(dx), i32::from(dy)))
        })
    }

    /// Returns the number of occupied cells (always 4 for tetrominoes).
    #[must_use]
    pub const fn cell_count(self) -> u32 {
        let mut count = 0;
        let mut i = 0;
        while i < Self::SIZE {
            count += self.rows[i].count_ones();
            i += 1;
        }
        count
    }
}

const PIECE_SHAPES: [[Shape; 4]; PieceKind::LEN] = {
    const fn s(cells: [[bool; 4]; 4]) -> Shape {
        let mut rows = [0; 4];
        let mut y = 0;
        while y < 4 {
            let mut x = 0;
            while x < 4 {
                if cells[y][x] {
                    rows[y] |= 1 << x;
                }
                x += 1;
            }
            y += 1;
        }
        Shape { rows }
    }

    const C: bool = true;
    const E: bool = false;
    const EEEE: [bool; 4] = [E; 4];

    [
        // I-piece
        [
            s([EEEE, [C, C, C, C], EEEE, EEEE]),
            s([[E, C, E, E], [E, C, E, E], [E, C, E, E], [E, C, E, E]]),
            s([EEEE, EEEE, [C, C, C, C], EEEE]),
            s([[E, E, C, E], [E, E, C, E], [E, E, C, E], [E, E, C, E]]),
        ],
        // O-piece
        [
            s([[E, C, C, E], [E, C, C, E], EEEE, EEEE]),
            s([[E, C, C, E], [E, C, C, E], EEEE, EEEE]),
            s([[E, C, C, E], [E, C, C, E], EEEE, EEEE]),
            s([[E, C, C, E], [E, C, C, E], EEEE, EEEE]),
        ],
        // T-piece
        [
            s([EEEE, [C, C, C, E], [E, C, E, E], EEEE]),
            s([[E, C, E, E], [C, C, E, E], [E, C, E, E], EEEE]),
            s([[E, C, E, E], [C, C, C, E], EEEE, EEEE]),
            s([[E, C, E, E], [E, C, C, E], [E, C, E, E], EEEE]),
        ],
        // S-piece
        [
            s([EEEE, [E, C, C, E], [C, C, E, E], EEEE]),
            s([[E, C, E, E], [E, C, C, E], [E, E, C, E], EEEE]),
            s([EEEE, [E, C, C, E], [C, C, E, E], EEEE]),
            s([[E, C, E, E], [E, C, C, E], [E, E, C, E], EEEE]),
        ],
        // Z-piece
        [
            s([EEEE, [C, C, E, E], [E, C, C, E], EEEE]),
            s([[E, E, C, E], [E, C, C, E], [E, C, E, E], EEEE]),
            s([EEEE, [C, C, E, E], [E, C, C, E], EEEE]),
            s([[E, E, C, E], [E, C, C, E], [E, C, E, E], EEEE]),
        ],
        // J-piece
        [
            s([EEEE, [C, C, C, E], [E, E, C, E], EEEE]),
            s([[E, C, E, E], [E, C, E, E], [C, C, E, E], EEEE]),
            s([[C, E, E, E], [C, C, C, E], EEEE, EEEE]),
            s([[E, C, C, E], [E, C, E, E], [E, C, E, E], EEEE]),
        ],
        // L-piece
        [
            s([EEEE, [C, C, C, E], [C, E, E, E], EEEE]),
            s([[C, C, E, E], [E, C, E, E], [E, C, E, E], EEEE]),
            s([[E, E, C, E], [C, C, C, E], EEEE, EEEE]),
            s([[E, C, E, E], [E, C, E, E], [E, C, C, E], EEEE]),
        ],
    ]
};

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            for rotation in PieceRotation::ALL {
                assert_eq!(
                    kind.shape(rotation).cell_count(),
                    4,
                    "{kind} rotation {rotation} should have 4 cells"
                );
            }
        }
    }

    #[test]
    fn test_o_piece_is_rotation_invariant() {
        let spawn = PieceKind::O.shape(PieceRotation::SPAWN);
        for rotation in PieceRotation::ALL {
            assert_eq!(PieceKind::O.shape(rotation), spawn);
        }
        let cells: Vec<_> = spawn.occupied_cells().collect();
        assert_eq!(cells, [(1, 0), (2, 0), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_vertical_i_piece_columns() {
        let r1: Vec<_> = PieceKind::I
            .shape(PieceRotation::new(1).unwrap())
            .occupied_cells()
            .collect();
        assert_eq!(r1, [(1, 0), (1, 1), (1, 2), (1, 3)]);

        let r3: Vec<_> = PieceKind::I
            .shape(PieceRotation::new(3).unwrap())
            .occupied_cells()
            .collect();
        assert_eq!(r3, [(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_piece_id_round_trip() {
        for (i, kind) in PieceKind::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(kind.id()), i + 1);
            assert_eq!(PieceKind::from_id(kind.id()), Some(kind));
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('X'), None);
    }

    #[test]
    fn test_rotation_wraps() {
        let r3 = PieceRotation::new(3).unwrap();
        assert_eq!(r3.rotated_right(), PieceRotation::SPAWN);
        assert_eq!(PieceRotation::SPAWN.rotated_left(), r3);
        assert_eq!(PieceRotation::new(4), None);
    }

    #[test]
    fn test_occupied_positions_are_offset_by_anchor() {
        let piece = Piece::at(PieceKind::O, PieceRotation::SPAWN, -1, -1);
        let cells: Vec<_> = piece.occupied_positions().collect();
        assert_eq!(cells, [(0, -1), (1, -1), (0, 0), (1, 0)]);
    }

    #[test]
    fn test_sampling_covers_all_kinds() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..500 {
            let kind: PieceKind = rng.random();
            seen[usize::from(kind.id()) - 1] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_piece_display() {
        let piece = Piece::at(PieceKind::S, PieceRotation::new(1).unwrap(), 4, 18);
        assert_eq!(piece.to_string(), "S#1@4,18");
    }
}
