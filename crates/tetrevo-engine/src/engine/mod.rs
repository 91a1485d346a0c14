//! Game state built on top of the core board.
//!
//! - [`GameField`] - the board plus the pre-drawn next piece
//! - [`PieceQueue`] - uniform next-piece slot driven by the caller's RNG
//! - [`GameStats`] - lines, score and level of a running game
//!
//! A turn draws a piece with [`GameField::spawn`], picks a resting position for it, and
//! locks it with [`GameField::complete_piece_drop`]. The game ends when the spawn position
//! is blocked.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_pcg::Pcg32;
//! use tetrevo_engine::{GameField, GameStats};
//!
//! let mut rng = Pcg32::seed_from_u64(1);
//! let mut field = GameField::new(&mut rng);
//! let mut stats = GameStats::new();
//!
//! while let Some(mut piece) = field.spawn(&mut rng) {
//!     while field.board().is_valid(piece.down()) {
//!         piece = piece.down();
//!     }
//!     stats.complete_piece_drop(field.complete_piece_drop(piece));
//! }
//!
//! assert!(stats.completed_pieces() > 0);
//! ```

pub use self::{game_field::*, game_stats::*, piece_queue::*};

mod game_field;
mod game_stats;
mod piece_queue;
