//! Board model for a falling-block puzzle: piece shapes, the 10×20 grid and its features,
//! and the state of a running game.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
