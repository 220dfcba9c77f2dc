//! `othello-core` is a bitboard Othello rules engine.
//!
//! The crate is layered from the bottom up:
//!
//!  - [`bitboard`] holds the raw bit-level primitives: population count,
//!    directional neighbor masks, and the square-index lookup table.
//!  - [`moves`] computes legal destinations and disk flips over pairs of
//!    bitboards. These functions are fast and unchecked; their contracts
//!    must be verified by the caller.
//!  - [`Game`] owns the canonical board, validates moves, tracks passes and
//!    terminal state, and keeps the undo/redo history. This is the interface
//!    meant for orchestration code.

pub mod bitboard;
pub mod moves;
pub mod test_utils;

mod game;
mod location;
mod utils;

pub use game::*;
pub use location::*;

/// The number of spaces on one edge of an Othello board.
pub const EDGE_LENGTH: usize = 8;

/// The number of spaces on an Othello board.
pub const NUM_SPACES: usize = 64;
