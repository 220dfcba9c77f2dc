//! Move selection for `othello-core`: a fixed-depth minimax searcher and a
//! set of simpler heuristics, all behind the pluggable [`Strategy`] trait so
//! orchestration code never depends on a concrete opponent.

pub mod search;
pub mod strategy;

pub use search::{evaluate, select_move};
pub use strategy::{by_name, random_side, Human, Maximize, Minimax, Minimize, Random, Strategy};
