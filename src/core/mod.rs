//! Core types: players, bitboard positions, and the random stream.
//!
//! These are the leaves every other module builds on.

pub mod board;
pub mod player;
pub mod rng;

pub use board::{bit, cell, Board, CELLS, FULL_BOARD, HEIGHT, WIDTH};
pub use player::{PlayerId, PlayerPair};
pub use rng::{wall_clock_seed, GameRng};
