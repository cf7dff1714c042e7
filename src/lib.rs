//! Wargame engine library.
//!
//! A two-player grid wargame decided by minimax search. Exposes the board
//! representation, move generation and resolution, evaluation, search, and
//! the game and self-play layers used by the binaries and integration tests.

pub mod board;
pub mod config;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod protocol;
pub mod resolve;
pub mod search;
pub mod selfplay;
