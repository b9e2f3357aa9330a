//! Chess rules engine with a mailbox board representation.
//!
//! This crate provides:
//! - [`Board`] - an 8x8 grid of optional piece occupants
//! - [`rules`] - per-kind movement legality over an explicit [`rules::MoveContext`]
//! - [`check`] - brute-force check and attack evaluation with speculative probes
//! - [`Game`] - the aggregate root: turn-taking, move execution, and history
//! - [`GameHandler`] - the pluggable validation-handler chain with
//!   [`ChessRulesHandler`] as the authoritative reference implementation
//!
//! # Example
//!
//! ```
//! use gambit_engine::Game;
//!
//! let mut game = Game::new();
//! assert!(game.try_move_algebraic("e2", "e4"));
//! assert!(!game.try_move_algebraic("d2", "d4")); // not White's turn anymore
//! assert_eq!(game.ply_count(), 1);
//! ```

mod board;
pub mod check;
mod game;
mod handler;
pub mod rules;

pub use board::{Board, BoardError};
pub use game::{Game, GameState};
pub use handler::{ChessRulesHandler, GameHandler, MoveResult};
