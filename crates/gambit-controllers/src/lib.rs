//! Asynchronous move sources ("controllers") for the gambit engine.
//!
//! A [`Controller`] supplies the next move for one side without blocking
//! the game loop: [`HumanController`] bridges external input (a UI, a
//! network frontend) through a race-free single-slot request cell, and
//! [`RandomController`] plays a uniformly random legal move. A
//! [`Session`] wires one controller per color to a
//! [`Game`](gambit_engine::Game) and drives the turn loop.

mod human;
mod random;
mod session;

use async_trait::async_trait;
use gambit_engine::Game;

pub use human::HumanController;
pub use random::{legal_moves, RandomController};
pub use session::Session;

/// A source of moves for one side.
///
/// `request_move` resolves with a `(from, to)` pair of algebraic square
/// labels, or `None` when no move is available (no legal move exists,
/// or the request was cancelled).
#[async_trait]
pub trait Controller: Send + Sync {
    async fn request_move(&self, game: &Game) -> Option<(String, String)>;
}
