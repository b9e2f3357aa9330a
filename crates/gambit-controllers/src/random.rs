//! Random legal-move controller.

use std::time::Duration;

use async_trait::async_trait;
use gambit_core::Square;
use gambit_engine::Game;
use rand::seq::SliceRandom;

use crate::Controller;

/// Enumerates every move the current player may make, as algebraic
/// `(from, to)` pairs.
///
/// Candidates are filtered through the game's primary handler rather
/// than raw piece legality, so check-safety (and any custom primary
/// policy) is respected.
pub fn legal_moves(game: &Game) -> Vec<(String, String)> {
    let mut moves = Vec::new();
    for from in Square::all() {
        let Some(piece) = game.board().piece_at(from) else {
            continue;
        };
        if piece.color() != game.turn() {
            continue;
        }
        for to in Square::all() {
            if game.is_move_valid(from, to) {
                moves.push((from.to_algebraic(), to.to_algebraic()));
            }
        }
    }
    moves
}

/// A controller that plays a uniformly random legal move.
///
/// A fixed simulated think delay keeps the async shape honest (and a
/// driving UI responsive); construct with [`instant`](RandomController::instant)
/// to skip it in tests.
pub struct RandomController {
    think_delay: Duration,
}

impl RandomController {
    /// Creates a controller with the default 100 ms think delay.
    pub fn new() -> Self {
        RandomController {
            think_delay: Duration::from_millis(100),
        }
    }

    /// Creates a controller that answers without delay.
    pub fn instant() -> Self {
        RandomController {
            think_delay: Duration::ZERO,
        }
    }

    /// Creates a controller with a custom think delay.
    pub fn with_delay(think_delay: Duration) -> Self {
        RandomController { think_delay }
    }
}

impl Default for RandomController {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Controller for RandomController {
    async fn request_move(&self, game: &Game) -> Option<(String, String)> {
        if !self.think_delay.is_zero() {
            tokio::time::sleep(self.think_delay).await;
        }
        let moves = legal_moves(game);
        moves.choose(&mut rand::thread_rng()).cloned()
    }
}
