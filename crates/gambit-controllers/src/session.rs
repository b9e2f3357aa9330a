//! The turn-taking game loop.

use std::sync::Arc;

use gambit_core::Color;
use gambit_engine::Game;

use crate::Controller;

/// A game wired to one controller per side.
///
/// The session owns the game exclusively: a move obtained from a
/// controller is applied synchronously to completion, so two executions
/// can never interleave. Each turn suspends exactly once, at the
/// "await next move" point.
pub struct Session {
    game: Game,
    white: Arc<dyn Controller>,
    black: Arc<dyn Controller>,
}

impl Session {
    /// Creates a session over a fresh standard game.
    pub fn new(white: Arc<dyn Controller>, black: Arc<dyn Controller>) -> Self {
        Self::with_game(Game::new(), white, black)
    }

    /// Creates a session over an existing game.
    pub fn with_game(game: Game, white: Arc<dyn Controller>, black: Arc<dyn Controller>) -> Self {
        Session { game, white, black }
    }

    /// Returns the game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the game mutably (e.g. to install handlers).
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// Returns the controller playing `color`.
    pub fn controller(&self, color: Color) -> &Arc<dyn Controller> {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    /// Replaces the controller playing `color`.
    pub fn set_controller(&mut self, color: Color, controller: Arc<dyn Controller>) {
        match color {
            Color::White => self.white = controller,
            Color::Black => self.black = controller,
        }
    }

    /// Asks the current player's controller for its move and executes it.
    ///
    /// Returns false without mutating anything when the game is over,
    /// when the controller yields no move, or when the move is rejected
    /// by validation.
    pub async fn request_and_execute_next_move(&mut self) -> bool {
        if self.game.is_over() {
            return false;
        }
        let turn = self.game.turn();
        let controller = Arc::clone(self.controller(turn));

        let Some((from, to)) = controller.request_move(&self.game).await else {
            tracing::debug!(%turn, "no move made");
            return false;
        };

        let executed = self.game.try_move_algebraic(&from, &to);
        if executed {
            tracing::debug!(%turn, %from, %to, "move executed");
        } else {
            tracing::debug!(%turn, %from, %to, "move rejected");
        }
        executed
    }

    /// Drives turns until one fails or `max_plies` is reached. Returns
    /// the number of plies executed.
    pub async fn play(&mut self, max_plies: usize) -> usize {
        let mut plies = 0;
        while plies < max_plies {
            if !self.request_and_execute_next_move().await {
                break;
            }
            plies += 1;
        }
        plies
    }
}
