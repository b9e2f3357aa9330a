//! Move validation handlers.
//!
//! The game consults one authoritative primary handler before executing
//! a move, and any number of advisory handlers afterwards for feedback
//! only. [`ChessRulesHandler`] is the standard-rules reference
//! implementation; alternative handlers plug in through [`GameHandler`].

use gambit_core::Square;

use crate::check;
use crate::rules::{self, MoveContext};
use crate::Game;

/// The outcome of one validation attempt. Transient: assembled by the
/// handler chain, consumed by the caller, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveResult {
    /// Whether the move may be executed.
    pub is_valid: bool,
    /// Why the move was rejected, when it was.
    pub invalid_reason: Option<String>,
    /// Whether the move puts the opponent's king in check.
    pub puts_opponent_in_check: bool,
    /// Whether the move escapes a check the mover is currently in.
    pub gets_out_of_check: bool,
    /// Free-text feedback assembled by the handler chain.
    pub feedback: Option<String>,
}

impl MoveResult {
    /// Creates a valid result with no annotations.
    pub fn success() -> Self {
        MoveResult {
            is_valid: true,
            ..MoveResult::default()
        }
    }

    /// Creates a valid result carrying feedback.
    pub fn success_with_feedback(feedback: impl Into<String>) -> Self {
        MoveResult {
            is_valid: true,
            feedback: Some(feedback.into()),
            ..MoveResult::default()
        }
    }

    /// Creates a rejection with a reason.
    pub fn failure(reason: impl Into<String>) -> Self {
        MoveResult {
            is_valid: false,
            invalid_reason: Some(reason.into()),
            ..MoveResult::default()
        }
    }
}

/// A pluggable move-validation policy.
///
/// The primary handler on a [`Game`] is authoritative: a move executes
/// only if it returns a valid result. Advisory handlers are consulted
/// after the primary accepts; their validity flag is ignored and only
/// their feedback is kept.
pub trait GameHandler: Send + Sync {
    /// Validates a proposed move and describes the outcome.
    fn validate(&self, game: &Game, from: Square, to: Square) -> MoveResult;

    /// Boolean shorthand for [`validate`](GameHandler::validate).
    fn is_valid(&self, game: &Game, from: Square, to: Square) -> bool {
        self.validate(game, from, to).is_valid
    }
}

/// The standard chess rules: occupancy, ownership, per-kind movement
/// legality, and check-safety.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChessRulesHandler;

impl GameHandler for ChessRulesHandler {
    fn validate(&self, game: &Game, from: Square, to: Square) -> MoveResult {
        if game.is_over() {
            return MoveResult::failure("game is over");
        }
        let Some(piece) = game.board().piece_at(from) else {
            return MoveResult::failure("no piece on source square");
        };
        if piece.color() != game.turn() {
            return MoveResult::failure("not your piece");
        }

        let en_passant = game.en_passant_square();
        let ctx = MoveContext::new(game.board(), en_passant);
        if !rules::is_legal_move(&ctx, from, to) {
            return MoveResult::failure("invalid move for this piece");
        }

        if check::move_leaves_king_in_check(game.board(), en_passant, from, to) {
            return MoveResult::failure("move would leave king in check");
        }

        let was_in_check = check::is_in_check(game.board(), en_passant, game.turn());
        let puts_opponent_in_check =
            check::move_puts_opponent_in_check(game.board(), en_passant, from, to);

        MoveResult {
            is_valid: true,
            invalid_reason: None,
            puts_opponent_in_check,
            gets_out_of_check: was_in_check,
            feedback: puts_opponent_in_check.then(|| "Check!".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Board;
    use gambit_core::Color;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn rejects_empty_source() {
        let game = Game::new();
        let result = ChessRulesHandler.validate(&game, sq("e4"), sq("e5"));
        assert!(!result.is_valid);
        assert_eq!(result.invalid_reason.as_deref(), Some("no piece on source square"));
    }

    #[test]
    fn rejects_opponent_piece() {
        let game = Game::new();
        let result = ChessRulesHandler.validate(&game, sq("e7"), sq("e5"));
        assert!(!result.is_valid);
        assert_eq!(result.invalid_reason.as_deref(), Some("not your piece"));
    }

    #[test]
    fn rejects_illegal_piece_move() {
        let game = Game::new();
        let result = ChessRulesHandler.validate(&game, sq("e2"), sq("e5"));
        assert!(!result.is_valid);
        assert_eq!(
            result.invalid_reason.as_deref(),
            Some("invalid move for this piece")
        );
    }

    #[test]
    fn rejects_move_into_check() {
        // The e4 rook shields the white king from the e8 queen.
        let board = Board::from_placement("4q3/8/8/8/4R3/8/8/4K3").unwrap();
        let game = Game::with_board(board, Color::White);
        let result = ChessRulesHandler.validate(&game, sq("e4"), sq("a4"));
        assert!(!result.is_valid);
        assert_eq!(
            result.invalid_reason.as_deref(),
            Some("move would leave king in check")
        );
    }

    #[test]
    fn rejects_after_game_over() {
        let mut game = Game::new();
        game.mark_game_over();
        let result = ChessRulesHandler.validate(&game, sq("e2"), sq("e4"));
        assert!(!result.is_valid);
        assert_eq!(result.invalid_reason.as_deref(), Some("game is over"));
    }

    #[test]
    fn annotates_check_on_opponent() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/R3K3").unwrap();
        let game = Game::with_board(board, Color::White);
        let result = ChessRulesHandler.validate(&game, sq("a1"), sq("a8"));
        assert!(result.is_valid);
        assert!(result.puts_opponent_in_check);
        assert_eq!(result.feedback.as_deref(), Some("Check!"));
    }

    #[test]
    fn annotates_escape_from_check() {
        let board = Board::from_placement("4q3/8/8/8/8/8/8/4K3").unwrap();
        let game = Game::with_board(board, Color::White);
        let result = ChessRulesHandler.validate(&game, sq("e1"), sq("d1"));
        assert!(result.is_valid);
        assert!(result.gets_out_of_check);
    }

    #[test]
    fn valid_quiet_move_has_no_annotations() {
        let game = Game::new();
        let result = ChessRulesHandler.validate(&game, sq("e2"), sq("e4"));
        assert!(result.is_valid);
        assert!(!result.puts_opponent_in_check);
        assert!(!result.gets_out_of_check);
        assert!(result.feedback.is_none());
    }
}
