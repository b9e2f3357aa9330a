//! The game aggregate: turn-taking, validation, and move execution.

use std::fmt;
use std::sync::Arc;

use gambit_core::{Color, MoveKind, MoveRecord, PieceKind, Square};

use crate::check;
use crate::handler::{ChessRulesHandler, GameHandler, MoveResult};
use crate::Board;

/// The lifecycle state of a game.
///
/// There is no automatic termination detector: `Over` is reached only
/// through [`Game::mark_game_over`], reserved for a future
/// checkmate/stalemate pass or an outside arbiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    InProgress,
    Over,
}

/// A chess game: the board, whose turn it is, the move history, and the
/// validation-handler chain.
///
/// The board is exclusively owned; all occupancy mutation goes through
/// [`try_move`](Game::try_move), which either executes a fully validated
/// move with all of its side effects or leaves the game untouched.
pub struct Game {
    board: Board,
    turn: Color,
    state: GameState,
    history: Vec<MoveRecord>,
    en_passant: Option<Square>,
    primary: Arc<dyn GameHandler>,
    advisors: Vec<Arc<dyn GameHandler>>,
}

impl Game {
    /// Creates a game with the standard starting position, White to
    /// move, validated by [`ChessRulesHandler`].
    pub fn new() -> Self {
        Self::with_board(Board::standard(), Color::White)
    }

    /// Creates a game over a custom board position.
    pub fn with_board(board: Board, starting_color: Color) -> Self {
        Game {
            board,
            turn: starting_color,
            state: GameState::InProgress,
            history: Vec::new(),
            en_passant: None,
            primary: Arc::new(ChessRulesHandler),
            advisors: Vec::new(),
        }
    }

    /// Creates a standard-position game with a custom primary handler.
    pub fn with_primary_handler(handler: impl GameHandler + 'static) -> Self {
        let mut game = Self::new();
        game.primary = Arc::new(handler);
        game
    }

    /// Replaces the authoritative primary handler.
    pub fn set_primary_handler(&mut self, handler: impl GameHandler + 'static) {
        self.primary = Arc::new(handler);
    }

    /// Appends an advisory handler. Advisory handlers never veto a move;
    /// only their feedback is consulted.
    pub fn push_advisory_handler(&mut self, handler: impl GameHandler + 'static) {
        self.advisors.push(Arc::new(handler));
    }

    /// Removes all advisory handlers.
    pub fn clear_advisory_handlers(&mut self) {
        self.advisors.clear();
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the color to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Returns true if the game is over.
    pub fn is_over(&self) -> bool {
        self.state == GameState::Over
    }

    /// Marks the game as over. No further moves will validate or execute.
    pub fn mark_game_over(&mut self) {
        self.state = GameState::Over;
    }

    /// Returns the executed moves, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Returns the most recent move, if any.
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// Returns the number of plies played.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Returns the square currently available for en passant capture.
    /// Armed by a two-square pawn advance, valid for exactly one ply.
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant
    }

    /// Returns true if the king of `color` is in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        check::is_in_check(&self.board, self.en_passant, color)
    }

    /// Primary-handler-only validity test: the predicate move
    /// enumeration filters through, so check-safety is respected.
    pub fn is_move_valid(&self, from: Square, to: Square) -> bool {
        self.primary.is_valid(self, from, to)
    }

    /// Validates a move through the whole handler chain.
    ///
    /// The primary handler is authoritative: an invalid result is
    /// returned verbatim. When it accepts, every advisory handler is
    /// consulted, its validity ignored, and all non-empty feedback
    /// strings are space-joined onto the result.
    pub fn validate_move(&self, from: Square, to: Square) -> MoveResult {
        let primary_result = self.primary.validate(self, from, to);
        if !primary_result.is_valid {
            return primary_result;
        }

        let mut feedbacks: Vec<String> = Vec::new();
        if let Some(feedback) = &primary_result.feedback {
            if !feedback.is_empty() {
                feedbacks.push(feedback.clone());
            }
        }
        for advisor in &self.advisors {
            let advice = advisor.validate(self, from, to);
            if let Some(feedback) = advice.feedback {
                if !feedback.is_empty() {
                    feedbacks.push(feedback);
                }
            }
        }

        MoveResult {
            is_valid: true,
            invalid_reason: None,
            puts_opponent_in_check: primary_result.puts_opponent_in_check,
            gets_out_of_check: primary_result.gets_out_of_check,
            feedback: if feedbacks.is_empty() {
                None
            } else {
                Some(feedbacks.join(" "))
            },
        }
    }

    /// Attempts to execute a move given in algebraic notation.
    /// Malformed square labels reject the move rather than erroring.
    pub fn try_move_algebraic(&mut self, from: &str, to: &str) -> bool {
        match (Square::from_algebraic(from), Square::from_algebraic(to)) {
            (Ok(from), Ok(to)) => self.try_move(from, to),
            _ => false,
        }
    }

    /// Attempts to execute a move.
    ///
    /// Returns true and applies all side effects (capture, castling rook
    /// relocation, en-passant bookkeeping, history, turn flip) when the
    /// primary handler accepts; returns false with the game unchanged
    /// otherwise.
    pub fn try_move(&mut self, from: Square, to: Square) -> bool {
        if self.is_over() {
            return false;
        }
        let primary = Arc::clone(&self.primary);
        if !primary.validate(self, from, to).is_valid {
            return false;
        }
        // The primary handler has vouched for the source square.
        let Some(piece) = self.board.piece_at(from).copied() else {
            return false;
        };

        let mut captured = self.board.piece_at(to).copied();
        let mut kind = MoveKind::Normal;

        // The en-passant window closes on every executed move and only a
        // two-square pawn advance below re-arms it.
        let previous_en_passant = self.en_passant.take();

        let d_col = to.col() as i8 - from.col() as i8;
        if piece.kind() == PieceKind::King && d_col.abs() == 2 {
            kind = MoveKind::Castle;
            let (rook_from_col, rook_to_col) = if d_col > 0 {
                (7, to.col() - 1)
            } else {
                (0, to.col() + 1)
            };
            let rook_from = Square::new(from.row(), rook_from_col);
            let rook_to = Square::new(from.row(), rook_to_col);
            if let (Some(rook_from), Some(rook_to)) = (rook_from, rook_to) {
                let mut rook = self.board.take(rook_from);
                if let Some(rook) = rook.as_mut() {
                    rook.mark_moved();
                }
                self.board.set(rook_to, rook);
            }
        } else if piece.kind() == PieceKind::Pawn && previous_en_passant == Some(to) {
            kind = MoveKind::EnPassant;
            if let Some(victim_square) = Square::new(from.row(), to.col()) {
                captured = self.board.take(victim_square);
            }
        }

        if piece.kind() == PieceKind::Pawn && (to.row() as i8 - from.row() as i8).abs() == 2 {
            kind = MoveKind::DoublePush;
            let crossed_row = (from.row() + to.row()) / 2;
            self.en_passant = Square::new(crossed_row, from.col());
        }

        let mut moved = piece;
        moved.mark_moved();
        self.board.take(from);
        self.board.set(to, Some(moved));

        self.history.push(MoveRecord {
            number: self.history.len() + 1,
            from,
            to,
            piece: moved,
            captured,
            kind,
        });
        self.turn = self.turn.opposite();
        true
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Current turn: {}, state: {:?}",
            self.turn, self.state
        )?;
        write!(f, "{}", self.board)
    }
}
