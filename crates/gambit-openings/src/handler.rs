//! The opening-theory validation handler.

use gambit_core::Square;
use gambit_engine::{Game, GameHandler, MoveResult};

use crate::OpeningBook;

/// How the handler treats moves outside the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TheoryMode {
    /// Out-of-book moves are rejected. Suitable as a primary handler for
    /// opening drills.
    Strict,
    /// Every move is accepted; the handler only annotates feedback.
    Advisory,
}

/// Builds the book lookup key for the game's current position:
/// `move_<ply>` followed by the underscore-joined notation of every move
/// played so far (`move_0`, `move_1_e2e4`, ...).
pub fn position_key(game: &Game) -> String {
    let mut key = format!("move_{}", game.ply_count());
    for record in game.history() {
        key.push('_');
        key.push_str(&record.notation());
    }
    key
}

/// Validates moves against an [`OpeningBook`].
///
/// Demonstrates the handler-chain extension point: a table-driven
/// policy that can either gate moves (strict) or merely comment on them
/// (advisory).
#[derive(Debug, Clone)]
pub struct OpeningTheoryHandler {
    book: OpeningBook,
    mode: TheoryMode,
}

impl OpeningTheoryHandler {
    /// Creates a handler over the builtin book.
    pub fn new(mode: TheoryMode) -> Self {
        Self::with_book(OpeningBook::builtin(), mode)
    }

    /// Creates a handler over a custom book.
    pub fn with_book(book: OpeningBook, mode: TheoryMode) -> Self {
        OpeningTheoryHandler { book, mode }
    }

    /// Returns the handler's mode.
    pub fn mode(&self) -> TheoryMode {
        self.mode
    }

    fn is_theoretical(&self, game: &Game, from: Square, to: Square) -> bool {
        let notation = format!("{}{}", from, to);
        self.book.contains(&position_key(game), &notation)
    }
}

impl GameHandler for OpeningTheoryHandler {
    fn validate(&self, game: &Game, from: Square, to: Square) -> MoveResult {
        let theoretical = self.is_theoretical(game, from, to);
        match self.mode {
            TheoryMode::Strict => {
                if theoretical {
                    MoveResult::success_with_feedback("Excellent theoretical choice!")
                } else {
                    MoveResult::failure("Move not in opening theory")
                }
            }
            TheoryMode::Advisory => {
                if theoretical {
                    MoveResult::success_with_feedback("Good theoretical move!")
                } else {
                    MoveResult::success_with_feedback("This move is not in the main line")
                }
            }
        }
    }

    fn is_valid(&self, game: &Game, from: Square, to: Square) -> bool {
        match self.mode {
            TheoryMode::Advisory => true,
            TheoryMode::Strict => self.validate(game, from, to).is_valid,
        }
    }
}
