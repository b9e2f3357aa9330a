//! Check and attack evaluation.
//!
//! Detection is deliberately brute force: find the king, then ask every
//! opposing piece whether it could legally move onto the king's square.
//! Speculative questions ("would this move leave me in check?") are
//! answered by applying the candidate to a scratch copy of the board and
//! evaluating there, so the live board is untouched on every exit path.

use gambit_core::{Color, PieceKind, Square};

use crate::rules::{self, MoveContext};
use crate::Board;

/// Returns true if the king of `color` is attacked.
///
/// A missing king yields false rather than an error, so positions
/// without kings (tests, sketches) are tolerated.
pub fn is_in_check(board: &Board, en_passant: Option<Square>, color: Color) -> bool {
    let Some(king_square) = board.king_square(color) else {
        return false;
    };
    let ctx = MoveContext::new(board, en_passant);
    board
        .occupied()
        .any(|(square, piece)| {
            piece.color() != color && rules::is_legal_move(&ctx, square, king_square)
        })
}

/// Returns true if executing `from -> to` would leave the mover's own
/// king in check. The en-passant special case removes the passed-over
/// pawn before evaluating, exactly as the executor would.
pub fn move_leaves_king_in_check(
    board: &Board,
    en_passant: Option<Square>,
    from: Square,
    to: Square,
) -> bool {
    let Some(mover) = board.piece_at(from).map(|p| p.color()) else {
        return false;
    };
    with_candidate_applied(board, en_passant, from, to, |scratch| {
        is_in_check(scratch, en_passant, mover)
    })
}

/// Returns true if executing `from -> to` would put the opponent's king
/// in check.
pub fn move_puts_opponent_in_check(
    board: &Board,
    en_passant: Option<Square>,
    from: Square,
    to: Square,
) -> bool {
    let Some(mover) = board.piece_at(from).map(|p| p.color()) else {
        return false;
    };
    with_candidate_applied(board, en_passant, from, to, |scratch| {
        is_in_check(scratch, en_passant, mover.opposite())
    })
}

/// Castling probe: would the king of `color`, relocated from
/// `king_square` to `probe`, be safe there?
pub fn king_safe_at(
    board: &Board,
    en_passant: Option<Square>,
    king_square: Square,
    probe: Square,
    color: Color,
) -> bool {
    let mut scratch = board.clone();
    let king = scratch.take(king_square);
    scratch.set(probe, king);
    !is_in_check(&scratch, en_passant, color)
}

/// Applies the candidate move to a scratch copy of the board and hands
/// the result to `eval`. The caller's board is never modified, which
/// guarantees occupancy-equal restoration no matter how `eval` exits.
fn with_candidate_applied<T>(
    board: &Board,
    en_passant: Option<Square>,
    from: Square,
    to: Square,
    eval: impl FnOnce(&Board) -> T,
) -> T {
    let mut scratch = board.clone();
    if let Some(piece) = scratch.piece_at(from).copied() {
        if piece.kind() == PieceKind::Pawn && en_passant == Some(to) {
            if let Some(victim_square) = Square::new(from.row(), to.col()) {
                scratch.take(victim_square);
            }
        }
        let moved = scratch.take(from);
        scratch.set(to, moved);
    }
    eval(&scratch)
}
