//! Per-kind movement legality.
//!
//! Every rule is an arm of one exhaustive match over [`PieceKind`], so a
//! new kind cannot compile without a legality rule. The rules are pure
//! with respect to game history: they read only the current occupancy,
//! the moving piece's own "has moved" flag, and the armed en-passant
//! square carried by the [`MoveContext`].

use gambit_core::{Color, PieceKind, Square};

use crate::check;
use crate::Board;

/// The board view handed to the legality rules.
///
/// Castling legality needs to ask whether the king is, or would be, in
/// check; the context carries everything that question requires, so the
/// board itself never holds a back-reference to the game.
#[derive(Clone, Copy)]
pub struct MoveContext<'a> {
    pub board: &'a Board,
    /// The square available for en passant capture, armed for one ply
    /// after a two-square pawn advance.
    pub en_passant: Option<Square>,
}

impl<'a> MoveContext<'a> {
    /// Creates a context over a board with an optional armed en-passant square.
    pub fn new(board: &'a Board, en_passant: Option<Square>) -> Self {
        MoveContext { board, en_passant }
    }
}

/// Returns true if the piece on `from` may move to `to` under its own
/// movement rules. Check-safety of the resulting position is not this
/// function's concern; see [`check::move_leaves_king_in_check`].
pub fn is_legal_move(ctx: &MoveContext<'_>, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    let Some(piece) = ctx.board.piece_at(from) else {
        return false;
    };
    if let Some(target) = ctx.board.piece_at(to) {
        if target.color() == piece.color() {
            return false;
        }
    }

    let d_row = to.row() as i8 - from.row() as i8;
    let d_col = to.col() as i8 - from.col() as i8;

    match piece.kind() {
        PieceKind::Pawn => pawn_move(ctx, from, to, piece.color(), piece.has_moved(), d_row, d_col),
        PieceKind::Knight => {
            matches!((d_row.abs(), d_col.abs()), (1, 2) | (2, 1))
        }
        PieceKind::Bishop => d_row.abs() == d_col.abs() && ray_clear(ctx.board, from, to),
        PieceKind::Rook => (d_row == 0 || d_col == 0) && ray_clear(ctx.board, from, to),
        PieceKind::Queen => {
            (d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs())
                && ray_clear(ctx.board, from, to)
        }
        PieceKind::King => {
            if d_row.abs() <= 1 && d_col.abs() <= 1 {
                true
            } else {
                d_row == 0
                    && d_col.abs() == 2
                    && castle_allowed(ctx, from, to, piece.color(), piece.has_moved())
            }
        }
    }
}

fn pawn_move(
    ctx: &MoveContext<'_>,
    from: Square,
    to: Square,
    color: Color,
    has_moved: bool,
    d_row: i8,
    d_col: i8,
) -> bool {
    let dir = color.pawn_direction();

    // Single step forward onto an empty square.
    if d_row == dir && d_col == 0 {
        return ctx.board.piece_at(to).is_none();
    }

    // Initial two-square advance: unmoved pawn, empty intermediate, empty destination.
    if d_row == 2 * dir && d_col == 0 && !has_moved {
        let Some(middle) = Square::new((from.row() as i8 + dir) as u8, from.col()) else {
            return false;
        };
        return ctx.board.piece_at(middle).is_none() && ctx.board.piece_at(to).is_none();
    }

    // Diagonal capture, plain or en passant.
    if d_row == dir && d_col.abs() == 1 {
        if let Some(target) = ctx.board.piece_at(to) {
            return target.color() != color;
        }
        if ctx.en_passant == Some(to) {
            let capture_row = match color {
                Color::White => 3,
                Color::Black => 4,
            };
            if from.row() == capture_row {
                if let Some(victim) = Square::new(from.row(), to.col())
                    .and_then(|sq| ctx.board.piece_at(sq))
                {
                    return victim.kind() == PieceKind::Pawn && victim.color() != color;
                }
            }
        }
    }

    false
}

/// Walks the squares strictly between `from` and `to` one unit step at a
/// time along the (already validated) movement axis.
fn ray_clear(board: &Board, from: Square, to: Square) -> bool {
    let step_row = (to.row() as i8 - from.row() as i8).signum();
    let step_col = (to.col() as i8 - from.col() as i8).signum();
    let mut row = from.row() as i8 + step_row;
    let mut col = from.col() as i8 + step_col;
    while (row, col) != (to.row() as i8, to.col() as i8) {
        match Square::new(row as u8, col as u8) {
            Some(sq) if board.piece_at(sq).is_none() => {}
            _ => return false,
        }
        row += step_row;
        col += step_col;
    }
    true
}

/// The castling precondition chain: unmoved king on its home row, an
/// unmoved same-color rook in the matching corner, an empty corridor,
/// and a king that is neither in check now nor passes through or lands
/// on an attacked square.
fn castle_allowed(
    ctx: &MoveContext<'_>,
    from: Square,
    to: Square,
    color: Color,
    king_has_moved: bool,
) -> bool {
    if king_has_moved {
        return false;
    }
    let home = color.home_row();
    if from.row() != home {
        return false;
    }

    let kingside = to.col() > from.col();
    let rook_col = if kingside { 7 } else { 0 };
    let Some(rook_square) = Square::new(home, rook_col) else {
        return false;
    };
    match ctx.board.piece_at(rook_square) {
        Some(p) if p.kind() == PieceKind::Rook && p.color() == color && !p.has_moved() => {}
        _ => return false,
    }

    // The corridor between king and rook must be empty.
    let lo = from.col().min(rook_col) + 1;
    let hi = from.col().max(rook_col);
    for col in lo..hi {
        let Some(sq) = Square::new(home, col) else {
            return false;
        };
        if ctx.board.piece_at(sq).is_some() {
            return false;
        }
    }

    // The king may not castle out of check...
    if check::is_in_check(ctx.board, ctx.en_passant, color) {
        return false;
    }

    // ...nor through or into an attacked square.
    let step = if kingside { 1i8 } else { -1i8 };
    let mut col = from.col() as i8 + step;
    loop {
        let Some(probe) = Square::new(home, col as u8) else {
            return false;
        };
        if !check::king_safe_at(ctx.board, ctx.en_passant, from, probe, color) {
            return false;
        }
        if col as u8 == to.col() {
            break;
        }
        col += step;
    }

    true
}
