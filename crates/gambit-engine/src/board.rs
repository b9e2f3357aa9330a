//! The 8x8 board.

use std::fmt;

use gambit_core::{Color, Piece, PieceKind, Shade, Square};
use thiserror::Error;

/// Errors that can occur when constructing a board from external data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board must have exactly 8 rows, got {0}")]
    RowCount(usize),

    #[error("row {row} must have exactly 8 columns, got {len}")]
    RowWidth { row: usize, len: usize },

    #[error("placement must have exactly 8 ranks, got {0}")]
    RankCount(usize),

    #[error("rank {0} does not describe exactly 8 squares")]
    RankWidth(char),

    #[error("invalid piece character '{0}' in placement")]
    InvalidPieceChar(char),
}

/// A fixed 8x8 grid of squares, each holding at most one piece.
///
/// The board is a thin container: it knows occupancy, not rules. It is
/// exclusively owned and mutated by the [`Game`](crate::Game) executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Creates an empty board.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Creates a board with the standard starting position.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (col, &kind) in back_rank.iter().enumerate() {
            board.squares[0][col] = Some(Piece::new(kind, Color::Black));
            board.squares[1][col] = Some(Piece::new(PieceKind::Pawn, Color::Black));
            board.squares[6][col] = Some(Piece::new(PieceKind::Pawn, Color::White));
            board.squares[7][col] = Some(Piece::new(kind, Color::White));
        }
        board
    }

    /// Creates a board from an 8x8 grid of occupants.
    ///
    /// The outer vector must hold exactly 8 rows of exactly 8 columns,
    /// row 0 first (rank 8).
    pub fn from_grid(grid: Vec<Vec<Option<Piece>>>) -> Result<Self, BoardError> {
        if grid.len() != 8 {
            return Err(BoardError::RowCount(grid.len()));
        }
        let mut board = Board::empty();
        for (row, cells) in grid.into_iter().enumerate() {
            if cells.len() != 8 {
                return Err(BoardError::RowWidth {
                    row,
                    len: cells.len(),
                });
            }
            for (col, cell) in cells.into_iter().enumerate() {
                board.squares[row][col] = cell;
            }
        }
        Ok(board)
    }

    /// Parses the piece-placement field of a FEN string, e.g.
    /// `"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"`.
    ///
    /// Ranks run from 8 down to 1, digits are runs of empty squares,
    /// uppercase letters are White. All pieces parse as not-yet-moved.
    pub fn from_placement(placement: &str) -> Result<Self, BoardError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(BoardError::RankCount(ranks.len()));
        }
        let mut board = Board::empty();
        for (row, rank) in ranks.iter().enumerate() {
            let rank_char = (b'8' - row as u8) as char;
            let mut col = 0usize;
            for c in rank.chars() {
                if let Some(run) = c.to_digit(10) {
                    if run == 0 || run > 8 {
                        return Err(BoardError::InvalidPieceChar(c));
                    }
                    col += run as usize;
                } else {
                    let (kind, color) = PieceKind::from_placement_char(c)
                        .ok_or(BoardError::InvalidPieceChar(c))?;
                    if col >= 8 {
                        return Err(BoardError::RankWidth(rank_char));
                    }
                    board.squares[row][col] = Some(Piece::new(kind, color));
                    col += 1;
                }
            }
            if col != 8 {
                return Err(BoardError::RankWidth(rank_char));
            }
        }
        Ok(board)
    }

    /// Returns the piece on a square, if any.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.squares[square.row() as usize][square.col() as usize].as_ref()
    }

    /// Returns a mutable reference to the piece on a square, if any.
    #[inline]
    pub fn piece_at_mut(&mut self, square: Square) -> Option<&mut Piece> {
        self.squares[square.row() as usize][square.col() as usize].as_mut()
    }

    /// Sets the occupant of a square, returning the previous occupant.
    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(
            &mut self.squares[square.row() as usize][square.col() as usize],
            piece,
        )
    }

    /// Removes and returns the occupant of a square.
    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.row() as usize][square.col() as usize].take()
    }

    /// Iterates all occupied squares with a copy of their piece.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|&p| (sq, p)))
    }

    /// Returns the square holding the king of the given color, if present.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.occupied()
            .find(|(_, p)| p.kind() == PieceKind::King && p.color() == color)
            .map(|(sq, _)| sq)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for square in Square::all() {
            let glyph = match self.piece_at(square) {
                Some(piece) => piece.glyph(),
                None => match square.shade() {
                    Shade::Light => '\u{25A1}',
                    Shade::Dark => '\u{25A0}',
                },
            };
            write!(f, "{} ", glyph)?;
            if square.col() == 7 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn standard_setup() {
        let board = Board::standard();
        let e1 = board.piece_at(sq("e1")).unwrap();
        assert_eq!(e1.kind(), PieceKind::King);
        assert_eq!(e1.color(), Color::White);

        let d8 = board.piece_at(sq("d8")).unwrap();
        assert_eq!(d8.kind(), PieceKind::Queen);
        assert_eq!(d8.color(), Color::Black);

        for col in 0..8 {
            let white_pawn = board.piece_at(Square::new(6, col).unwrap()).unwrap();
            assert_eq!(white_pawn.kind(), PieceKind::Pawn);
            assert_eq!(white_pawn.color(), Color::White);
        }
        assert_eq!(board.occupied().count(), 32);
        assert!(board.piece_at(sq("e4")).is_none());
    }

    #[test]
    fn from_grid_validates_dimensions() {
        assert_eq!(
            Board::from_grid(vec![vec![None; 8]; 7]),
            Err(BoardError::RowCount(7))
        );
        let mut grid = vec![vec![None; 8]; 8];
        grid[3] = vec![None; 9];
        assert_eq!(
            Board::from_grid(grid),
            Err(BoardError::RowWidth { row: 3, len: 9 })
        );
        assert!(Board::from_grid(vec![vec![None; 8]; 8]).is_ok());
    }

    #[test]
    fn placement_round_trip_of_standard() {
        let parsed =
            Board::from_placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").unwrap();
        assert_eq!(parsed, Board::standard());
    }

    #[test]
    fn placement_sparse() {
        let board = Board::from_placement("8/8/8/4k3/8/8/4K3/8").unwrap();
        assert_eq!(board.occupied().count(), 2);
        assert_eq!(board.king_square(Color::Black), Some(sq("e5")));
        assert_eq!(board.king_square(Color::White), Some(sq("e2")));
    }

    #[test]
    fn placement_errors() {
        assert_eq!(
            Board::from_placement("8/8/8/8"),
            Err(BoardError::RankCount(4))
        );
        assert_eq!(
            Board::from_placement("9/8/8/8/8/8/8/8"),
            Err(BoardError::InvalidPieceChar('9'))
        );
        assert_eq!(
            Board::from_placement("x7/8/8/8/8/8/8/8"),
            Err(BoardError::InvalidPieceChar('x'))
        );
        assert_eq!(
            Board::from_placement("7/8/8/8/8/8/8/8"),
            Err(BoardError::RankWidth('8'))
        );
        assert_eq!(
            Board::from_placement("rr7/8/8/8/8/8/8/8"),
            Err(BoardError::RankWidth('8'))
        );
    }

    #[test]
    fn set_and_take() {
        let mut board = Board::empty();
        let e4 = sq("e4");
        assert_eq!(board.set(e4, Some(Piece::new(PieceKind::Rook, Color::White))), None);
        assert!(board.piece_at(e4).is_some());
        let taken = board.take(e4).unwrap();
        assert_eq!(taken.kind(), PieceKind::Rook);
        assert!(board.piece_at(e4).is_none());
    }

    #[test]
    fn king_square_absent() {
        assert_eq!(Board::empty().king_square(Color::White), None);
    }

    #[test]
    fn display_renders_grid() {
        let text = Board::standard().to_string();
        assert_eq!(text.lines().count(), 8);
        assert!(text.contains('♔'));
        assert!(text.contains('♟'));
    }
}
