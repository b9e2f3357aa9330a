//! Board square coordinates and algebraic notation.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors that can occur when parsing an algebraic square label.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseSquareError {
    #[error("expected exactly two characters, got {0}")]
    Length(usize),

    #[error("file must be 'a'..'h', got '{0}'")]
    File(char),

    #[error("rank must be '1'..'8', got '{0}'")]
    Rank(char),
}

/// The fixed shade of a square, derived from its coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shade {
    Light,
    Dark,
}

/// A square on the 8x8 board, addressed by `(row, col)`.
///
/// Row 0 is rank 8 and column 0 is file 'a', so `a8 = (0, 0)` and
/// `h1 = (7, 7)`. Both coordinates are range-checked at construction,
/// which makes board access by `Square` infallible.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Creates a square from row and column indices, or `None` if either
    /// is outside `[0, 8)`.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Square { row, col })
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g. "e4").
    ///
    /// The string must be exactly two characters: a file in `'a'..'h'`
    /// followed by a rank in `'1'..'8'`.
    pub fn from_algebraic(s: &str) -> Result<Self, ParseSquareError> {
        let mut chars = s.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => (f, r),
            _ => return Err(ParseSquareError::Length(s.chars().count())),
        };
        if !('a'..='h').contains(&file) {
            return Err(ParseSquareError::File(file));
        }
        if !('1'..='8').contains(&rank) {
            return Err(ParseSquareError::Rank(rank));
        }
        let col = file as u8 - b'a';
        let row = 8 - (rank as u8 - b'0');
        Ok(Square { row, col })
    }

    /// Returns the row index (0 = rank 8).
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column index (0 = file 'a').
    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the file character ('a'..'h').
    #[inline]
    pub const fn file(self) -> char {
        (b'a' + self.col) as char
    }

    /// Returns the rank character ('1'..'8').
    #[inline]
    pub const fn rank(self) -> char {
        (b'0' + (8 - self.row)) as char
    }

    /// Returns the shade of this square: light when `row + col` is even.
    #[inline]
    pub const fn shade(self) -> Shade {
        if (self.row + self.col) % 2 == 0 {
            Shade::Light
        } else {
            Shade::Dark
        }
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    /// Iterates all 64 squares in row-major order (a8 first, h1 last).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
