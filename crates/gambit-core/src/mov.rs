//! Executed-move records.

use std::fmt;

use crate::{Piece, Square};

/// The special-move category of an executed ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// A plain relocation or capture.
    Normal,
    /// A two-square pawn advance (arms en passant for one ply).
    DoublePush,
    /// An en passant capture.
    EnPassant,
    /// A combined king+rook castling move.
    Castle,
}

/// An immutable record of one executed ply.
///
/// Records are created only by the game executor and never mutated
/// after they are appended to the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    /// Sequential move number, starting at 1.
    pub number: usize,
    /// The square the piece moved from.
    pub from: Square,
    /// The square the piece moved to.
    pub to: Square,
    /// Snapshot of the piece that moved.
    pub piece: Piece,
    /// Snapshot of the captured piece, if any.
    pub captured: Option<Piece>,
    /// The special-move category.
    pub kind: MoveKind,
}

impl MoveRecord {
    /// Returns the from+to notation for this move (e.g. "e2e4").
    pub fn notation(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} {}-{}",
            self.number,
            self.piece.kind(),
            self.from,
            self.to
        )?;
        if let Some(captured) = self.captured {
            write!(f, " captures {}", captured.kind())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, PieceKind};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn notation() {
        let record = MoveRecord {
            number: 1,
            from: sq("e2"),
            to: sq("e4"),
            piece: Piece::new(PieceKind::Pawn, Color::White),
            captured: None,
            kind: MoveKind::DoublePush,
        };
        assert_eq!(record.notation(), "e2e4");
    }

    #[test]
    fn display_plain_and_capture() {
        let quiet = MoveRecord {
            number: 3,
            from: sq("g1"),
            to: sq("f3"),
            piece: Piece::new(PieceKind::Knight, Color::White),
            captured: None,
            kind: MoveKind::Normal,
        };
        assert_eq!(format!("{}", quiet), "3. Knight g1-f3");

        let capture = MoveRecord {
            captured: Some(Piece::new(PieceKind::Pawn, Color::Black)),
            ..quiet
        };
        assert_eq!(format!("{}", capture), "3. Knight g1-f3 captures Pawn");
    }
}
