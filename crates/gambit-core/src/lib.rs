//! Core types for the gambit chess engine.
//!
//! This crate provides the fundamental types used across the engine:
//! - [`Color`] for the two players
//! - [`Square`] and [`Shade`] for board coordinates
//! - [`Piece`] and [`PieceKind`] for piece representation
//! - [`MoveRecord`] and [`MoveKind`] for executed moves

mod color;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use mov::{MoveKind, MoveRecord};
pub use piece::{Piece, PieceKind};
pub use square::{ParseSquareError, Shade, Square};
