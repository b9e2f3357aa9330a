//! Opening book lookup and the opening-theory handler.
//!
//! [`OpeningBook`] maps positions (keyed by ply count and move history)
//! to the moves opening theory allows there. [`OpeningTheoryHandler`]
//! plugs the book into the engine's validation-handler chain, either as
//! a strict primary handler or as an advisory commentator.

mod book;
mod handler;

pub use book::{BookError, OpeningBook};
pub use handler::{position_key, OpeningTheoryHandler, TheoryMode};
