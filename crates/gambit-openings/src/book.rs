//! Opening book storage and lookup.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading an opening book.
#[derive(Debug, Error)]
pub enum BookError {
    /// Failed to read the book file.
    #[error("failed to read opening book: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A book of opening lines.
///
/// Maps a position key (see [`position_key`](crate::position_key)) to
/// the list of from+to move notations theory allows there. Serialized
/// as a plain JSON object:
///
/// ```json
/// { "move_0": ["e2e4", "d2d4"], "move_1_e2e4": ["e7e5", "c7c5"] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpeningBook {
    lines: HashMap<String, Vec<String>>,
}

impl OpeningBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The builtin book: first moves, replies to 1.e4, and the Italian
    /// Game main line.
    #[must_use]
    pub fn builtin() -> Self {
        let mut book = OpeningBook::new();
        book.add_line("move_0", ["e2e4", "d2d4", "g1f3", "c2c4"]);
        book.add_line("move_1_e2e4", ["e7e5", "c7c5", "e7e6", "c7c6"]);
        book.add_line("move_2_e2e4_e7e5", ["g1f3", "f2f4"]);
        book.add_line("move_3_e2e4_e7e5_g1f3", ["b8c6", "f7f5"]);
        book.add_line("move_4_e2e4_e7e5_g1f3_b8c6", ["f1c4", "f1b5"]);
        book
    }

    /// Parses a book from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, BookError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a book from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BookError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Returns true if the book has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of positions in the book.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Adds (or replaces) the allowed moves for a position key.
    pub fn add_line<I, S>(&mut self, key: impl Into<String>, moves: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines
            .insert(key.into(), moves.into_iter().map(Into::into).collect());
    }

    /// Looks up the allowed moves for a position key.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&[String]> {
        self.lines.get(key).map(|v| v.as_slice())
    }

    /// Returns true if the book allows `notation` (e.g. "e2e4") at `key`.
    #[must_use]
    pub fn contains(&self, key: &str, notation: &str) -> bool {
        self.lookup(key)
            .is_some_and(|moves| moves.iter().any(|m| m == notation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_has_main_lines() {
        let book = OpeningBook::builtin();
        assert!(!book.is_empty());
        assert!(book.contains("move_0", "e2e4"));
        assert!(book.contains("move_1_e2e4", "c7c5"));
        assert!(!book.contains("move_0", "a2a4"));
        assert!(!book.contains("move_9", "e2e4"));
    }

    #[test]
    fn json_round_trip() {
        let book = OpeningBook::builtin();
        let json = serde_json::to_string(&book).unwrap();
        let parsed = OpeningBook::from_json_str(&json).unwrap();
        assert_eq!(parsed, book);
    }

    #[test]
    fn from_json_str_object_form() {
        let book =
            OpeningBook::from_json_str(r#"{"move_0": ["e2e4"], "move_1_e2e4": ["e7e5"]}"#)
                .unwrap();
        assert_eq!(book.len(), 2);
        assert_eq!(
            book.lookup("move_0"),
            Some(&["e2e4".to_string()][..])
        );
    }

    #[test]
    fn from_json_str_rejects_malformed() {
        assert!(matches!(
            OpeningBook::from_json_str("not json"),
            Err(BookError::Json(_))
        ));
    }

    #[test]
    fn from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"move_0": ["d2d4"]}}"#).unwrap();
        let book = OpeningBook::from_path(file.path()).unwrap();
        assert!(book.contains("move_0", "d2d4"));
    }

    #[test]
    fn from_path_missing_file() {
        assert!(matches!(
            OpeningBook::from_path("/definitely/not/here.json"),
            Err(BookError::Io(_))
        ));
    }
}
