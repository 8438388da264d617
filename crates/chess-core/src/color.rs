//! Player color representation.

use serde::{Deserialize, Serialize};
use shakmaty::fen::Fen;

/// Represents the two players in chess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Both colors, white first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Returns the opposite color.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the side to move of a FEN string, or `None` if it does not parse.
    pub fn side_to_move_of(fen: &str) -> Option<Self> {
        let fen: Fen = fen.parse().ok()?;
        Some(fen.as_setup().turn.into())
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_color() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::White);
    }

    #[test]
    fn color_index() {
        assert_eq!(Color::White.index(), 0);
        assert_eq!(Color::Black.index(), 1);
    }

    #[test]
    fn side_to_move_from_fen() {
        assert_eq!(
            Color::side_to_move_of("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"),
            Some(Color::Black)
        );
        assert_eq!(Color::side_to_move_of("8/8/8/8/8/8/8/8 w - - 0 1"), Some(Color::White));
        assert_eq!(Color::side_to_move_of("garbage"), None);
        assert_eq!(Color::side_to_move_of("8/8/8/8/8/8/8/8 x - - 0 1"), None);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Color::White), "White");
        assert_eq!(format!("{}", Color::Black), "Black");
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Color::Black).unwrap(), "\"black\"");
    }
}
