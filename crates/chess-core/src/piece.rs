//! Chess piece representation.

/// The six types of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    /// Parses the promotion suffix of a UCI move (`n`, `b`, `r`, `q`).
    pub const fn from_promotion_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'n' => Some(Piece::Knight),
            'b' => Some(Piece::Bishop),
            'r' => Some(Piece::Rook),
            'q' => Some(Piece::Queen),
            _ => None,
        }
    }

    /// Returns the lowercase UCI promotion suffix, if this piece can be promoted to.
    pub const fn promotion_char(self) -> Option<char> {
        match self {
            Piece::Knight => Some('n'),
            Piece::Bishop => Some('b'),
            Piece::Rook => Some('r'),
            Piece::Queen => Some('q'),
            Piece::Pawn | Piece::King => None,
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Piece::Pawn => "Pawn",
            Piece::Knight => "Knight",
            Piece::Bishop => "Bishop",
            Piece::Rook => "Rook",
            Piece::Queen => "Queen",
            Piece::King => "King",
        };
        write!(f, "{}", name)
    }
}
