//! Conversions to and from the `shakmaty` types used to replay games.
//!
//! Castling is converted in its king-moves-two-squares form (`e1g1`), the
//! form engines speak.

use crate::{Color, File, Move, ParseMoveError, Piece, Rank, Square};
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Role};

impl From<shakmaty::Color> for Color {
    fn from(color: shakmaty::Color) -> Self {
        match color {
            shakmaty::Color::White => Color::White,
            shakmaty::Color::Black => Color::Black,
        }
    }
}

impl From<Color> for shakmaty::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::White => shakmaty::Color::White,
            Color::Black => shakmaty::Color::Black,
        }
    }
}

impl From<shakmaty::Square> for Square {
    fn from(sq: shakmaty::Square) -> Self {
        Square::new(
            File::ALL[sq.file().to_usize()],
            Rank::ALL[sq.rank().to_usize()],
        )
    }
}

impl From<Square> for shakmaty::Square {
    fn from(sq: Square) -> Self {
        shakmaty::Square::from_coords(
            shakmaty::File::new(u32::from(sq.file().index())),
            shakmaty::Rank::new(u32::from(sq.rank().index())),
        )
    }
}

impl From<Role> for Piece {
    fn from(role: Role) -> Self {
        match role {
            Role::Pawn => Piece::Pawn,
            Role::Knight => Piece::Knight,
            Role::Bishop => Piece::Bishop,
            Role::Rook => Piece::Rook,
            Role::Queen => Piece::Queen,
            Role::King => Piece::King,
        }
    }
}

impl From<Piece> for Role {
    fn from(piece: Piece) -> Self {
        match piece {
            Piece::Pawn => Role::Pawn,
            Piece::Knight => Role::Knight,
            Piece::Bishop => Role::Bishop,
            Piece::Rook => Role::Rook,
            Piece::Queen => Role::Queen,
            Piece::King => Role::King,
        }
    }
}

impl From<Move> for UciMove {
    fn from(mv: Move) -> Self {
        UciMove::Normal {
            from: mv.from().into(),
            to: mv.to().into(),
            promotion: mv.promotion().map(Role::from),
        }
    }
}

impl TryFrom<&UciMove> for Move {
    type Error = ParseMoveError;

    /// Drops and null moves have no from/to pair.
    fn try_from(uci: &UciMove) -> Result<Self, Self::Error> {
        match *uci {
            UciMove::Normal {
                from,
                to,
                promotion: Some(role),
            } => Ok(Move::with_promotion(from.into(), to.into(), role.into())),
            UciMove::Normal {
                from,
                to,
                promotion: None,
            } => Ok(Move::new(from.into(), to.into())),
            _ => Err(ParseMoveError(uci.to_string())),
        }
    }
}

impl TryFrom<&shakmaty::Move> for Move {
    type Error = ParseMoveError;

    fn try_from(m: &shakmaty::Move) -> Result<Self, Self::Error> {
        Move::try_from(&m.to_uci(CastlingMode::Standard))
    }
}
