//! Core types for chess.
//!
//! This crate provides the small set of board vocabulary the annotator needs
//! to talk about moves without owning a board representation:
//! - [`Color`] for the side to move
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Piece`] for promotion targets
//! - [`Move`] for a from/to square pair in UCI notation
//!
//! Each type converts to and from its `shakmaty` counterpart, which the
//! annotator uses to replay games.

mod color;
mod interop;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use mov::{Move, ParseMoveError};
pub use piece::Piece;
pub use square::{File, Rank, Square};
