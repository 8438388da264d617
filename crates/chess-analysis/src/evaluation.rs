//! Chess position evaluation types.

use chess_core::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use uci::Score;

/// Represents a chess position evaluation.
///
/// Evaluations can be either centipawn scores (for normal positions)
/// or mate distances (when a forced mate is found). The sign is always
/// relative to some point of view: either the side to move, or a fixed
/// colour. Changing the point of view negates the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evaluation {
    /// Centipawn evaluation (positive = advantage for the point of view).
    Centipawns(i32),
    /// Mate distance (positive = the point of view delivers mate,
    /// negative = it gets mated, zero = mate is already on the board).
    Mate(i32),
}

impl Evaluation {
    /// Builds an evaluation from the two optional score fields of a UCI info line.
    ///
    /// A mate score wins over a centipawn score when both are present.
    pub fn from_uci_score(cp: Option<i32>, mate: Option<i32>) -> Option<Self> {
        match (cp, mate) {
            (_, Some(m)) => Some(Evaluation::Mate(m)),
            (Some(c), None) => Some(Evaluation::Centipawns(c)),
            (None, None) => None,
        }
    }

    /// The same evaluation seen from the other side.
    #[inline]
    pub const fn flip(self) -> Self {
        match self {
            Evaluation::Centipawns(cp) => Evaluation::Centipawns(cp.saturating_neg()),
            Evaluation::Mate(m) => Evaluation::Mate(m.saturating_neg()),
        }
    }

    /// Re-expresses an evaluation given from `side_to_move`'s point of view
    /// from `viewer`'s point of view.
    #[inline]
    pub fn relative_to(self, side_to_move: Color, viewer: Color) -> Self {
        if side_to_move == viewer {
            self
        } else {
            self.flip()
        }
    }

    /// Returns true for a forced-mate evaluation.
    #[inline]
    pub const fn is_mate(self) -> bool {
        matches!(self, Evaluation::Mate(_))
    }

    /// Returns true when mate has already been delivered (mate distance zero).
    #[inline]
    pub const fn is_checkmate(self) -> bool {
        matches!(self, Evaluation::Mate(0))
    }

    /// The centipawn value, if this is not a mate score.
    pub const fn centipawns(self) -> Option<i32> {
        match self {
            Evaluation::Centipawns(cp) => Some(cp),
            Evaluation::Mate(_) => None,
        }
    }

    /// The mate distance, if this is a mate score.
    pub const fn mate_distance(self) -> Option<i32> {
        match self {
            Evaluation::Mate(m) => Some(m),
            Evaluation::Centipawns(_) => None,
        }
    }
}

impl From<Score> for Evaluation {
    fn from(score: Score) -> Self {
        match score {
            Score::Cp(cp) => Evaluation::Centipawns(cp),
            Score::Mate(m) => Evaluation::Mate(m),
        }
    }
}

/// Evaluation-bar caption: `+0.35`, `-1.20`, `M3`, `-M2`, or `Game Over`.
impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Evaluation::Centipawns(cp) => write!(f, "{:+.2}", f64::from(cp) / 100.0),
            Evaluation::Mate(0) => write!(f, "Game Over"),
            Evaluation::Mate(m) if m > 0 => write!(f, "M{}", m),
            Evaluation::Mate(m) => write!(f, "-M{}", m.unsigned_abs()),
        }
    }
}
