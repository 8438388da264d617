//! Move quality ratings and per-move analysis records.

use crate::palette::Rgb;
use crate::stats::{PlayerStats, SideStats};
use crate::Evaluation;
use chess_core::{Color, Move};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Quality rating of a single move.
///
/// `Brilliant` is part of the vocabulary (it has a colour and a score) but
/// the classifier never produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    /// The engine's move, or a move that lost nothing.
    BestMove,
    /// Minimal centipawn loss.
    Excellent,
    /// Small centipawn loss.
    Good,
    /// Noticeable centipawn loss.
    Inaccuracy,
    /// Significant centipawn loss.
    Mistake,
    /// Major loss, or walking into a forced mate.
    Blunder,
    /// A forced mate was available and the move let it slip.
    Miss,
    /// Reserved; never emitted by the classifier.
    Brilliant,
    /// The move created a forced mate out of a normal position.
    GreatMove,
}

/// Error returned when parsing an unknown rating name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown rating: {0}")]
pub struct UnknownRating(pub String);

impl Rating {
    /// All ratings, in declaration order.
    pub const ALL: [Rating; 9] = [
        Rating::BestMove,
        Rating::Excellent,
        Rating::Good,
        Rating::Inaccuracy,
        Rating::Mistake,
        Rating::Blunder,
        Rating::Miss,
        Rating::Brilliant,
        Rating::GreatMove,
    ];

    /// Position of this rating in [`Rating::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Machine name, matching the serde representation.
    pub const fn name(self) -> &'static str {
        match self {
            Rating::BestMove => "best_move",
            Rating::Excellent => "excellent",
            Rating::Good => "good",
            Rating::Inaccuracy => "inaccuracy",
            Rating::Mistake => "mistake",
            Rating::Blunder => "blunder",
            Rating::Miss => "miss",
            Rating::Brilliant => "brilliant",
            Rating::GreatMove => "great_move",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Rating::BestMove => "Best Move",
            Rating::Excellent => "Excellent Move",
            Rating::Good => "Good Move",
            Rating::Inaccuracy => "Inaccuracy",
            Rating::Mistake => "Mistake",
            Rating::Blunder => "Blunder",
            Rating::Miss => "Miss",
            Rating::Brilliant => "Brilliant Move",
            Rating::GreatMove => "Great Move",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Rating {
    type Err = UnknownRating;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rating::ALL
            .into_iter()
            .find(|r| r.name() == s)
            .ok_or_else(|| UnknownRating(s.to_string()))
    }
}

/// Builds the sentence shown next to a rated move.
///
/// `best_san` is the engine's preferred move when it differs from the played
/// one. A best move that was not the engine's choice is presented as an
/// alternative, every other rating names the move the engine wanted.
pub fn advisory(played_san: &str, rating: Rating, best_san: Option<&str>) -> String {
    let mut text = match rating {
        Rating::BestMove => format!("{} is the Best Move", played_san),
        Rating::Excellent => format!("{} is an Excellent Move", played_san),
        Rating::Good => format!("{} is a Good Move", played_san),
        Rating::Inaccuracy => format!("{} is an Inaccuracy", played_san),
        Rating::Mistake => format!("{} is a Mistake", played_san),
        Rating::Blunder => format!("{} is a Blunder", played_san),
        Rating::Miss => format!("{} Missed an opportunity", played_san),
        Rating::Brilliant => format!("{} is a Brilliant Move", played_san),
        Rating::GreatMove => format!("{} is a Great Move", played_san),
    };

    if let Some(best) = best_san {
        if rating == Rating::BestMove {
            text.push_str(", an alternative is ");
        } else {
            text.push_str(", the Best Move was ");
        }
        text.push_str(best);
    }
    text
}

/// Analysis result for a single move.
#[derive(Debug, Clone, Serialize)]
pub struct MoveAnalysis {
    /// Zero-based ply index within the analysed game.
    pub ply: usize,
    /// Side that played the move.
    pub side: Color,
    /// The move that was played.
    pub played_move: Move,
    /// The played move in SAN.
    pub san: String,
    /// The engine's preferred move, when it differs from the played one.
    pub best_move: Option<Move>,
    /// The engine's preferred move in SAN.
    pub best_san: Option<String>,
    /// Evaluation before the move, from the mover's point of view.
    pub eval_before: Evaluation,
    /// Evaluation after the move, from the mover's point of view.
    pub eval_after: Evaluation,
    /// Evaluation after the move, from White's point of view.
    pub display_eval: Evaluation,
    /// Search depth reported for the position after the move.
    pub depth: u32,
    pub rating: Rating,
    /// Arrow colour for the played move.
    pub color: Rgb,
    /// Arrow colour for the engine's preferred move, when shown.
    pub best_color: Option<Rgb>,
    /// Advisory sentence.
    pub advice: String,
}

/// Result of analysing a whole game.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GameAnalysis {
    pub moves: Vec<MoveAnalysis>,
    pub stats: SideStats,
    /// True when analysis stopped before the last input move because the
    /// game was already decided.
    pub stopped_early: bool,
}

impl GameAnalysis {
    /// Rating counts for one side.
    pub fn stats(&self, side: Color) -> &PlayerStats {
        self.stats.get(side)
    }

    /// Accuracy percentage for one side, `None` if that side has no rated moves.
    pub fn accuracy(&self, side: Color) -> Option<f64> {
        self.stats.get(side).accuracy()
    }
}
