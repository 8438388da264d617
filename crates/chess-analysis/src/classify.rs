//! Move classification from a pair of evaluations.
//!
//! Both evaluations are taken from the point of view of the side that made
//! the move: `prior` is the evaluation of the position before the move,
//! `posterior` the evaluation of the position after it.

use crate::{Evaluation, Rating};
use chess_core::Move;

/// Centipawn loss below which a move is Excellent.
pub const EXCELLENT_LOSS: u64 = 15;
/// Centipawn loss below which a move is Good.
pub const GOOD_LOSS: u64 = 50;
/// Centipawn loss below which a move is an Inaccuracy.
pub const INACCURACY_LOSS: u64 = 250;
/// Centipawn loss below which a move is a Mistake.
pub const MISTAKE_LOSS: u64 = 600;

/// After losing a forced mate, a score at least this high is a Miss.
pub const MISS_SCORE: i32 = 700;
/// After losing a forced mate, a score at least this high is still Good.
pub const GOOD_RECOVERY_SCORE: i32 = 500;
/// After losing a forced mate, a score at least this high is an Inaccuracy.
pub const INACCURACY_RECOVERY_SCORE: i32 = 200;

/// Rates a move.
///
/// `played` is the move made in the game and `engine_best` the engine's
/// first choice in the position before it.
pub fn classify(
    prior: Evaluation,
    posterior: Evaluation,
    played: Move,
    engine_best: Move,
) -> Rating {
    let is_best = played == engine_best;

    match (prior, posterior) {
        (Evaluation::Centipawns(before), Evaluation::Centipawns(after)) => {
            let delta = i64::from(after) - i64::from(before);
            if is_best || delta >= 0 {
                Rating::BestMove
            } else {
                rate_loss(delta.unsigned_abs())
            }
        }
        (Evaluation::Centipawns(_), Evaluation::Mate(plies)) => {
            if plies > 0 {
                Rating::GreatMove
            } else if !is_best {
                Rating::Blunder
            } else {
                Rating::BestMove
            }
        }
        (Evaluation::Mate(_), Evaluation::Centipawns(after)) => {
            if after >= MISS_SCORE {
                Rating::Miss
            } else if after >= GOOD_RECOVERY_SCORE {
                Rating::Good
            } else if after >= INACCURACY_RECOVERY_SCORE {
                Rating::Inaccuracy
            } else {
                Rating::Blunder
            }
        }
        (Evaluation::Mate(before), Evaluation::Mate(after)) => {
            let (before, after) = (i64::from(before), i64::from(after));
            if is_best || after >= before + 1 || after == 0 {
                Rating::BestMove
            } else if after >= before {
                Rating::Excellent
            } else {
                Rating::Blunder
            }
        }
    }
}

fn rate_loss(loss: u64) -> Rating {
    if loss < EXCELLENT_LOSS {
        Rating::Excellent
    } else if loss < GOOD_LOSS {
        Rating::Good
    } else if loss < INACCURACY_LOSS {
        Rating::Inaccuracy
    } else if loss < MISTAKE_LOSS {
        Rating::Mistake
    } else {
        Rating::Blunder
    }
}
