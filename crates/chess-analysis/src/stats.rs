//! Per-side rating counts and the accuracy score.

use crate::Rating;
use chess_core::Color;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Points earned and available for one rated move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Points {
    pub earned: u32,
    pub possible: u32,
}

/// Points awarded for each rating.
pub const fn points(rating: Rating) -> Points {
    let earned = match rating {
        Rating::BestMove | Rating::Brilliant | Rating::GreatMove => 300,
        Rating::Excellent => 250,
        Rating::Good => 200,
        Rating::Inaccuracy => 150,
        Rating::Mistake | Rating::Miss => 100,
        Rating::Blunder => 5,
    };
    Points {
        earned,
        possible: 300,
    }
}

/// Rating counts for one player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerStats {
    counts: [u32; Rating::ALL.len()],
}

impl PlayerStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one more move with `rating`.
    pub fn record(&mut self, rating: Rating) {
        self.counts[rating.index()] += 1;
    }

    /// Number of moves recorded with `rating`.
    pub fn count(&self, rating: Rating) -> u32 {
        self.counts[rating.index()]
    }

    /// Number of moves recorded.
    pub fn total_moves(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// `(rating, count)` pairs in [`Rating::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Rating, u32)> + '_ {
        Rating::ALL.into_iter().map(|r| (r, self.count(r)))
    }

    pub fn earned_points(&self) -> u64 {
        self.iter()
            .map(|(r, n)| u64::from(points(r).earned) * u64::from(n))
            .sum()
    }

    pub fn possible_points(&self) -> u64 {
        self.iter()
            .map(|(r, n)| u64::from(points(r).possible) * u64::from(n))
            .sum()
    }

    /// Accuracy percentage in `[0, 100]`, or `None` before any move is recorded.
    pub fn accuracy(&self) -> Option<f64> {
        let possible = self.possible_points();
        if possible == 0 {
            return None;
        }
        Some(self.earned_points() as f64 / possible as f64 * 100.0)
    }
}

impl Serialize for PlayerStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Rating::ALL.len()))?;
        for (rating, n) in self.iter() {
            map.serialize_entry(rating.name(), &n)?;
        }
        map.end()
    }
}

/// Separate accumulators for White and Black.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SideStats {
    pub white: PlayerStats,
    pub black: PlayerStats,
}

impl SideStats {
    /// Records a rating for the side that played the move.
    pub fn record(&mut self, side: Color, rating: Rating) {
        self.get_mut(side).record(rating);
    }

    pub fn get(&self, side: Color) -> &PlayerStats {
        match side {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    pub fn get_mut(&mut self, side: Color) -> &mut PlayerStats {
        match side {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}
