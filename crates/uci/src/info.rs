//! UCI info line parsing.

use serde::{Deserialize, Serialize};

/// Score in centipawns or mate distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Score {
    /// Centipawn score (100 = 1 pawn advantage).
    Cp(i32),
    /// Mate in N (positive = side to move mates, negative = side to move gets mated).
    Mate(i32),
}

/// Marks a score reported during an aspiration re-search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBound {
    Lower,
    Upper,
}

/// Search information from engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineInfo {
    /// Search depth in plies.
    pub depth: Option<u32>,
    /// Index of the line in multi-PV mode (1-based).
    pub multipv: Option<u32>,
    /// Score evaluation, from the side to move's point of view.
    pub score: Option<Score>,
    /// Set when the score is only a bound.
    pub bound: Option<ScoreBound>,
    /// Principal variation (best line found).
    pub pv: Vec<String>,
}

impl EngineInfo {
    /// Parse UCI info line.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with("info") {
            return None;
        }

        let mut info = EngineInfo::default();
        let parts: Vec<&str> = line.split_whitespace().collect();
        let mut i = 1; // Skip "info"

        while i < parts.len() {
            match parts[i] {
                "depth" => {
                    i += 1;
                    if i < parts.len() {
                        info.depth = parts[i].parse().ok();
                    }
                }
                "multipv" => {
                    i += 1;
                    if i < parts.len() {
                        info.multipv = parts[i].parse().ok();
                    }
                }
                "score" => {
                    i += 1;
                    if i + 1 < parts.len() {
                        let value = parts[i + 1].parse().ok();
                        info.score = match (parts[i], value) {
                            ("cp", Some(cp)) => Some(Score::Cp(cp)),
                            ("mate", Some(m)) => Some(Score::Mate(m)),
                            _ => info.score,
                        };
                        i += 1;
                    }
                }
                "lowerbound" => info.bound = Some(ScoreBound::Lower),
                "upperbound" => info.bound = Some(ScoreBound::Upper),
                "pv" => {
                    i += 1;
                    // Collect moves until another keyword or end
                    while i < parts.len() && !is_info_keyword(parts[i]) {
                        info.pv.push(parts[i].to_string());
                        i += 1;
                    }
                    continue;
                }
                // Free text up to the end of the line.
                "string" => break,
                _ => {}
            }
            i += 1;
        }

        Some(info)
    }

    /// True when this line carries a usable, exact score together with its depth.
    pub fn is_scored(&self) -> bool {
        self.depth.is_some() && self.score.is_some() && self.bound.is_none()
    }
}

fn is_info_keyword(s: &str) -> bool {
    matches!(
        s,
        "depth"
            | "seldepth"
            | "multipv"
            | "score"
            | "nodes"
            | "nps"
            | "time"
            | "pv"
            | "currmove"
            | "currmovenumber"
            | "hashfull"
            | "tbhits"
            | "string"
    )
}
