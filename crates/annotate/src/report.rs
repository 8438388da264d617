//! Report output: a text report for the terminal and a JSON annotation file.
//!
//! The JSON file is the hand-off to board renderers: every move carries its
//! rating, arrow colours, advisory text and evaluations.

use crate::pgn::ParsedGame;
use chess_analysis::{GameAnalysis, MoveAnalysis, PlayerStats};
use chess_core::Color;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

/// Move number prefix for a ply: `12.` for White, `12...` for Black.
pub fn move_label(fen_before: &str, side: Color) -> String {
    let number = fen_before
        .split_whitespace()
        .nth(5)
        .and_then(|n| n.parse::<u32>().ok())
        .unwrap_or(1);
    match side {
        Color::White => format!("{}.", number),
        Color::Black => format!("{}...", number),
    }
}

/// One report line, e.g. `12. Nf3 is the Best Move [+0.35]`.
pub fn format_move_line(label: &str, analysis: &MoveAnalysis) -> String {
    format!("{} {} [{}]", label, analysis.advice, analysis.display_eval)
}

/// Accuracy as a percentage with one decimal, or `n/a` without rated moves.
pub fn format_accuracy(accuracy: Option<f64>) -> String {
    match accuracy {
        Some(a) => format!("{:.1}%", a),
        None => "n/a".to_string(),
    }
}

fn label_for(game: &ParsedGame, analysis: &MoveAnalysis) -> String {
    game.input
        .plies
        .get(analysis.ply)
        .map(|p| move_label(&p.fen_before, analysis.side))
        .unwrap_or_default()
}

fn player_name(game: &ParsedGame, side: Color) -> Option<&str> {
    match side {
        Color::White => game.white.as_deref(),
        Color::Black => game.black.as_deref(),
    }
}

/// Writes the per-move lines followed by the accuracy summary.
pub fn write_text<W: Write>(
    out: &mut W,
    game: &ParsedGame,
    analysis: &GameAnalysis,
) -> io::Result<()> {
    for m in &analysis.moves {
        writeln!(out, "{}", format_move_line(&label_for(game, m), m))?;
    }

    if analysis.stopped_early {
        writeln!(
            out,
            "\nThe game was decided after {} of {} plies; the remaining moves were not rated.",
            analysis.moves.len(),
            game.input.plies.len()
        )?;
    }

    writeln!(out)?;
    for side in Color::ALL {
        let stats = analysis.stats(side);
        let name = match player_name(game, side) {
            Some(name) => format!("{} ({})", side, name),
            None => side.to_string(),
        };
        writeln!(
            out,
            "{} accuracy: {} ({} moves)",
            name,
            format_accuracy(stats.accuracy()),
            stats.total_moves()
        )?;

        let counts: Vec<String> = stats
            .iter()
            .filter(|(_, n)| *n > 0)
            .map(|(rating, n)| format!("{}: {}", rating.label(), n))
            .collect();
        if !counts.is_empty() {
            writeln!(out, "  {}", counts.join(", "))?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct AnnotationJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    white: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    black: Option<&'a str>,
    engine: &'a str,
    start_fen: Option<&'a str>,
    stopped_early: bool,
    moves: Vec<MoveJson<'a>>,
    summary: SummaryJson<'a>,
}

#[derive(Serialize)]
struct MoveJson<'a> {
    label: String,
    fen_before: &'a str,
    #[serde(flatten)]
    analysis: &'a MoveAnalysis,
}

#[derive(Serialize)]
struct SummaryJson<'a> {
    white: SideJson<'a>,
    black: SideJson<'a>,
}

#[derive(Serialize)]
struct SideJson<'a> {
    moves: u32,
    accuracy: Option<f64>,
    counts: &'a PlayerStats,
}

impl<'a> SideJson<'a> {
    fn new(stats: &'a PlayerStats) -> Self {
        Self {
            moves: stats.total_moves(),
            accuracy: stats.accuracy(),
            counts: stats,
        }
    }
}

/// Writes the analysed game to a pretty-printed JSON annotation file.
///
/// # File Format
///
/// ```json
/// {
///   "white": "Alice",
///   "black": "Bob",
///   "engine": "stockfish",
///   "start_fen": null,
///   "stopped_early": false,
///   "moves": [
///     {
///       "label": "1.",
///       "fen_before": "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
///       "ply": 0,
///       "side": "white",
///       "played_move": "e2e4",
///       "san": "e4",
///       "best_move": null,
///       "rating": "best_move",
///       "color": "#2DFF38",
///       "advice": "e4 is the Best Move"
///     }
///   ],
///   "summary": {
///     "white": { "moves": 1, "accuracy": 100.0, "counts": { "best_move": 1 } }
///   }
/// }
/// ```
pub fn write_json<P: AsRef<Path>>(
    path: P,
    game: &ParsedGame,
    engine: &str,
    analysis: &GameAnalysis,
) -> io::Result<()> {
    let moves = analysis
        .moves
        .iter()
        .map(|m| MoveJson {
            label: label_for(game, m),
            fen_before: game
                .input
                .plies
                .get(m.ply)
                .map(|p| p.fen_before.as_str())
                .unwrap_or_default(),
            analysis: m,
        })
        .collect();

    let json = AnnotationJson {
        white: game.white.as_deref(),
        black: game.black.as_deref(),
        engine,
        start_fen: game.input.start_fen.as_deref(),
        stopped_early: analysis.stopped_early,
        moves,
        summary: SummaryJson {
            white: SideJson::new(analysis.stats(Color::White)),
            black: SideJson::new(analysis.stats(Color::Black)),
        },
    };

    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pgn::parse_game;
    use chess_analysis::palette::color_of;
    use chess_analysis::{advisory, Evaluation, Rating, SideStats};

    fn analysed(game: &ParsedGame, ratings: &[(Rating, Evaluation)]) -> GameAnalysis {
        let mut stats = SideStats::default();
        let moves = game
            .input
            .plies
            .iter()
            .zip(ratings)
            .enumerate()
            .map(|(i, (ply, (rating, display_eval)))| {
                stats.record(ply.side, *rating);
                MoveAnalysis {
                    ply: i,
                    side: ply.side,
                    played_move: ply.played,
                    san: ply.san.clone(),
                    best_move: None,
                    best_san: None,
                    eval_before: Evaluation::Centipawns(0),
                    eval_after: Evaluation::Centipawns(0),
                    display_eval: *display_eval,
                    depth: 12,
                    rating: *rating,
                    color: color_of(Some(*rating)),
                    best_color: None,
                    advice: advisory(&ply.san, *rating, None),
                }
            })
            .collect();
        GameAnalysis {
            moves,
            stats,
            stopped_early: false,
        }
    }

    #[test]
    fn test_move_label() {
        let start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(move_label(start, Color::White), "1.");
        assert_eq!(move_label("8/8/8/8/8/8/k7/4K3 b - - 3 12", Color::Black), "12...");
        assert_eq!(move_label("garbage", Color::White), "1.");
    }

    #[test]
    fn test_format_accuracy() {
        assert_eq!(format_accuracy(Some(95.8333)), "95.8%");
        assert_eq!(format_accuracy(Some(100.0)), "100.0%");
        assert_eq!(format_accuracy(None), "n/a");
    }

    #[test]
    fn test_write_text_report() {
        let game = parse_game("[White \"Alice\"]\n\n1. e4 e5").unwrap();
        let analysis = analysed(
            &game,
            &[
                (Rating::BestMove, Evaluation::Centipawns(35)),
                (Rating::Good, Evaluation::Centipawns(60)),
            ],
        );

        let mut out = Vec::new();
        write_text(&mut out, &game, &analysis).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("1. e4 is the Best Move [+0.35]"));
        assert!(text.contains("1... e5 is a Good Move [+0.60]"));
        assert!(text.contains("White (Alice) accuracy: 100.0% (1 moves)"));
        assert!(text.contains("Black accuracy: 66.7% (1 moves)"));
        assert!(text.contains("Good Move: 1"));
        assert!(!text.contains("decided"));
    }

    #[test]
    fn test_write_text_without_moves_for_a_side() {
        let game = parse_game("e2e4 e7e5").unwrap();
        let mut analysis = analysed(&game, &[(Rating::Blunder, Evaluation::Mate(0))]);
        analysis.stopped_early = true;

        let mut out = Vec::new();
        write_text(&mut out, &game, &analysis).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("1. e4 is a Blunder [Game Over]"));
        assert!(text.contains("Black accuracy: n/a (0 moves)"));
        assert!(text.contains("decided after 1 of 2 plies"));
    }

    #[test]
    fn test_write_json_creates_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("annotated.json");

        let game = parse_game("[White \"Alice\"]\n[Black \"Bob\"]\n\n1. e4 e5").unwrap();
        let analysis = analysed(
            &game,
            &[
                (Rating::BestMove, Evaluation::Centipawns(35)),
                (Rating::Blunder, Evaluation::Mate(3)),
            ],
        );

        write_json(&json_path, &game, "stockfish", &analysis).expect("Failed to write JSON file");
        let contents = std::fs::read_to_string(&json_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();

        assert_eq!(value["white"], "Alice");
        assert_eq!(value["black"], "Bob");
        assert_eq!(value["engine"], "stockfish");
        assert_eq!(value["stopped_early"], false);
        assert!(value["start_fen"].is_null());

        let moves = value["moves"].as_array().unwrap();
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0]["label"], "1.");
        assert_eq!(moves[0]["played_move"], "e2e4");
        assert_eq!(moves[0]["rating"], "best_move");
        assert_eq!(moves[0]["color"], "#2DFF38");
        assert_eq!(moves[0]["advice"], "e4 is the Best Move");
        assert_eq!(moves[1]["label"], "1...");
        assert_eq!(moves[1]["side"], "black");
        assert_eq!(moves[1]["color"], "#BA0000");
        assert_eq!(moves[1]["display_eval"]["mate"], 3);

        assert_eq!(value["summary"]["white"]["accuracy"], 100.0);
        assert_eq!(value["summary"]["white"]["counts"]["best_move"], 1);
        assert_eq!(value["summary"]["black"]["moves"], 1);
        assert_eq!(value["summary"]["black"]["counts"]["blunder"], 1);
    }

    #[test]
    fn test_write_json_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let game = ParsedGame::default();
        let result = write_json(
            dir.path().join("no/such/dir.json"),
            &game,
            "stockfish",
            &GameAnalysis::default(),
        );
        assert!(result.is_err());
    }
}
