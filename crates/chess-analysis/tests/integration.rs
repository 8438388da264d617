//! Integration tests for chess-analysis crate.
//!
//! Most tests drive the analyzer with a scripted evaluation source. The
//! tests marked `#[ignore]` require Stockfish to be installed and available
//! in PATH. Run them with: `cargo test -p chess-analysis --test integration -- --ignored`

use std::collections::VecDeque;

use chess_analysis::{
    AnalysisConfig, AnalysisEngine, AnalyzerError, EngineError, Evaluation, EvaluationSource,
    GameAnalyzer, GameInput, PlyInput, PositionAnalysis, Rating,
};
use chess_core::{Color, Move};
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Position as _};
use uci::{GoOptions, Position};

/// Replays canned engine answers in order and records what it was asked.
#[derive(Default)]
struct ScriptedSource {
    answers: VecDeque<PositionAnalysis>,
    asked: Vec<Position>,
    new_games: usize,
}

impl ScriptedSource {
    fn new(answers: Vec<PositionAnalysis>) -> Self {
        Self {
            answers: answers.into(),
            ..Self::default()
        }
    }
}

impl EvaluationSource for ScriptedSource {
    fn new_game(&mut self) -> Result<(), EngineError> {
        self.new_games += 1;
        Ok(())
    }

    fn analyse(
        &mut self,
        position: &Position,
        _limit: &GoOptions,
    ) -> Result<PositionAnalysis, EngineError> {
        self.asked.push(position.clone());
        self.answers
            .pop_front()
            .ok_or_else(|| EngineError::InvalidResponse("script exhausted".to_string()))
    }
}

fn moves(pv: &[&str]) -> Vec<Move> {
    pv.iter().map(|m| Move::from_uci(m).unwrap()).collect()
}

fn cp(score: i32, pv: &[&str]) -> PositionAnalysis {
    PositionAnalysis {
        evaluation: Evaluation::Centipawns(score),
        pv: moves(pv),
        depth: 12,
    }
}

fn mate(plies: i32, pv: &[&str]) -> PositionAnalysis {
    PositionAnalysis {
        evaluation: Evaluation::Mate(plies),
        pv: moves(pv),
        depth: 12,
    }
}

fn game_over(evaluation: Evaluation) -> PositionAnalysis {
    PositionAnalysis {
        evaluation,
        pv: Vec::new(),
        depth: 0,
    }
}

/// Builds a validated game from UCI moves, starting at `start_fen` or the
/// standard position.
fn game(start_fen: Option<&str>, ucis: &[&str]) -> GameInput {
    let mut pos: Chess = match start_fen {
        Some(fen) => fen
            .parse::<Fen>()
            .unwrap()
            .into_position(CastlingMode::Standard)
            .unwrap(),
        None => Chess::default(),
    };

    let mut plies = Vec::new();
    for uci in ucis {
        let m = uci.parse::<UciMove>().unwrap().to_move(&pos).unwrap();
        plies.push(PlyInput {
            fen_before: Fen::from_position(&pos, EnPassantMode::Legal).to_string(),
            played: Move::try_from(&m).unwrap(),
            san: San::from_move(&pos, m).to_string(),
            side: pos.turn().into(),
        });
        pos = pos.play(m).unwrap();
    }

    GameInput {
        start_fen: start_fen.map(str::to_string),
        plies,
    }
}

/// 1.e4 e5 2.Bc4 Nc6 3.Qh5 Nf6 4.Qxf7#
fn scholars_mate() -> (GameInput, ScriptedSource) {
    let input = game(
        None,
        &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"],
    );
    let source = ScriptedSource::new(vec![
        cp(30, &["e2e4", "e7e5"]),
        cp(-30, &["e7e5", "g1f3"]),
        cp(30, &["g1f3", "b8c6"]),
        cp(-20, &["b8c6", "d1h5"]),
        cp(20, &["d1h5", "g7g6"]),
        cp(-60, &["g7g6", "h5f3"]),
        mate(1, &["h5f7"]),
        game_over(Evaluation::Mate(0)),
    ]);
    (input, source)
}

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("accuracy should be defined");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_scholars_mate_ratings() {
    let (input, source) = scholars_mate();
    let mut analyzer = GameAnalyzer::with_source(source, AnalysisConfig::default());
    let analysis = analyzer.analyze_game(&input).unwrap();

    let ratings: Vec<Rating> = analysis.moves.iter().map(|m| m.rating).collect();
    assert_eq!(
        ratings,
        vec![
            Rating::BestMove,
            Rating::BestMove,
            Rating::Excellent,
            Rating::BestMove,
            Rating::BestMove,
            Rating::Blunder,
            Rating::BestMove,
        ]
    );
    assert!(!analysis.stopped_early);

    assert_eq!(analysis.stats(Color::White).total_moves(), 4);
    assert_eq!(analysis.stats(Color::Black).total_moves(), 3);
    assert_close(analysis.accuracy(Color::White), 1150.0 / 1200.0 * 100.0);
    assert_close(analysis.accuracy(Color::Black), 605.0 / 900.0 * 100.0);
}

#[test]
fn test_scholars_mate_advice_and_colors() {
    let (input, source) = scholars_mate();
    let mut analyzer = GameAnalyzer::with_source(source, AnalysisConfig::default());
    let analysis = analyzer.analyze_game(&input).unwrap();

    let bc4 = &analysis.moves[2];
    assert_eq!(bc4.side, Color::White);
    assert_eq!(bc4.best_san.as_deref(), Some("Nf3"));
    assert_eq!(bc4.advice, "Bc4 is an Excellent Move, the Best Move was Nf3");
    assert_eq!(bc4.color.to_string(), "#1B9621");
    assert_eq!(bc4.best_color.map(|c| c.to_string()).as_deref(), Some("#2DFF38"));
    assert_eq!(bc4.eval_before, Evaluation::Centipawns(30));
    assert_eq!(bc4.eval_after, Evaluation::Centipawns(20));

    let nf6 = &analysis.moves[5];
    assert_eq!(nf6.side, Color::Black);
    assert_eq!(nf6.advice, "Nf6 is a Blunder, the Best Move was g6");
    assert_eq!(nf6.eval_after, Evaluation::Mate(-1));
    assert_eq!(nf6.display_eval, Evaluation::Mate(1));
    assert_eq!(nf6.color.to_string(), "#BA0000");

    let qxf7 = &analysis.moves[6];
    assert_eq!(qxf7.advice, "Qxf7 is the Best Move");
    assert_eq!(qxf7.best_move, None);
    assert_eq!(qxf7.best_color, None);
    assert_eq!(qxf7.display_eval.to_string(), "Game Over");
}

#[test]
fn test_positions_sent_to_source() {
    let (input, source) = scholars_mate();
    let mut analyzer = GameAnalyzer::with_source(source, AnalysisConfig::default());
    analyzer.analyze_game(&input).unwrap();
    let source = analyzer.into_source();

    assert_eq!(source.new_games, 1);
    assert_eq!(source.asked.len(), 8);
    assert_eq!(source.asked[0], Position::startpos(Vec::new()));
    assert_eq!(source.asked[0].to_uci(), "position startpos");
    assert_eq!(
        source.asked[3].to_uci(),
        "position startpos moves e2e4 e7e5 f1c4"
    );
    assert!(source.answers.is_empty());
}

#[test]
fn test_stops_when_game_is_decided() {
    let input = game(None, &["e2e4", "e7e5", "g1f3"]);
    let source = ScriptedSource::new(vec![
        cp(30, &["e2e4"]),
        game_over(Evaluation::Mate(0)),
    ]);
    let mut analyzer = GameAnalyzer::with_source(source, AnalysisConfig::default());
    let analysis = analyzer.analyze_game(&input).unwrap();

    assert_eq!(analysis.moves.len(), 1);
    assert!(analysis.stopped_early);
    assert_eq!(analysis.accuracy(Color::Black), None);
    assert_eq!(analyzer.into_source().asked.len(), 2);
}

#[test]
fn test_stops_on_stalemate() {
    let input = game(None, &["e2e4", "e7e5"]);
    let source = ScriptedSource::new(vec![
        cp(30, &["e2e4"]),
        game_over(Evaluation::Centipawns(0)),
    ]);
    let mut analyzer = GameAnalyzer::with_source(source, AnalysisConfig::default());
    let analysis = analyzer.analyze_game(&input).unwrap();

    assert_eq!(analysis.moves.len(), 1);
    assert!(analysis.stopped_early);
}

#[test]
fn test_empty_game_is_rejected() {
    let mut analyzer =
        GameAnalyzer::with_source(ScriptedSource::default(), AnalysisConfig::default());
    let err = analyzer.analyze_game(&GameInput::default()).unwrap_err();
    assert!(matches!(err, AnalyzerError::NoMoves));

    let source = analyzer.into_source();
    assert!(source.asked.is_empty());
    assert_eq!(source.new_games, 0);
}

#[test]
fn test_missing_pv_is_an_error() {
    let input = game(None, &["e2e4", "e7e5"]);
    let source = ScriptedSource::new(vec![cp(30, &["e2e4"]), cp(-30, &[])]);
    let mut analyzer = GameAnalyzer::with_source(source, AnalysisConfig::default());
    let err = analyzer.analyze_game(&input).unwrap_err();
    assert!(matches!(
        err,
        AnalyzerError::Engine(EngineError::InvalidResponse(_))
    ));
}

#[test]
fn test_start_position_without_moves_is_invalid() {
    let input = game(None, &["e2e4"]);
    let source = ScriptedSource::new(vec![game_over(Evaluation::Mate(0))]);
    let mut analyzer = GameAnalyzer::with_source(source, AnalysisConfig::default());
    let err = analyzer.analyze_game(&input).unwrap_err();
    assert!(matches!(err, AnalyzerError::InvalidGame(_)));
}

#[test]
fn test_engine_failure_propagates() {
    let input = game(None, &["e2e4", "e7e5"]);
    let source = ScriptedSource::new(vec![cp(30, &["e2e4"])]);
    let mut analyzer = GameAnalyzer::with_source(source, AnalysisConfig::default());
    let err = analyzer.analyze_game(&input).unwrap_err();
    assert!(err.to_string().contains("script exhausted"));
}

#[test]
fn test_delivering_mate_from_custom_position() {
    // Black to move; ...Qh4# ends the game. A delivered mate scores zero
    // plies, so a move the engine did not pick is rated as a blunder.
    let start = "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2";
    let input = game(Some(start), &["d8h4"]);
    let source = ScriptedSource::new(vec![
        cp(300, &["b8c6"]),
        game_over(Evaluation::Mate(0)),
    ]);
    let mut analyzer = GameAnalyzer::with_source(source, AnalysisConfig::default());
    let analysis = analyzer.analyze_game(&input).unwrap();
    let source = analyzer.into_source();

    assert_eq!(source.asked[0].fen.as_deref(), Some(start));
    assert_eq!(source.asked[1].to_uci(), format!("position fen {} moves d8h4", start));

    let qh4 = &analysis.moves[0];
    assert_eq!(qh4.side, Color::Black);
    assert_eq!(qh4.san, "Qh4");
    assert_eq!(qh4.rating, Rating::Blunder);
    assert_eq!(qh4.best_san.as_deref(), Some("Nc6"));
    assert_eq!(analysis.stats(Color::Black).count(Rating::Blunder), 1);
    assert_eq!(analysis.accuracy(Color::White), None);
}

#[test]
fn test_great_move_when_mate_appears() {
    let input = game(None, &["e2e4", "e7e5"]);
    let source = ScriptedSource::new(vec![
        cp(30, &["d2d4"]),
        mate(-5, &["e7e5"]),
        cp(-800, &["g1f3"]),
    ]);
    let mut analyzer = GameAnalyzer::with_source(source, AnalysisConfig::default());
    let analysis = analyzer.analyze_game(&input).unwrap();

    assert_eq!(analysis.moves[0].rating, Rating::GreatMove);
    assert_eq!(
        analysis.moves[0].advice,
        "e4 is a Great Move, the Best Move was d4"
    );
    assert_eq!(analysis.moves[0].color.to_string(), "#0094FF");
    assert_eq!(analysis.moves[1].rating, Rating::Miss);
}

/// Check if Stockfish is available in PATH.
fn stockfish_available() -> bool {
    std::process::Command::new("stockfish")
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .is_ok()
}

#[test]
#[ignore = "requires Stockfish"]
fn test_engine_basic_analysis() {
    if !stockfish_available() {
        eprintln!("Skipping test: Stockfish not available");
        return;
    }

    let mut engine = AnalysisEngine::new("stockfish").expect("Failed to create AnalysisEngine");
    let name = engine.name();
    assert!(
        name.to_lowercase().contains("stockfish"),
        "Engine name should contain 'Stockfish', got: {}",
        name
    );

    engine.new_game().expect("ucinewgame failed");
    let analysis = engine
        .analyse(&Position::startpos(Vec::new()), &GoOptions::depth(10))
        .expect("Failed to analyze starting position");

    assert!(analysis.best_move().is_some(), "Best move should be present");
    assert!(
        analysis.depth >= 10,
        "Search depth should be at least 10, got: {}",
        analysis.depth
    );
}

#[test]
#[ignore = "requires Stockfish"]
fn test_scholars_mate_with_stockfish() {
    if !stockfish_available() {
        eprintln!("Skipping test: Stockfish not available");
        return;
    }

    let input = game(
        None,
        &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"],
    );
    let config = AnalysisConfig {
        limit: GoOptions::depth(12),
    };
    let mut analyzer = GameAnalyzer::new("stockfish", config).expect("Failed to create analyzer");
    let analysis = analyzer.analyze_game(&input).expect("Analysis failed");

    assert_eq!(analysis.moves.len(), 7);
    let nf6 = &analysis.moves[5];
    assert_eq!(nf6.rating, Rating::Blunder, "Nf6?? allows mate: {:?}", nf6);
    let qxf7 = &analysis.moves[6];
    assert_eq!(qxf7.rating, Rating::BestMove);
    assert!(qxf7.display_eval.is_checkmate());
}
