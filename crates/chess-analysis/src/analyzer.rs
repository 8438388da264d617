//! Game analysis with move quality classification.
//!
//! This module provides the [`GameAnalyzer`] for analyzing complete chess games
//! and classifying each move's quality.

use chess_core::{Color, Move};
use thiserror::Error;
use tracing::{debug, info, warn};
use uci::{GoOptions, Position};

use crate::classify::classify;
use crate::engine::{AnalysisEngine, EngineError, EvaluationSource};
use crate::notation::san_or_uci;
use crate::palette::color_of;
use crate::quality::{advisory, GameAnalysis, MoveAnalysis, Rating};
use crate::stats::SideStats;

/// Default time per analysed position, in milliseconds.
pub const DEFAULT_MOVETIME_MS: u64 = 1000;

/// Errors that can occur during game analysis.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Error from the analysis engine.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
    /// The game has no moves to analyse.
    #[error("Game has no moves")]
    NoMoves,
    /// Invalid game data was provided.
    #[error("Invalid game data: {0}")]
    InvalidGame(String),
}

/// One played move, as produced by the game reader.
#[derive(Debug, Clone, PartialEq)]
pub struct PlyInput {
    /// Position before the move.
    pub fen_before: String,
    pub played: Move,
    /// The played move in SAN.
    pub san: String,
    /// Side that played the move.
    pub side: Color,
}

/// An already validated game.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameInput {
    /// Starting FEN; `None` means the standard starting position.
    pub start_fen: Option<String>,
    pub plies: Vec<PlyInput>,
}

/// Configuration for game analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Search limit used for every position.
    pub limit: GoOptions,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            limit: GoOptions::movetime(DEFAULT_MOVETIME_MS),
        }
    }
}

/// Analyzes chess games to classify move quality.
///
/// Positions are evaluated by an [`EvaluationSource`], normally a UCI
/// engine such as Stockfish. Each move is rated by comparing the evaluation
/// before and after it, and the ratings are tallied per side.
pub struct GameAnalyzer<S = AnalysisEngine> {
    source: S,
    config: AnalysisConfig,
}

impl GameAnalyzer<AnalysisEngine> {
    /// Creates a new game analyzer backed by the engine at `engine_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot be initialized.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use chess_analysis::{GameAnalyzer, AnalysisConfig};
    ///
    /// let analyzer = GameAnalyzer::new("stockfish", AnalysisConfig::default())?;
    /// ```
    pub fn new(engine_path: &str, config: AnalysisConfig) -> Result<Self, AnalyzerError> {
        let engine = AnalysisEngine::new(engine_path)?;
        Ok(Self::with_source(engine, config))
    }
}

impl<S: EvaluationSource> GameAnalyzer<S> {
    /// Creates an analyzer over any evaluation source.
    pub fn with_source(source: S, config: AnalysisConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Mutable access to the evaluation source, e.g. to set engine options.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Analyzes a complete chess game.
    ///
    /// The starting position is evaluated first. Then, for each move, the
    /// position after it is evaluated and the move is rated from the
    /// mover's point of view. Analysis ends early once the position after a
    /// move has no legal continuation (checkmate or stalemate).
    ///
    /// # Errors
    ///
    /// - `AnalyzerError::NoMoves` if the game is empty
    /// - `AnalyzerError::InvalidGame` if the sides do not alternate from the
    ///   side to move of the starting position, or the
    ///   starting position has no legal move
    /// - `AnalyzerError::Engine` if the evaluation source fails or returns a
    ///   result without a principal variation where one is required
    pub fn analyze_game(&mut self, game: &GameInput) -> Result<GameAnalysis, AnalyzerError> {
        validate(game)?;
        info!(plies = game.plies.len(), "Analysing game");

        self.source.new_game()?;

        let mut position = Position {
            fen: game.start_fen.clone(),
            moves: Vec::with_capacity(game.plies.len()),
        };
        let start = self.source.analyse(&position, &self.config.limit)?;
        let mut best = start.best_move().ok_or_else(|| {
            AnalyzerError::InvalidGame("starting position has no legal move".to_string())
        })?;
        let mut prior = start.evaluation;

        let mut analysis = GameAnalysis {
            moves: Vec::with_capacity(game.plies.len()),
            stats: SideStats::default(),
            stopped_early: false,
        };

        for (index, ply) in game.plies.iter().enumerate() {
            position.moves.push(ply.played.to_uci());
            let after = self.source.analyse(&position, &self.config.limit)?;

            let posterior = after.evaluation.flip();
            let rating = classify(prior, posterior, ply.played, best);
            analysis.stats.record(ply.side, rating);

            let differs = ply.played != best;
            let best_san = differs.then(|| san_or_uci(&ply.fen_before, best));
            let advice = advisory(&ply.san, rating, best_san.as_deref());
            debug!(
                ply = index,
                side = %ply.side,
                played = %ply.san,
                before = %prior,
                after = %posterior,
                ?rating,
                "Classified move"
            );

            analysis.moves.push(MoveAnalysis {
                ply: index,
                side: ply.side,
                played_move: ply.played,
                san: ply.san.clone(),
                best_move: differs.then_some(best),
                best_san,
                eval_before: prior,
                eval_after: posterior,
                display_eval: after.evaluation.relative_to(ply.side.opposite(), Color::White),
                depth: after.depth,
                rating,
                color: color_of(Some(rating)),
                best_color: differs.then(|| color_of(Some(Rating::BestMove))),
                advice,
            });

            let game_over = after.evaluation.is_checkmate()
                || (!after.evaluation.is_mate() && after.depth == 0);
            if game_over {
                let remaining = game.plies.len() - index - 1;
                if remaining > 0 {
                    warn!(ply = index, remaining, "Game decided, stopping analysis");
                    analysis.stopped_early = true;
                }
                break;
            }

            best = after.best_move().ok_or_else(|| {
                EngineError::InvalidResponse(format!(
                    "no principal variation after ply {}",
                    index
                ))
            })?;
            prior = after.evaluation;
        }

        info!(
            white_accuracy = ?analysis.accuracy(Color::White),
            black_accuracy = ?analysis.accuracy(Color::Black),
            "Analysis complete"
        );
        Ok(analysis)
    }
}

fn validate(game: &GameInput) -> Result<(), AnalyzerError> {
    let Some(first) = game.plies.first() else {
        return Err(AnalyzerError::NoMoves);
    };
    let to_move = match &game.start_fen {
        Some(fen) => Color::side_to_move_of(fen).ok_or_else(|| {
            AnalyzerError::InvalidGame(format!("no side to move in FEN \"{}\"", fen))
        })?,
        None => Color::White,
    };
    if first.side != to_move {
        return Err(AnalyzerError::InvalidGame(format!(
            "{} to move, but the first move is {}'s",
            to_move, first.side
        )));
    }
    for (index, pair) in game.plies.windows(2).enumerate() {
        if pair[1].side == pair[0].side {
            return Err(AnalyzerError::InvalidGame(format!(
                "{} moves twice in a row at ply {}",
                pair[1].side,
                index + 1
            )));
        }
    }
    Ok(())
}
