//! Move quality classification and accuracy scoring for finished chess games.
//!
//! This crate judges every move of a game by comparing the engine evaluation
//! before and after it, and condenses those judgments into a per-side
//! accuracy percentage.
//!
//! # Overview
//!
//! - [`Evaluation`] - Position evaluation (centipawn or mate score)
//! - [`Rating`] - The nine move quality ratings
//! - [`classify`] - Maps an evaluation pair and the played/preferred moves to a rating
//! - [`palette`] - Presentation colours for each rating
//! - [`PlayerStats`] - Per-side rating counts and the accuracy score
//! - [`AnalysisEngine`] - Wrapper for UCI analysis engines like Stockfish
//! - [`GameAnalyzer`] - Drives an [`EvaluationSource`] over a whole game
//!
//! # Example
//!
//! ```ignore
//! use chess_analysis::{AnalysisConfig, GameAnalyzer, GameInput};
//!
//! let mut analyzer = GameAnalyzer::new("stockfish", AnalysisConfig::default())?;
//! let analysis = analyzer.analyze_game(&game)?;
//! for m in &analysis.moves {
//!     println!("{}", m.advice);
//! }
//! println!("White accuracy: {:?}", analysis.accuracy(chess_core::Color::White));
//! ```

pub mod analyzer;
pub mod classify;
pub mod engine;
pub mod evaluation;
pub mod notation;
pub mod palette;
pub mod quality;
pub mod stats;

pub use analyzer::{AnalysisConfig, AnalyzerError, GameAnalyzer, GameInput, PlyInput};
pub use classify::classify;
pub use engine::{AnalysisEngine, EngineError, EvaluationSource, PositionAnalysis};
pub use evaluation::Evaluation;
pub use palette::Rgb;
pub use quality::{advisory, GameAnalysis, MoveAnalysis, Rating, UnknownRating};
pub use stats::{PlayerStats, SideStats};
