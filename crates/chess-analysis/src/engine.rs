//! UCI engine wrapper for position analysis.

use crate::Evaluation;
use chess_core::Move;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use thiserror::Error;
use tracing::{debug, info, trace};
use uci::{EngineInfo, EngineMessage, GoOptions, GuiCommand, Position};

/// Maximum number of lines to read before giving up on a handshake response.
pub const MAX_UCI_LINES: usize = 1000;

/// Maximum number of lines to read before giving up on a `bestmove`.
pub const MAX_SEARCH_LINES: usize = 20_000;

/// Errors that can occur when working with chess engines.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to spawn the engine process.
    #[error("Failed to spawn engine: {0}")]
    SpawnError(#[from] std::io::Error),
    /// Engine executable was not found at the specified path.
    #[error("Engine not found at path: {0}")]
    NotFound(String),
    /// Engine failed to initialize properly (UCI handshake failed).
    #[error("Engine initialization failed")]
    InitFailed,
    /// Engine returned an invalid or unexpected response.
    #[error("Invalid engine response: {0}")]
    InvalidResponse(String),
}

/// Result of analyzing a chess position.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionAnalysis {
    /// Evaluation from the point of view of the side to move.
    pub evaluation: Evaluation,
    /// Principal variation, starting with the engine's preferred move.
    /// Empty when the side to move has no legal move.
    pub pv: Vec<Move>,
    /// The search depth reached.
    pub depth: u32,
}

impl PositionAnalysis {
    /// The engine's preferred move, if the position has one.
    pub fn best_move(&self) -> Option<Move> {
        self.pv.first().copied()
    }
}

/// Anything that can evaluate positions for the game analyzer.
///
/// [`AnalysisEngine`] is the production implementation. Tests drive the
/// analyzer with scripted sources.
pub trait EvaluationSource {
    /// Resets any per-game state before a new game is analysed.
    fn new_game(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    /// Evaluates `position` within `limit`.
    fn analyse(
        &mut self,
        position: &Position,
        limit: &GoOptions,
    ) -> Result<PositionAnalysis, EngineError>;
}

/// Wrapper for UCI-compatible analysis engines like Stockfish.
///
/// The process is asked to quit when the wrapper is dropped.
pub struct AnalysisEngine {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    /// The engine's name (reported via UCI id).
    name: String,
}

impl AnalysisEngine {
    /// Spawns the engine and performs the UCI handshake.
    ///
    /// `engine_path` may be a path or a program name looked up on `PATH`.
    ///
    /// # Errors
    ///
    /// - `EngineError::NotFound` if the executable cannot be found
    /// - `EngineError::SpawnError` if the engine process fails to start
    /// - `EngineError::InitFailed` if UCI initialization fails
    pub fn new(engine_path: &str) -> Result<Self, EngineError> {
        let mut process = Command::new(engine_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => EngineError::NotFound(engine_path.to_string()),
                _ => EngineError::SpawnError(e),
            })?;

        let stdin = process.stdin.take().ok_or(EngineError::InitFailed)?;
        let stdout = process.stdout.take().ok_or(EngineError::InitFailed)?;

        let mut engine = Self {
            process,
            stdin,
            stdout: BufReader::new(stdout),
            name: String::new(),
        };
        engine.init_uci()?;
        info!(engine = %engine.name, "Engine ready");

        Ok(engine)
    }

    fn init_uci(&mut self) -> Result<(), EngineError> {
        self.send(&GuiCommand::Uci)?;

        let mut name = None;
        let mut lines_read = 0;
        loop {
            if lines_read > MAX_UCI_LINES {
                return Err(EngineError::InitFailed);
            }
            lines_read += 1;
            match EngineMessage::parse(&self.read_line()?) {
                Some(EngineMessage::Id { name: n }) => name = Some(n),
                Some(EngineMessage::UciOk) => break,
                _ => {}
            }
        }
        self.name = name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Unknown Engine".to_string());

        self.sync()
    }

    /// Sends `isready` and waits for `readyok`.
    fn sync(&mut self) -> Result<(), EngineError> {
        self.send(&GuiCommand::IsReady)?;
        let mut lines_read = 0;
        loop {
            if lines_read > MAX_UCI_LINES {
                return Err(EngineError::InitFailed);
            }
            lines_read += 1;
            if let Some(EngineMessage::ReadyOk) = EngineMessage::parse(&self.read_line()?) {
                return Ok(());
            }
        }
    }

    /// Returns the engine's name as reported via UCI protocol.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets an engine option such as `Threads` or `Hash`.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), EngineError> {
        self.send(&GuiCommand::SetOption {
            name: name.to_string(),
            value: value.to_string(),
        })?;
        self.sync()
    }

    /// Asks the engine to exit and waits for the process to finish.
    pub fn quit(mut self) -> Result<(), EngineError> {
        self.send(&GuiCommand::Quit)?;
        self.process.wait()?;
        Ok(())
    }

    fn run_analysis(&mut self) -> Result<PositionAnalysis, EngineError> {
        let mut latest: Option<EngineInfo> = None;

        for _ in 0..MAX_SEARCH_LINES {
            match EngineMessage::parse(&self.read_line()?) {
                Some(EngineMessage::Info(info))
                    if is_primary_score(&info) && reaches(&info, latest.as_ref()) =>
                {
                    latest = Some(info);
                }
                Some(EngineMessage::BestMove { mv }) => {
                    return finish_search(latest, mv.as_deref());
                }
                _ => {}
            }
        }

        Err(EngineError::InvalidResponse(
            "Too many lines without bestmove".to_string(),
        ))
    }

    fn send(&mut self, command: &GuiCommand) -> Result<(), EngineError> {
        let line = command.to_uci();
        debug!(cmd = %line, "engine <");
        writeln!(self.stdin, "{}", line)?;
        self.stdin.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, EngineError> {
        let mut line = String::new();
        let bytes = self.stdout.read_line(&mut line)?;
        if bytes == 0 {
            return Err(EngineError::InvalidResponse(
                "Engine closed unexpectedly".to_string(),
            ));
        }
        let line = line.trim().to_string();
        trace!(line = %line, "engine >");
        Ok(line)
    }
}

impl EvaluationSource for AnalysisEngine {
    fn new_game(&mut self) -> Result<(), EngineError> {
        self.send(&GuiCommand::UciNewGame)?;
        self.sync()
    }

    fn analyse(
        &mut self,
        position: &Position,
        limit: &GoOptions,
    ) -> Result<PositionAnalysis, EngineError> {
        self.send(&GuiCommand::Position(position.clone()))?;
        self.send(&GuiCommand::Go(limit.clone()))?;
        self.run_analysis()
    }
}

impl Drop for AnalysisEngine {
    fn drop(&mut self) {
        let _ = self.send(&GuiCommand::Quit);
        let _ = self.process.wait();
    }
}

/// Exact scores of the first principal variation only.
fn is_primary_score(info: &EngineInfo) -> bool {
    info.is_scored() && info.multipv.map_or(true, |n| n == 1)
}

/// Whether `info` searched at least as deep as the line kept so far.
fn reaches(info: &EngineInfo, kept: Option<&EngineInfo>) -> bool {
    kept.map_or(true, |kept| info.depth >= kept.depth)
}

/// Combines the deepest scored info line with the `bestmove` answer.
///
/// A `bestmove (none)` answer means the side to move has no legal move;
/// the result then carries depth 0 and an empty PV so callers can tell
/// the game is over.
fn finish_search(
    latest: Option<EngineInfo>,
    best_move: Option<&str>,
) -> Result<PositionAnalysis, EngineError> {
    let info = latest
        .ok_or_else(|| EngineError::InvalidResponse("No score before bestmove".to_string()))?;
    let score = info
        .score
        .ok_or_else(|| EngineError::InvalidResponse("No score before bestmove".to_string()))?;
    let evaluation = Evaluation::from(score);

    let Some(best_move) = best_move else {
        return Ok(PositionAnalysis {
            evaluation,
            pv: Vec::new(),
            depth: 0,
        });
    };

    let best = parse_move(best_move)?;
    let mut pv = info
        .pv
        .iter()
        .map(|m| parse_move(m))
        .collect::<Result<Vec<_>, _>>()?;
    if pv.first() != Some(&best) {
        pv = vec![best];
    }

    Ok(PositionAnalysis {
        evaluation,
        pv,
        depth: info.depth.unwrap_or(0),
    })
}

fn parse_move(uci: &str) -> Result<Move, EngineError> {
    Move::from_uci(uci)
        .ok_or_else(|| EngineError::InvalidResponse(format!("Invalid move from engine: {}", uci)))
}
