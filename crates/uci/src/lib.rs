//! Client side of the UCI (Universal Chess Interface) protocol.
//!
//! This crate formats the commands a GUI sends to an analysis engine and
//! parses the messages the engine answers with.
//!
//! # Commands sent to the engine
//!
//! - `uci` - Initialize engine, get id and options
//! - `isready` / `readyok` - Synchronization
//! - `ucinewgame` - Forget state from a previous game
//! - `setoption name <id> value <x>` - Configure the engine
//! - `position startpos|fen <fen> [moves <move>...]` - Set position
//! - `go [movetime <ms>] [depth <d>]` - Start search
//! - `quit` - Exit
//!
//! # Messages read from the engine
//!
//! - `id name ...`, `uciok`, `readyok`
//! - `info ...` search progress, see [`EngineInfo`]
//! - `bestmove <move>`

mod command;
mod info;

pub use command::{GoOptions, GuiCommand, Position};
pub use info::{EngineInfo, Score, ScoreBound};

/// Messages sent from engine to GUI.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineMessage {
    /// Engine identification (`id name ...`).
    Id { name: String },
    /// UCI initialization complete.
    UciOk,
    /// Engine is ready.
    ReadyOk,
    /// Search information.
    Info(EngineInfo),
    /// Best move found. `mv` is `None` when the engine reports `(none)`,
    /// which it does for positions without a legal move.
    BestMove { mv: Option<String> },
}

impl EngineMessage {
    /// Parse one line of engine output.
    ///
    /// Returns `None` for lines the client has no use for (`option ...`,
    /// `copyprotection`, blank lines, engine banners).
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let mut parts = line.split_whitespace();

        match parts.next()? {
            "id" => match parts.next()? {
                "name" => Some(EngineMessage::Id {
                    name: parts.collect::<Vec<_>>().join(" "),
                }),
                _ => None,
            },
            "uciok" => Some(EngineMessage::UciOk),
            "readyok" => Some(EngineMessage::ReadyOk),
            "info" => EngineInfo::parse(line).map(EngineMessage::Info),
            "bestmove" => {
                let mv = parts.next().filter(|m| *m != "(none)").map(str::to_string);
                Some(EngineMessage::BestMove { mv })
            }
            _ => None,
        }
    }
}
