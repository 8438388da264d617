//! Chess Annotate - rate every move of a recorded game with a UCI engine.
//!
//! # Modules
//!
//! - [`config`] - `annotate.toml` loading and command-line overrides
//! - [`pgn`] - PGN / move list reading into analyzer input
//! - [`report`] - Text report and JSON annotation file

pub mod config;
pub mod pgn;
pub mod report;
