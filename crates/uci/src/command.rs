//! UCI command formatting.

/// Commands sent from GUI to engine.
#[derive(Debug, Clone, PartialEq)]
pub enum GuiCommand {
    /// Initialize UCI mode.
    Uci,
    /// Check if engine is ready.
    IsReady,
    /// The next positions belong to a different game.
    UciNewGame,
    /// Set an engine option.
    SetOption { name: String, value: String },
    /// Set up position.
    Position(Position),
    /// Start calculating.
    Go(GoOptions),
    /// Quit the engine.
    Quit,
}

impl GuiCommand {
    /// Format the command as a single UCI line (without newline).
    pub fn to_uci(&self) -> String {
        match self {
            GuiCommand::Uci => "uci".to_string(),
            GuiCommand::IsReady => "isready".to_string(),
            GuiCommand::UciNewGame => "ucinewgame".to_string(),
            GuiCommand::SetOption { name, value } => {
                format!("setoption name {} value {}", name, value)
            }
            GuiCommand::Position(position) => position.to_uci(),
            GuiCommand::Go(opts) => opts.to_uci(),
            GuiCommand::Quit => "quit".to_string(),
        }
    }
}

/// A position given as a start position plus the moves played from it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Position {
    /// Starting FEN; `None` means the standard starting position.
    pub fen: Option<String>,
    /// Moves in UCI notation played from the starting position.
    pub moves: Vec<String>,
}

impl Position {
    /// The standard starting position with the given moves applied.
    pub fn startpos(moves: Vec<String>) -> Self {
        Self { fen: None, moves }
    }

    /// Format as a `position` command.
    pub fn to_uci(&self) -> String {
        let mut cmd = match &self.fen {
            Some(fen) => format!("position fen {}", fen),
            None => "position startpos".to_string(),
        };
        if !self.moves.is_empty() {
            cmd.push_str(" moves ");
            cmd.push_str(&self.moves.join(" "));
        }
        cmd
    }
}

/// Options for the `go` command.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GoOptions {
    /// Search for exactly this time in milliseconds.
    pub movetime: Option<u64>,
    /// Search to this depth.
    pub depth: Option<u32>,
}

impl GoOptions {
    /// Fixed thinking time per position.
    pub fn movetime(ms: u64) -> Self {
        Self {
            movetime: Some(ms),
            ..Self::default()
        }
    }

    /// Fixed search depth per position.
    pub fn depth(depth: u32) -> Self {
        Self {
            depth: Some(depth),
            ..Self::default()
        }
    }

    /// Format as a `go` command.
    pub fn to_uci(&self) -> String {
        let mut parts = vec!["go".to_string()];
        if let Some(ms) = self.movetime {
            parts.push(format!("movetime {}", ms));
        }
        if let Some(d) = self.depth {
            parts.push(format!("depth {}", d));
        }
        parts.join(" ")
    }
}
