//! Game record reading.
//!
//! Accepts a PGN game or a bare list of SAN/UCI moves. Headers other than
//! `White`, `Black` and `FEN` are ignored, as are comments, variations,
//! NAGs, move numbers and result tokens. Only the first game of a file is
//! read. Every move is checked for legality as it is replayed.

use chess_analysis::{GameInput, PlyInput};
use regex::Regex;
use shakmaty::fen::Fen;
use shakmaty::san::{San, SanPlus};
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Position};
use thiserror::Error;

/// Errors that can occur while reading a game record.
#[derive(Error, Debug)]
pub enum PgnError {
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
    /// The `FEN` header does not describe a legal position.
    #[error("Invalid FEN \"{fen}\": {reason}")]
    InvalidFen { fen: String, reason: String },
    /// A move token could not be read or is illegal in its position.
    #[error("Illegal or unreadable move \"{token}\" at ply {ply}")]
    IllegalMove { token: String, ply: usize },
}

/// A game record ready for analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedGame {
    pub white: Option<String>,
    pub black: Option<String>,
    pub input: GameInput,
}

/// Reads a PGN game or a bare move list.
pub fn parse_game(text: &str) -> Result<ParsedGame, PgnError> {
    let header_re = Regex::new(r#"\[(\w+)\s+"([^"]*)"\]"#)?;
    let text = first_game(text);

    let mut game = ParsedGame::default();
    for cap in header_re.captures_iter(text) {
        let value = cap[2].to_string();
        match &cap[1] {
            "White" => game.white = Some(value),
            "Black" => game.black = Some(value),
            "FEN" => game.input.start_fen = Some(value),
            _ => {}
        }
    }

    let mut pos = match &game.input.start_fen {
        Some(fen) => start_position(fen)?,
        None => Chess::default(),
    };

    for (ply, token) in move_tokens(text)?.into_iter().enumerate() {
        let illegal = || PgnError::IllegalMove {
            token: token.clone(),
            ply,
        };
        let m = resolve(&token, &pos).ok_or_else(illegal)?;

        let fen_before = Fen::from_position(&pos, EnPassantMode::Legal).to_string();
        let played = chess_core::Move::try_from(&m).map_err(|_| illegal())?;
        let side = pos.turn().into();

        let mut san = San::from_move(&pos, m).to_string();
        pos = pos.play(m).map_err(|_| illegal())?;
        if pos.is_checkmate() {
            san.push('#');
        } else if pos.is_check() {
            san.push('+');
        }

        game.input.plies.push(PlyInput {
            fen_before,
            played,
            san,
            side,
        });
    }

    Ok(game)
}

fn start_position(fen: &str) -> Result<Chess, PgnError> {
    let invalid = |reason: String| PgnError::InvalidFen {
        fen: fen.to_string(),
        reason,
    };
    fen.parse::<Fen>()
        .map_err(|e| invalid(e.to_string()))?
        .into_position(CastlingMode::Standard)
        .map_err(|e| invalid(e.to_string()))
}

/// The text of the first game: its headers and movetext, up to the next
/// header block.
fn first_game(text: &str) -> &str {
    let mut in_movetext = false;
    let mut in_comment = false;
    let mut end = 0;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        if !in_comment && trimmed.starts_with('[') {
            if in_movetext {
                return &text[..end];
            }
        } else if !trimmed.is_empty() {
            in_movetext = true;
            for c in line.chars() {
                match c {
                    '{' => in_comment = true,
                    '}' => in_comment = false,
                    _ => {}
                }
            }
        }
        end += line.len();
    }
    text
}

/// Strips everything that is not a move and returns the move tokens in order,
/// stopping at the game result.
fn move_tokens(text: &str) -> Result<Vec<String>, PgnError> {
    let header_re = Regex::new(r"\[[^\]]*\]")?;
    let comment_re = Regex::new(r"\{[^}]*\}|;[^\n]*")?;
    let variation_re = Regex::new(r"\([^()]*\)")?;
    let nag_re = Regex::new(r"\$\d+")?;
    let number_re = Regex::new(r"^\d+\.+")?;

    let text = header_re.replace_all(text, " ");
    let mut text = comment_re.replace_all(&text, " ").into_owned();
    // Innermost variations first so nested ones unwind.
    while variation_re.is_match(&text) {
        text = variation_re.replace_all(&text, " ").into_owned();
    }
    let text = nag_re.replace_all(&text, " ");

    Ok(text
        .split_whitespace()
        .map(|t| number_re.replace(t, "").into_owned())
        .filter(|t| !t.is_empty())
        .take_while(|t| !is_result(t))
        .collect())
}

fn is_result(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

/// Interprets a token as a UCI move, then as SAN.
fn resolve(token: &str, pos: &Chess) -> Option<shakmaty::Move> {
    if let Some(m) = token
        .parse::<UciMove>()
        .ok()
        .and_then(|uci| uci.to_move(pos).ok())
    {
        return Some(m);
    }

    let token = token.trim_end_matches(['!', '?']);
    let token = if token.starts_with("0-0") {
        token.replace('0', "O")
    } else {
        token.to_string()
    };
    token.parse::<SanPlus>().ok()?.san.to_move(pos).ok()
}
