//! Standard algebraic notation for engine moves.

use chess_core::Move;
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Position};

/// Renders `mv` in SAN, including the `+`/`#` suffix, for the position `fen`.
///
/// Returns `None` if the FEN is invalid or the move is illegal there.
pub fn san(fen: &str, mv: Move) -> Option<String> {
    let pos: Chess = fen
        .parse::<Fen>()
        .ok()?
        .into_position(CastlingMode::Standard)
        .ok()?;
    let m = <UciMove as From<Move>>::from(mv).to_move(&pos).ok()?;

    let mut text = San::from_move(&pos, m).to_string();
    let after = pos.play(m).ok()?;
    if after.is_checkmate() {
        text.push('#');
    } else if after.is_check() {
        text.push('+');
    }
    Some(text)
}

/// SAN for `mv`, falling back to its UCI form when it cannot be rendered.
pub fn san_or_uci(fen: &str, mv: Move) -> String {
    san(fen, mv).unwrap_or_else(|| mv.to_uci())
}
