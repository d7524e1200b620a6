use cozy_chess::Board;

pub const STANDARD_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse a FEN string into a Board
pub fn parse_fen(fen: &str) -> Result<Board, FenError> {
    let fen = fen.trim();
    let fields = fen.split_whitespace().count();
    if fields == 0 {
        return Err(FenError::Empty);
    }
    if fields != 6 {
        return Err(FenError::FieldCount(fields));
    }

    fen.parse().map_err(|_| FenError::InvalidFormat(fen.to_string()))
}

/// Format a Board as a FEN string
pub fn format_fen(board: &Board) -> String {
    board.to_string()
}

/// The first four FEN fields: placement, side to move, castling, en passant.
///
/// Two positions reached by different move orders share a key even when
/// their move counters differ.
pub fn position_key(fen: &str) -> String {
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("Empty FEN string")]
    Empty,
    #[error("Expected 6 FEN fields, found {0}")]
    FieldCount(usize),
    #[error("Invalid FEN: {0}")]
    InvalidFormat(String),
}
