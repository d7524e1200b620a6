//! UCI (Universal Chess Interface) utilities

use cozy_chess::{Board, File, Move, Piece, Square};

use crate::converters::parse_square;
use crate::moves::CompleteMove;
use crate::types::PieceKind;

/// Convert a rules-engine move into the form a user would enter.
///
/// cozy_chess encodes castling as king-to-rook (e1h1, e1a1); users and UCI
/// use the king's landing square (e1g1, e1c1). All other moves pass through.
pub fn to_standard_move(board: &Board, mv: Move) -> CompleteMove {
    let is_castle = board.piece_on(mv.from) == Some(Piece::King)
        && board.color_on(mv.to) == board.color_on(mv.from);

    if is_castle {
        let king_file = if (mv.to.file() as u8) > (mv.from.file() as u8) {
            File::G
        } else {
            File::C
        };
        return CompleteMove::new(mv.from, Square::new(king_file, mv.from.rank()), None);
    }

    CompleteMove::new(mv.from, mv.to, mv.promotion.map(PieceKind::from))
}

/// Format a move in UCI notation (e.g., "e2e4", "e7e8q")
pub fn format_uci_move(mv: CompleteMove) -> String {
    mv.to_string()
}

/// Parse UCI notation ("e2e4", "e7e8q"). Castling is expected in the
/// standard king-two-squares form.
pub fn parse_uci_move(s: &str) -> Option<CompleteMove> {
    let s = s.trim();
    if !s.is_ascii() || !(4..=5).contains(&s.len()) {
        return None;
    }

    let from = parse_square(&s[0..2])?;
    let to = parse_square(&s[2..4])?;
    let promotion = match s[4..].chars().next() {
        Some(c) => Some(PieceKind::from_char(c).filter(|k| k.is_promotion_role())?),
        None => None,
    };

    Some(CompleteMove::new(from, to, promotion))
}
