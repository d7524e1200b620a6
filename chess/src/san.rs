use cozy_chess::{BitBoard, Board, GameStatus, Move, Piece};

use crate::converters::{format_file, format_rank, format_square};
use crate::moves::CompleteMove;
use crate::types::PieceKind;
use crate::uci::to_standard_move;

/// Format a legal move as SAN.
///
/// `legal` is every legal move of the position (standard form paired with
/// the engine move), used for disambiguation.
pub(crate) fn format_san(board: &Board, mv: Move, legal: &[(CompleteMove, Move)]) -> String {
    let piece = match board.piece_on(mv.from) {
        Some(piece) => piece,
        None => return to_standard_move(board, mv).to_string(),
    };
    let standard = to_standard_move(board, mv);

    let mut san = if piece == Piece::King && standard.to != mv.to {
        if (standard.to.file() as u8) > (mv.from.file() as u8) {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        }
    } else {
        body(board, mv, piece, legal)
    };

    let mut after = board.clone();
    after.play_unchecked(mv);
    if after.status() == GameStatus::Won {
        san.push('#');
    } else if after.checkers() != BitBoard::EMPTY {
        san.push('+');
    }

    san
}

fn body(board: &Board, mv: Move, piece: Piece, legal: &[(CompleteMove, Move)]) -> String {
    let mut san = String::new();
    let is_capture = board.color_on(mv.to).is_some()
        || (piece == Piece::Pawn && mv.from.file() != mv.to.file());

    if piece == Piece::Pawn {
        if is_capture {
            san.push(format_file(mv.from.file()));
        }
    } else {
        san.push(PieceKind::from(piece).to_char_upper());

        let rivals: Vec<Move> = legal
            .iter()
            .map(|(_, native)| *native)
            .filter(|other| {
                other.to == mv.to
                    && other.from != mv.from
                    && board.piece_on(other.from) == Some(piece)
            })
            .collect();

        if !rivals.is_empty() {
            let file_unique = rivals.iter().all(|o| o.from.file() != mv.from.file());
            let rank_unique = rivals.iter().all(|o| o.from.rank() != mv.from.rank());
            if file_unique {
                san.push(format_file(mv.from.file()));
            } else if rank_unique {
                san.push(format_rank(mv.from.rank()));
            } else {
                san.push_str(&format_square(mv.from));
            }
        }
    }

    if is_capture {
        san.push('x');
    }
    san.push_str(&format_square(mv.to));

    if let Some(promo) = mv.promotion {
        san.push('=');
        san.push(PieceKind::from(promo).to_char_upper());
    }

    san
}
