//! Position codec: the rules-engine contract the board core consumes.
//!
//! Everything rules-related (check, castling, en passant) is answered by
//! cozy-chess. Moves cross this boundary in the standard user form; the
//! engine's internal castling encoding never leaks out.

use cozy_chess::{Move, Piece, Rank, Square};

use crate::fen::FenError;
use crate::moves::{CompleteMove, DraftMove};
use crate::position::Position;
use crate::san::format_san;
use crate::types::PieceColor;
use crate::uci::to_standard_move;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Illegal move: {0}")]
    IllegalMove(CompleteMove),
    #[error("FEN parse error: {0}")]
    Fen(#[from] FenError),
}

/// Rules-engine capability used by the move resolver.
pub trait Codec {
    fn parse(&self, serialized: &str) -> Result<Position, FenError>;

    fn serialize(&self, position: &Position) -> String;

    /// Distinct destination squares of legal moves starting on `from`.
    fn legal_destinations(&self, position: &Position, from: Square) -> Vec<Square>;

    fn is_legal(&self, position: &Position, mv: CompleteMove) -> bool;

    /// Play `mv`. Fails if the move is not legal in `position`.
    fn apply(&self, position: &Position, mv: CompleteMove) -> Result<Position, CodecError>;

    /// A pawn move to its last rank, to a square the pawn can legally reach.
    fn is_promotion_eligible(&self, position: &Position, mv: DraftMove) -> bool;

    /// Standard algebraic notation for a legal move, for display.
    fn san(&self, position: &Position, mv: CompleteMove) -> Option<String>;
}

/// The codec backed by cozy-chess.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCodec;

impl StandardCodec {
    /// Legal moves paired with their engine encoding.
    fn legal_moves(&self, position: &Position) -> Vec<(CompleteMove, Move)> {
        let board = position.board();
        let mut moves = Vec::new();
        board.generate_moves(|mvs| {
            moves.extend(mvs.into_iter().map(|mv| (to_standard_move(board, mv), mv)));
            false
        });
        moves
    }

    fn find_native(&self, position: &Position, mv: CompleteMove) -> Option<Move> {
        self.legal_moves(position)
            .into_iter()
            .find(|(standard, _)| *standard == mv)
            .map(|(_, native)| native)
    }

    /// All legal moves of the side to move, in standard form.
    pub fn moves(&self, position: &Position) -> Vec<CompleteMove> {
        self.legal_moves(position)
            .into_iter()
            .map(|(standard, _)| standard)
            .collect()
    }
}

impl Codec for StandardCodec {
    fn parse(&self, serialized: &str) -> Result<Position, FenError> {
        Position::from_fen(serialized)
    }

    fn serialize(&self, position: &Position) -> String {
        position.fen().to_string()
    }

    fn legal_destinations(&self, position: &Position, from: Square) -> Vec<Square> {
        let mut destinations: Vec<Square> = Vec::new();
        for (mv, _) in self.legal_moves(position) {
            if mv.from == from && !destinations.contains(&mv.to) {
                destinations.push(mv.to);
            }
        }
        destinations
    }

    fn is_legal(&self, position: &Position, mv: CompleteMove) -> bool {
        self.find_native(position, mv).is_some()
    }

    fn apply(&self, position: &Position, mv: CompleteMove) -> Result<Position, CodecError> {
        let native = self
            .find_native(position, mv)
            .ok_or(CodecError::IllegalMove(mv))?;

        let mut board = position.board().clone();
        board.play_unchecked(native);
        Ok(Position::from_board(board))
    }

    fn is_promotion_eligible(&self, position: &Position, mv: DraftMove) -> bool {
        let board = position.board();
        if board.piece_on(mv.from) != Some(Piece::Pawn) {
            return false;
        }

        let last_rank = match board.color_on(mv.from).map(PieceColor::from) {
            Some(PieceColor::White) => Rank::Eighth,
            Some(PieceColor::Black) => Rank::First,
            None => return false,
        };
        if mv.to.rank() != last_rank {
            return false;
        }

        self.legal_destinations(position, mv.from).contains(&mv.to)
    }

    fn san(&self, position: &Position, mv: CompleteMove) -> Option<String> {
        let legal = self.legal_moves(position);
        let native = legal
            .iter()
            .find(|(standard, _)| *standard == mv)
            .map(|(_, native)| *native)?;
        Some(format_san(position.board(), native, &legal))
    }
}
