use cozy_chess::{Board, GameStatus, Square};

use crate::fen::{format_fen, parse_fen, position_key, FenError};
use crate::types::{PieceColor, PieceKind};

/// Immutable snapshot of a board state.
///
/// The FEN is computed once at construction and is the identity of the
/// position: equality and hashing go through it.
#[derive(Debug, Clone)]
pub struct Position {
    board: Board,
    fen: String,
}

/// Outcome of the position for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionStatus {
    Ongoing,
    /// The side to move is checkmated.
    Checkmate,
    /// Stalemate or another rules draw detected by the engine.
    Drawn,
}

impl Position {
    /// The standard starting position.
    pub fn initial() -> Self {
        Self::from_board(Board::default())
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen).map(Self::from_board)
    }

    pub(crate) fn from_board(board: Board) -> Self {
        let fen = format_fen(&board);
        Self { board, fen }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fen(&self) -> &str {
        &self.fen
    }

    /// FEN without the move counters, used to key statistics.
    pub fn key(&self) -> String {
        position_key(&self.fen)
    }

    pub fn side_to_move(&self) -> PieceColor {
        self.board.side_to_move().into()
    }

    pub fn piece_at(&self, square: Square) -> Option<(PieceKind, PieceColor)> {
        let piece = self.board.piece_on(square)?;
        let color = self.board.color_on(square)?;
        Some((piece.into(), color.into()))
    }

    /// True if `square` holds a piece belonging to the side to move.
    pub fn has_own_piece(&self, square: Square) -> bool {
        self.board.color_on(square) == Some(self.board.side_to_move())
    }

    pub fn in_check(&self) -> bool {
        self.board.checkers() != cozy_chess::BitBoard::EMPTY
    }

    pub fn status(&self) -> PositionStatus {
        match self.board.status() {
            GameStatus::Ongoing => PositionStatus::Ongoing,
            GameStatus::Won => PositionStatus::Checkmate,
            GameStatus::Drawn => PositionStatus::Drawn,
        }
    }

    pub fn fullmove_number(&self) -> u16 {
        self.board.fullmove_number()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.fen == other.fen
    }
}

impl Eq for Position {}

impl std::hash::Hash for Position {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.fen.hash(state);
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.fen)
    }
}

impl std::str::FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::parse_square;
    use crate::fen::STANDARD_FEN;

    #[test]
    fn test_initial_position() {
        let pos = Position::initial();
        assert_eq!(pos.fen(), STANDARD_FEN);
        assert_eq!(pos.side_to_move(), PieceColor::White);
        assert_eq!(pos.status(), PositionStatus::Ongoing);
        assert!(!pos.in_check());
    }

    #[test]
    fn test_piece_queries() {
        let pos = Position::initial();
        let e1 = parse_square("e1").unwrap();
        let e8 = parse_square("e8").unwrap();
        let e4 = parse_square("e4").unwrap();
        assert_eq!(pos.piece_at(e1), Some((PieceKind::King, PieceColor::White)));
        assert_eq!(pos.piece_at(e4), None);
        assert!(pos.has_own_piece(e1));
        assert!(!pos.has_own_piece(e8));
        assert!(!pos.has_own_piece(e4));
    }

    #[test]
    fn test_structural_equality() {
        let a: Position = STANDARD_FEN.parse().unwrap();
        assert_eq!(a, Position::initial());
        let b = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_checkmate_status() {
        // Fool's mate
        let pos =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        assert!(pos.in_check());
        assert_eq!(pos.status(), PositionStatus::Checkmate);
    }
}
