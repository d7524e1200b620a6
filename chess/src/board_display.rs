//! Placement-only board parsed from the first FEN field, for drawing.

use cozy_chess::Square;

use crate::converters::square_from_coords;
use crate::types::{PieceColor, PieceKind};

type Occupant = Option<(PieceKind, PieceColor)>;

/// Piece placement indexed by square. Carries no rules state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayBoard {
    cells: [Occupant; 64],
}

impl Default for DisplayBoard {
    fn default() -> Self {
        Self { cells: [None; 64] }
    }
}

impl DisplayBoard {
    /// Read the placement field of `fen`; the remaining fields are ignored.
    pub fn from_fen(fen: &str) -> Result<Self, DisplayBoardError> {
        let placement = fen
            .split_whitespace()
            .next()
            .ok_or(DisplayBoardError::InvalidFen)?;

        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(DisplayBoardError::InvalidFen);
        }

        let mut board = Self::default();
        // FEN lists rank 8 first
        for (rank, row) in (0..8u8).rev().zip(rows) {
            let mut file = 0u8;
            for c in row.chars() {
                if let Some(gap) = c.to_digit(10) {
                    file += gap as u8;
                    continue;
                }
                let kind = PieceKind::from_char(c).ok_or(DisplayBoardError::InvalidPiece(c))?;
                let color = if c.is_ascii_uppercase() {
                    PieceColor::White
                } else {
                    PieceColor::Black
                };
                let square =
                    square_from_coords(file, rank).ok_or(DisplayBoardError::InvalidFen)?;
                board.cells[square as usize] = Some((kind, color));
                file += 1;
            }
            if file != 8 {
                return Err(DisplayBoardError::InvalidFen);
            }
        }

        Ok(board)
    }

    pub fn piece_on(&self, square: Square) -> Occupant {
        self.cells[square as usize]
    }

    /// FEN letter of the piece on `square`, uppercase for white, '.' if empty.
    pub fn glyph(&self, square: Square) -> char {
        match self.piece_on(square) {
            Some((kind, PieceColor::White)) => kind.to_char_upper(),
            Some((kind, PieceColor::Black)) => kind.to_char_lower(),
            None => '.',
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DisplayBoardError {
    #[error("Invalid FEN string")]
    InvalidFen,
    #[error("Invalid piece character: {0}")]
    InvalidPiece(char),
}
