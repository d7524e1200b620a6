use chess::{square_coords, square_from_coords, PieceColor, Square};

/// Which side is drawn at the bottom of the board. Affects coordinate
/// mapping only, never legality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Orientation {
    bottom: PieceColor,
}

impl Orientation {
    pub fn new(bottom: PieceColor) -> Self {
        Self { bottom }
    }

    pub fn bottom(&self) -> PieceColor {
        self.bottom
    }

    pub fn flip(&mut self) {
        self.bottom = self.bottom.opposite();
    }

    /// Display cell of `square` as (column, row), row 0 at the top.
    pub fn display_coords(&self, square: Square) -> (u8, u8) {
        let (file, rank) = square_coords(square);
        match self.bottom {
            PieceColor::White => (file, 7 - rank),
            PieceColor::Black => (7 - file, rank),
        }
    }

    /// Square under display cell (column, row); `None` off the board.
    pub fn square_at(&self, column: u8, row: u8) -> Option<Square> {
        if column > 7 || row > 7 {
            return None;
        }
        match self.bottom {
            PieceColor::White => square_from_coords(column, 7 - row),
            PieceColor::Black => square_from_coords(7 - column, row),
        }
    }

    /// Squares in display order, top row first.
    pub fn rows(&self) -> Vec<Vec<Square>> {
        (0..8)
            .map(|row| (0..8).filter_map(|col| self.square_at(col, row)).collect())
            .collect()
    }
}
