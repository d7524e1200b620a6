//! Move value objects.
//!
//! A [`DraftMove`] is what a gesture produces: two squares and nothing else.
//! A [`CompleteMove`] additionally carries the promotion role decision, even
//! when that decision is "none". Neither is bound to a position until it is
//! checked against one.

use cozy_chess::Square;

use crate::converters::format_square;
use crate::types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DraftMove {
    pub from: Square,
    pub to: Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompleteMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl DraftMove {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// `from == to`: a click or drop that never left its square.
    pub fn is_degenerate(&self) -> bool {
        self.from == self.to
    }

    /// Commit to "no promotion".
    pub fn without_role(self) -> CompleteMove {
        CompleteMove {
            from: self.from,
            to: self.to,
            promotion: None,
        }
    }

    pub fn with_role(self, role: PieceKind) -> CompleteMove {
        CompleteMove {
            from: self.from,
            to: self.to,
            promotion: Some(role),
        }
    }
}

impl CompleteMove {
    pub fn new(from: Square, to: Square, promotion: Option<PieceKind>) -> Self {
        Self { from, to, promotion }
    }

    pub fn draft(&self) -> DraftMove {
        DraftMove::new(self.from, self.to)
    }
}

impl std::fmt::Display for DraftMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", format_square(self.from), format_square(self.to))
    }
}

impl std::fmt::Display for CompleteMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.draft())?;
        if let Some(role) = self.promotion {
            write!(f, "{}", role.to_char_lower())?;
        }
        Ok(())
    }
}
