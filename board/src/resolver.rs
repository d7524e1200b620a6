//! Move input resolution.
//!
//! The single place where a [`DraftMove`] from a gesture becomes a
//! [`CompleteMove`] and, if legal, a new [`Position`].

use chess::{Codec, CompleteMove, DraftMove, PieceKind, Position, Square};

/// A move that reached its last rank without a declared role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
}

impl PendingPromotion {
    pub fn draft(&self) -> DraftMove {
        DraftMove::new(self.from, self.to)
    }

    pub fn with_role(&self, role: PieceKind) -> CompleteMove {
        self.draft().with_role(role)
    }
}

/// A move as it was played, kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    pub mv: CompleteMove,
    pub san: String,
}

/// A successfully applied move and the position it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    pub played: PlayedMove,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Success(AppliedMove),
    Illegal,
    Promotion(PendingPromotion),
}

impl MoveOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Resolve a gesture that carries no promotion role.
pub fn resolve_draft<C: Codec>(codec: &C, position: &Position, draft: DraftMove) -> MoveOutcome {
    if draft.is_degenerate() {
        tracing::debug!("Rejecting degenerate move {}", draft);
        return MoveOutcome::Illegal;
    }

    if codec.is_promotion_eligible(position, draft) {
        tracing::debug!("Move {} needs a promotion role", draft);
        return MoveOutcome::Promotion(PendingPromotion {
            from: draft.from,
            to: draft.to,
        });
    }

    resolve_complete(codec, position, draft.without_role())
}

/// Resolve a move whose role decision has been made. Skips the promotion
/// eligibility check.
pub fn resolve_complete<C: Codec>(codec: &C, position: &Position, mv: CompleteMove) -> MoveOutcome {
    if mv.from == mv.to {
        return MoveOutcome::Illegal;
    }

    if !codec.is_legal(position, mv) {
        tracing::debug!("Illegal move {} in {}", mv, position);
        return MoveOutcome::Illegal;
    }

    let san = codec.san(position, mv).unwrap_or_else(|| mv.to_string());
    match codec.apply(position, mv) {
        Ok(next) => MoveOutcome::Success(AppliedMove {
            played: PlayedMove { mv, san },
            position: next,
        }),
        Err(e) => {
            tracing::warn!("Codec refused a move it reported legal: {}", e);
            MoveOutcome::Illegal
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chess::{parse_square, CodecError, FenError, StandardCodec};

    pub(crate) fn sq(s: &str) -> Square {
        parse_square(s).unwrap()
    }

    /// Reports every move legal but refuses to apply any.
    pub(crate) struct RefusingCodec;

    impl Codec for RefusingCodec {
        fn parse(&self, serialized: &str) -> Result<Position, FenError> {
            StandardCodec.parse(serialized)
        }
        fn serialize(&self, position: &Position) -> String {
            StandardCodec.serialize(position)
        }
        fn legal_destinations(&self, position: &Position, from: Square) -> Vec<Square> {
            StandardCodec.legal_destinations(position, from)
        }
        fn is_legal(&self, _position: &Position, _mv: CompleteMove) -> bool {
            true
        }
        fn apply(&self, _position: &Position, mv: CompleteMove) -> Result<Position, CodecError> {
            Err(CodecError::IllegalMove(mv))
        }
        fn is_promotion_eligible(&self, position: &Position, mv: DraftMove) -> bool {
            StandardCodec.is_promotion_eligible(position, mv)
        }
        fn san(&self, _position: &Position, _mv: CompleteMove) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_degenerate_move_is_illegal() {
        let pos = Position::initial();
        let outcome = resolve_draft(&StandardCodec, &pos, DraftMove::new(sq("e2"), sq("e2")));
        assert_eq!(outcome, MoveOutcome::Illegal);
    }

    #[test]
    fn test_legal_move_succeeds() {
        let pos = Position::initial();
        let outcome = resolve_draft(&StandardCodec, &pos, DraftMove::new(sq("e2"), sq("e4")));
        match outcome {
            MoveOutcome::Success(applied) => {
                assert_eq!(applied.played.san, "e4");
                assert_eq!(applied.played.mv.to_string(), "e2e4");
                assert!(applied.position.fen().starts_with("rnbqkbnr/pppppppp/8/8/4P3/"));
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn test_illegal_move() {
        let pos = Position::initial();
        let outcome = resolve_draft(&StandardCodec, &pos, DraftMove::new(sq("e2"), sq("e5")));
        assert_eq!(outcome, MoveOutcome::Illegal);
    }

    #[test]
    fn test_promotion_detected_before_legality() {
        let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let outcome = resolve_draft(&StandardCodec, &pos, DraftMove::new(sq("a7"), sq("a8")));
        assert_eq!(
            outcome,
            MoveOutcome::Promotion(PendingPromotion {
                from: sq("a7"),
                to: sq("a8"),
            })
        );
    }

    #[test]
    fn test_pawn_to_unreachable_last_rank_square_is_illegal() {
        let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let outcome = resolve_draft(&StandardCodec, &pos, DraftMove::new(sq("a7"), sq("b8")));
        assert_eq!(outcome, MoveOutcome::Illegal);
    }

    #[test]
    fn test_complete_move_with_role() {
        let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let pending = PendingPromotion {
            from: sq("a7"),
            to: sq("a8"),
        };
        let outcome = resolve_complete(&StandardCodec, &pos, pending.with_role(PieceKind::Queen));
        match outcome {
            MoveOutcome::Success(applied) => {
                assert_eq!(applied.played.san, "a8=Q+");
                assert_eq!(
                    applied.position.piece_at(sq("a8")),
                    Some((PieceKind::Queen, chess::PieceColor::White))
                );
            }
            other => panic!("expected success, got {:?}", other),
        }

        let outcome = resolve_complete(&StandardCodec, &pos, pending.with_role(PieceKind::King));
        assert_eq!(outcome, MoveOutcome::Illegal);
    }

    #[test]
    fn test_apply_failure_after_legality_check_is_illegal() {
        let pos = Position::initial();
        let outcome = resolve_draft(&RefusingCodec, &pos, DraftMove::new(sq("e2"), sq("e4")));
        assert_eq!(outcome, MoveOutcome::Illegal);
    }
}
