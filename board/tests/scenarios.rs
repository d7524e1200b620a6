//! End-to-end board interaction scenarios driven through the public API.

use board::{BoardController, InputEffect, MoveOutcome, PromotionResolution};
use chess::{parse_square, PieceColor, PieceKind, Position, Square};
use proptest::prelude::*;

fn sq(s: &str) -> Square {
    parse_square(s).unwrap()
}

fn play(board: &mut BoardController, from: &str, to: &str) {
    board.click(sq(from));
    let effect = board.click(sq(to));
    assert!(
        matches!(effect, InputEffect::Moved(_)),
        "{}{} should be playable, got {:?}",
        from,
        to,
        effect
    );
}

mod click_input {
    use super::*;

    #[test]
    fn two_clicks_play_a_move() {
        let mut board = BoardController::new();
        assert_eq!(board.click(sq("e2")), InputEffect::Selected(sq("e2")));
        let effect = board.click(sq("e4"));
        match effect {
            InputEffect::Moved(played) => assert_eq!(played.san, "e4"),
            other => panic!("expected a move, got {:?}", other),
        }
        assert_eq!(board.history_len(), 2);
        assert_eq!(board.cursor(), 0);
        assert_eq!(board.selected(), None);
        assert_eq!(board.current().side_to_move(), PieceColor::Black);
    }

    #[test]
    fn reselect_only_when_target_holds_side_to_move_piece() {
        let mut board = BoardController::new();
        play(&mut board, "e2", "e4");
        play(&mut board, "e7", "e5");

        // white to move: the black king is not selectable
        assert_eq!(board.click(sq("e8")), InputEffect::Ignored);
        assert_eq!(board.click(sq("e7")), InputEffect::Ignored);
        assert_eq!(board.selected(), None);

        // illegal onto an opponent piece deselects
        board.click(sq("d1"));
        assert_eq!(
            board.click(sq("d8")),
            InputEffect::Rejected { reselected: None }
        );
        assert_eq!(board.selected(), None);

        // illegal onto an own piece re-selects it
        board.click(sq("d1"));
        assert_eq!(
            board.click(sq("e1")),
            InputEffect::Rejected {
                reselected: Some(sq("e1"))
            }
        );
        assert_eq!(board.selected(), Some(sq("e1")));
        assert_eq!(board.history_len(), 3);
    }

    #[test]
    fn deselect_is_idempotent_for_every_own_piece() {
        let mut board = BoardController::new();
        let own: Vec<Square> = (0..64)
            .map(Square::index)
            .filter(|s| board.current().has_own_piece(*s))
            .collect();
        assert_eq!(own.len(), 16);

        for square in own {
            let before = board.current().clone();
            assert_eq!(board.click(square), InputEffect::Selected(square));
            assert_eq!(board.click(square), InputEffect::Deselected);
            assert_eq!(board.selected(), None);
            assert_eq!(board.current(), &before);
        }
        assert_eq!(board.history_len(), 1);
    }

    #[test]
    fn castling_by_clicking_the_king_destination() {
        let mut board =
            BoardController::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1")
                .unwrap();
        board.click(sq("e1"));
        match board.click(sq("g1")) {
            InputEffect::Moved(played) => assert_eq!(played.san, "O-O"),
            other => panic!("expected castling, got {:?}", other),
        }
        assert_eq!(
            board.current().piece_at(sq("f1")),
            Some((PieceKind::Rook, PieceColor::White))
        );
    }

    #[test]
    fn king_onto_own_rook_reselects_the_rook() {
        let mut board =
            BoardController::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1")
                .unwrap();
        board.click(sq("e1"));
        assert_eq!(
            board.click(sq("h1")),
            InputEffect::Rejected {
                reselected: Some(sq("h1"))
            }
        );
    }
}

mod promotion {
    use super::*;

    const PAWN_ON_A7: &str = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1";

    #[test]
    fn promotion_waits_for_a_role() {
        let mut board = BoardController::from_fen(PAWN_ON_A7).unwrap();
        board.click(sq("a7"));
        let effect = board.click(sq("a8"));
        let pending = match effect {
            InputEffect::PromotionPending(pending) => pending,
            other => panic!("expected promotion, got {:?}", other),
        };
        assert_eq!((pending.from, pending.to), (sq("a7"), sq("a8")));
        assert_eq!(board.pending_promotion(), Some(pending));
        assert_eq!(board.history_len(), 1);

        let resolution = board.resolve_promotion(Some(PieceKind::Queen));
        assert!(matches!(resolution, PromotionResolution::Committed(_)));
        assert_eq!(board.history_len(), 2);
        assert_eq!(board.pending_promotion(), None);
        assert_eq!(board.selected(), None);
        assert_eq!(
            board.current().piece_at(sq("a8")),
            Some((PieceKind::Queen, PieceColor::White))
        );
    }

    #[test]
    fn pending_promotion_blocks_ordinary_input() {
        let mut board = BoardController::from_fen(PAWN_ON_A7).unwrap();
        board.click(sq("a7"));
        board.click(sq("a8"));

        assert_eq!(board.click(sq("e1")), InputEffect::Ignored);
        assert_eq!(board.click(sq("e2")), InputEffect::Ignored);
        assert_eq!(board.drop_piece(sq("e1"), sq("d1")), InputEffect::Ignored);
        assert!(!board.select(sq("e1")));
        assert_eq!(board.selected(), None);
        assert_eq!(board.history_len(), 1);
        assert!(board.pending_promotion().is_some());
    }

    #[test]
    fn illegal_role_leaves_history_untouched() {
        let mut board = BoardController::from_fen(PAWN_ON_A7).unwrap();
        board.click(sq("a7"));
        board.click(sq("a8"));
        assert!(matches!(
            board.resolve_promotion(Some(PieceKind::King)),
            PromotionResolution::Rejected(_)
        ));
        assert_eq!(board.pending_promotion(), None);
        assert_eq!(board.history_len(), 1);
    }

    #[test]
    fn resolving_with_nothing_pending_is_a_noop() {
        let mut board = BoardController::from_fen(PAWN_ON_A7).unwrap();
        assert_eq!(
            board.resolve_promotion(Some(PieceKind::Queen)),
            PromotionResolution::NothingPending
        );
        assert_eq!(board.history_len(), 1);
    }

    #[test]
    fn dragged_promotion_enters_the_sub_flow() {
        let mut board = BoardController::from_fen(PAWN_ON_A7).unwrap();
        assert!(matches!(
            board.drop_piece(sq("a7"), sq("a8")),
            InputEffect::PromotionPending(_)
        ));
        board.resolve_promotion(None);
        assert_eq!(board.selected(), None);
        assert_eq!(board.history_len(), 1);
    }
}

mod history {
    use super::*;

    fn four_plies() -> BoardController {
        let mut board = BoardController::new();
        play(&mut board, "e2", "e4");
        play(&mut board, "e7", "e5");
        play(&mut board, "g1", "f3");
        play(&mut board, "b8", "c6");
        board
    }

    #[test]
    fn new_move_from_rewound_position_truncates() {
        let mut board = four_plies();
        assert_eq!(board.history_len(), 5);
        board.step_back();
        board.step_back();
        assert_eq!(board.cursor(), 2);

        // viewing the position after 1.e4 e5, white to move
        play(&mut board, "f1", "c4");
        assert_eq!(board.history_len(), 4);
        assert_eq!(board.cursor(), 0);

        // the old continuation is gone for good
        board.step_back();
        assert_eq!(board.last_move().unwrap().san, "e5");
        board.step_forward();
        assert_eq!(board.last_move().unwrap().san, "Bc4");
        assert!(!board.step_forward());
    }

    #[test]
    fn navigation_bounds_and_affordances() {
        let mut board = four_plies();
        assert!(board.can_step_back());
        assert!(!board.can_step_forward());

        for _ in 0..10 {
            board.step_back();
        }
        assert_eq!(board.cursor(), 4);
        assert_eq!(board.current(), &Position::initial());
        assert!(!board.can_step_back());
        assert!(board.can_step_forward());

        for _ in 0..10 {
            board.step_forward();
        }
        assert_eq!(board.cursor(), 0);
    }

    #[test]
    fn navigation_clears_selection() {
        let mut board = four_plies();
        board.click(sq("f1"));
        board.step_back();
        assert_eq!(board.selected(), None);
    }

    #[test]
    fn jump_to_start_and_live() {
        let mut board = four_plies();
        assert!(board.jump_to_start());
        assert_eq!(board.current(), &Position::initial());
        assert!(board.jump_to_live());
        assert_eq!(board.history_len(), 5);
    }
}

mod drag_input {
    use super::*;

    #[test]
    fn drop_on_origin_toggles_selection() {
        let mut board = BoardController::new();
        assert_eq!(
            board.drop_piece(sq("e2"), sq("e2")),
            InputEffect::Selected(sq("e2"))
        );
        assert_eq!(board.drop_piece(sq("e2"), sq("e2")), InputEffect::Deselected);
        assert_eq!(board.history_len(), 1);
    }

    #[test]
    fn drop_on_origin_of_opponent_piece_is_ignored() {
        let mut board = BoardController::new();
        assert_eq!(board.drop_piece(sq("e7"), sq("e7")), InputEffect::Ignored);
        assert_eq!(board.selected(), None);
    }

    #[test]
    fn drop_plays_the_move() {
        let mut board = BoardController::new();
        board.click(sq("b1"));
        assert!(matches!(
            board.drop_piece(sq("g1"), sq("f3")),
            InputEffect::Moved(_)
        ));
        assert_eq!(board.selected(), None);
        assert_eq!(board.history_len(), 2);
    }

    #[test]
    fn illegal_drop_follows_click_rules() {
        let mut board = BoardController::new();
        assert_eq!(
            board.drop_piece(sq("e2"), sq("e5")),
            InputEffect::Rejected { reselected: None }
        );
        assert_eq!(
            board.drop_piece(sq("c1"), sq("d2")),
            InputEffect::Rejected {
                reselected: Some(sq("d2"))
            }
        );
    }
}

mod direct_moves {
    use super::*;

    #[test]
    fn attempt_move_success_and_illegal() {
        let mut board = BoardController::new();
        assert_eq!(
            board.attempt_move(sq("e2"), sq("e5"), None),
            MoveOutcome::Illegal
        );
        assert!(board.attempt_move(sq("d2"), sq("d4"), None).is_success());
        assert_eq!(board.history_len(), 2);
    }
}

proptest! {
    /// Random click sequences never break the board invariants.
    #[test]
    fn random_clicks_keep_invariants(clicks in prop::collection::vec(0usize..64, 0..80)) {
        let mut board = BoardController::new();
        for idx in clicks {
            board.click(Square::index(idx));
            prop_assert!(board.cursor() < board.history_len());
            prop_assert!(!(board.selected().is_some() && board.pending_promotion().is_some()));
            if let Some(selected) = board.selected() {
                prop_assert!(board.current().has_own_piece(selected));
            }
        }
    }
}
