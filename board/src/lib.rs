//! Interactive board state machine.
//!
//! Turns clicks and drops into legal moves, runs pawn promotion as a
//! sub-flow and keeps a linear, rewindable history of reached positions.
//! Rules questions are delegated to a [`chess::Codec`].
//!
//! ```
//! use board::{BoardController, InputEffect};
//! use chess::parse_square;
//!
//! let mut board = BoardController::new();
//! board.click(parse_square("e2").unwrap());
//! let effect = board.click(parse_square("e4").unwrap());
//! assert!(matches!(effect, InputEffect::Moved(_)));
//! assert_eq!(board.history_len(), 2);
//! ```

pub mod controller;
pub mod events;
pub mod history;
pub mod orientation;
pub mod promotion;
pub mod resolver;

pub use controller::{BoardController, InputEffect};
pub use events::{BoardEvent, ListenerId};
pub use history::{HistoryEntry, PositionHistory};
pub use orientation::Orientation;
pub use promotion::{PromotionFlow, PromotionResolution, PromotionState};
pub use resolver::{
    resolve_complete, resolve_draft, AppliedMove, MoveOutcome, PendingPromotion, PlayedMove,
};
