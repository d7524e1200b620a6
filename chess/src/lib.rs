//! Position codec for the explorer: FEN, legality, move application and
//! notation, all answered by cozy-chess.

pub mod board_display;
pub mod codec;
pub mod converters;
pub mod fen;
pub mod moves;
pub mod position;
mod san;
pub mod types;
pub mod uci;

pub use board_display::{DisplayBoard, DisplayBoardError};
pub use codec::{Codec, CodecError, StandardCodec};
pub use converters::*;
pub use fen::{position_key, FenError, STANDARD_FEN};
pub use moves::{CompleteMove, DraftMove};
pub use position::{Position, PositionStatus};
pub use types::{PieceColor, PieceKind};
pub use uci::{format_uci_move, parse_uci_move};

pub use cozy_chess::Square;
