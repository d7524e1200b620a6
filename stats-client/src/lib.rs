//! Move statistics for the position explorer
//!
//! Asks "what did this player play from this position, and how did it go",
//! turns the answer into display rows, and drops answers that arrive after
//! the board has moved on.
//!
//! # Example
//!
//! ```no_run
//! use chess::{PieceColor, STANDARD_FEN};
//! use stats_client::{GameLibrary, Platform, StatsQuery, StatsService, TimeRange};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let library = GameLibrary::load("games.json".as_ref())?;
//!     let query = StatsQuery {
//!         fen: STANDARD_FEN.to_string(),
//!         play_as: PieceColor::White,
//!         username: "player".to_string(),
//!         platform: Platform::Chesscom,
//!         time_range: TimeRange::default(),
//!     };
//!     for stat in library.move_stats(&query).await? {
//!         println!("{}: {} games", stat.move_uci, stat.total);
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod library;
mod table;
mod tracker;
mod traits;
mod types;

#[cfg(any(test, feature = "mock"))]
mod mock;

pub use error::{LibraryError, StatsError, StatsResult};
pub use library::{replay, GameLibrary, GameRecord, PositionVisit};
pub use table::{MoveRow, PositionSummary, StatsPanel, StatsTable};
pub use tracker::{QueryTicket, QueryTracker};
pub use traits::StatsService;
pub use types::{MoveStat, Platform, QueryKey, StatsQuery, TimeRange};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockStatsService;
