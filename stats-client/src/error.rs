//! Error types for the statistics client

use std::path::PathBuf;

use thiserror::Error;

pub type StatsResult<T> = Result<T, StatsError>;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Game library error: {0}")]
    Library(#[from] LibraryError),

    #[error("Invalid position: {0}")]
    InvalidPosition(#[from] chess::FenError),

    #[error("Statistics backend failed: {0}")]
    Backend(String),

    #[error("Mock response not configured for: {0}")]
    NotConfigured(String),
}

/// Failures while loading or replaying the local game library.
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Game {game}: move {ply} ({mv}) cannot be played")]
    InvalidMove { game: usize, ply: usize, mv: String },

    #[error("Game {game}: unknown winner {winner:?}")]
    InvalidWinner { game: usize, winner: String },
}
