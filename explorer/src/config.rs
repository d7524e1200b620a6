//! Configuration for the explorer.
//!
//! Every tunable has a compile-time default that an environment variable can
//! override; command-line flags override both. Resolution is kept apart from
//! reading the environment so it can be tested without touching it.

use std::path::PathBuf;

use chess::PieceColor;
use stats_client::{Platform, TimeRange};

/// Default directory for rolling log files.
const DEFAULT_LOG_DIR: &str = "logs";

/// Game library location relative to the home directory.
const DEFAULT_GAMES_SUBPATH: &str = ".config/position-explorer/games.json";

/// Game library location when no home directory is known.
const FALLBACK_GAMES_PATH: &str = "games.json";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown side {0:?}, expected white or black")]
    InvalidColor(String),
    #[error("Unknown platform {0:?}, expected chesscom or lichess")]
    InvalidPlatform(String),
    #[error("Time range starts ({from}) after it ends ({to})")]
    InvalidTimeRange { from: i64, to: i64 },
}

/// Get the directory log files are written to.
///
/// Priority:
/// 1. `EXPLORER_LOG_DIR` env variable if set
/// 2. `logs` as fallback
pub fn get_log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("EXPLORER_LOG_DIR") {
        return PathBuf::from(dir);
    }

    PathBuf::from(DEFAULT_LOG_DIR)
}

/// Get the game library path.
///
/// Priority:
/// 1. `EXPLORER_GAMES_PATH` env variable if set
/// 2. `$HOME/.config/position-explorer/games.json`
/// 3. `./games.json` when there is no home directory
pub fn get_games_path() -> PathBuf {
    if let Ok(path) = std::env::var("EXPLORER_GAMES_PATH") {
        return PathBuf::from(path);
    }

    default_games_path(dirs::home_dir())
}

fn default_games_path(home: Option<PathBuf>) -> PathBuf {
    match home {
        Some(home) => home.join(DEFAULT_GAMES_SUBPATH),
        None => PathBuf::from(FALLBACK_GAMES_PATH),
    }
}

/// Get the player whose games feed the statistics, from `EXPLORER_USERNAME`.
pub fn get_username() -> Option<String> {
    std::env::var("EXPLORER_USERNAME")
        .ok()
        .filter(|name| !name.trim().is_empty())
}

/// Get the platform name from `EXPLORER_PLATFORM`, unparsed.
pub fn get_platform() -> Option<String> {
    std::env::var("EXPLORER_PLATFORM").ok()
}

/// Values taken from the environment (or their defaults).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvDefaults {
    pub log_dir: PathBuf,
    pub games_path: PathBuf,
    pub username: Option<String>,
    pub platform: Option<String>,
}

impl EnvDefaults {
    pub fn from_env() -> Self {
        Self {
            log_dir: get_log_dir(),
            games_path: get_games_path(),
            username: get_username(),
            platform: get_platform(),
        }
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub fen: Option<String>,
    pub play_as: Option<String>,
    pub games_path: Option<PathBuf>,
    pub username: Option<String>,
    pub platform: Option<String>,
    pub from_unix: Option<i64>,
    pub to_unix: Option<i64>,
}

/// The player identity statistics are looked up for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub platform: Platform,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    /// Starting position; `None` is the standard start.
    pub start_fen: Option<String>,
    pub play_as: PieceColor,
    pub log_dir: PathBuf,
    pub games_path: PathBuf,
    /// `None` disables statistics.
    pub identity: Option<Identity>,
    pub time_range: TimeRange,
}

impl ExplorerConfig {
    pub fn resolve(overrides: Overrides, env: EnvDefaults) -> Result<Self, ConfigError> {
        let play_as = match overrides.play_as {
            Some(text) => PieceColor::parse(&text).ok_or(ConfigError::InvalidColor(text))?,
            None => PieceColor::White,
        };

        let platform = match overrides.platform.or(env.platform) {
            Some(text) => Platform::parse(&text).ok_or(ConfigError::InvalidPlatform(text))?,
            None => Platform::default(),
        };

        let identity = overrides
            .username
            .or(env.username)
            .map(|username| Identity { username, platform });

        let time_range = TimeRange::new(overrides.from_unix, overrides.to_unix);
        if let (Some(from), Some(to)) = (time_range.from_unix, time_range.to_unix) {
            if from > to {
                return Err(ConfigError::InvalidTimeRange { from, to });
            }
        }

        Ok(Self {
            start_fen: overrides.fen,
            play_as,
            log_dir: env.log_dir,
            games_path: overrides.games_path.unwrap_or(env.games_path),
            identity,
            time_range,
        })
    }
}
