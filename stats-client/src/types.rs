//! Query and response types exchanged with a statistics backend.

use std::fmt;

use chess::{position_key, PieceColor};
use serde::{Deserialize, Serialize};

/// Games platform the player's history comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Chesscom,
    Lichess,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Chesscom => "chesscom",
            Platform::Lichess => "lichess",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['.', '-', '_'], "").as_str() {
            "chesscom" => Some(Platform::Chesscom),
            "lichess" | "lichessorg" => Some(Platform::Lichess),
            _ => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive bounds on when a game finished, in unix seconds. Open ends
/// are unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TimeRange {
    pub from_unix: Option<i64>,
    pub to_unix: Option<i64>,
}

impl TimeRange {
    pub fn new(from_unix: Option<i64>, to_unix: Option<i64>) -> Self {
        Self { from_unix, to_unix }
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        self.from_unix.map_or(true, |from| timestamp >= from)
            && self.to_unix.map_or(true, |to| timestamp <= to)
    }

    pub fn is_unbounded(&self) -> bool {
        self.from_unix.is_none() && self.to_unix.is_none()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = |b: Option<i64>| b.map_or_else(|| "*".to_string(), |v| v.to_string());
        write!(f, "{}..{}", bound(self.from_unix), bound(self.to_unix))
    }
}

/// Everything a backend needs to answer "what did this player play here".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsQuery {
    /// Full FEN of the displayed position.
    pub fen: String,
    pub play_as: PieceColor,
    pub username: String,
    pub platform: Platform,
    pub time_range: TimeRange,
}

impl StatsQuery {
    /// Identity of the question asked, ignoring move counters.
    pub fn key(&self) -> QueryKey {
        QueryKey {
            position: position_key(&self.fen),
            play_as: self.play_as,
            username: self.username.to_lowercase(),
            platform: self.platform,
            time_range: self.time_range,
        }
    }
}

/// Two queries with equal keys expect the same answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub position: String,
    pub play_as: PieceColor,
    pub username: String,
    pub platform: Platform,
    pub time_range: TimeRange,
}

/// Aggregate for one move played from the queried position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStat {
    pub move_uci: String,
    pub total: u64,
    pub wins: u64,
    pub draws: u64,
    pub avg_opponent_elo: u16,
}

impl MoveStat {
    pub fn losses(&self) -> u64 {
        self.total.saturating_sub(self.wins + self.draws)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess::STANDARD_FEN;

    fn query(fen: &str) -> StatsQuery {
        StatsQuery {
            fen: fen.to_string(),
            play_as: PieceColor::White,
            username: "Magnus".to_string(),
            platform: Platform::Chesscom,
            time_range: TimeRange::default(),
        }
    }

    #[test]
    fn test_platform_parse() {
        assert_eq!(Platform::parse("chesscom"), Some(Platform::Chesscom));
        assert_eq!(Platform::parse("Chess.com"), Some(Platform::Chesscom));
        assert_eq!(Platform::parse("lichess.org"), Some(Platform::Lichess));
        assert_eq!(Platform::parse("fics"), None);
        assert_eq!(Platform::Chesscom.to_string(), "chesscom");
    }

    #[test]
    fn test_time_range_contains() {
        let open = TimeRange::default();
        assert!(open.is_unbounded());
        assert!(open.contains(i64::MIN));

        let range = TimeRange::new(Some(100), Some(200));
        assert!(range.contains(100));
        assert!(range.contains(200));
        assert!(!range.contains(99));
        assert!(!range.contains(201));
        assert!(TimeRange::new(None, Some(5)).contains(-1));
        assert_eq!(range.to_string(), "100..200");
        assert_eq!(TimeRange::new(Some(1), None).to_string(), "1..*");
    }

    #[test]
    fn test_key_ignores_move_counters_and_username_case() {
        let a = query(STANDARD_FEN);
        let mut b = query("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 4 9");
        b.username = "magnus".to_string();
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_key_distinguishes_perspective_and_range() {
        let a = query(STANDARD_FEN);
        let mut b = a.clone();
        b.play_as = PieceColor::Black;
        assert_ne!(a.key(), b.key());

        let mut c = a.clone();
        c.time_range = TimeRange::new(Some(0), None);
        assert_ne!(a.key(), c.key());
    }

    #[test]
    fn test_losses() {
        let stat = MoveStat {
            move_uci: "e2e4".to_string(),
            total: 10,
            wins: 6,
            draws: 1,
            avg_opponent_elo: 1500,
        };
        assert_eq!(stat.losses(), 3);
    }
}
