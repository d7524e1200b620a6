//! Local game library backend.
//!
//! Games are read from a JSON file and replayed once on load. Each reached
//! position remembers the move played next, so a statistics query is a
//! filter over games followed by a per-move tally.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use chess::{format_uci_move, parse_uci_move, Codec, PieceColor, Position, StandardCodec};
use serde::{Deserialize, Serialize};

use crate::error::{LibraryError, StatsResult};
use crate::traits::StatsService;
use crate::types::{MoveStat, Platform, StatsQuery};

/// A finished game as stored in the library file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    pub white: String,
    pub black: String,
    pub white_elo: u16,
    pub black_elo: u16,
    /// "white" or "black"; absent for a draw.
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub platform: Platform,
    pub finished_at_unix: i64,
    /// Mainline in UCI, castling as the king's two-square move.
    pub moves: Vec<String>,
}

impl GameRecord {
    /// Side `username` played, if they played in this game.
    pub fn color_of(&self, username: &str) -> Option<PieceColor> {
        if self.white.eq_ignore_ascii_case(username) {
            Some(PieceColor::White)
        } else if self.black.eq_ignore_ascii_case(username) {
            Some(PieceColor::Black)
        } else {
            None
        }
    }

    pub fn opponent_elo(&self, play_as: PieceColor) -> u16 {
        match play_as {
            PieceColor::White => self.black_elo,
            PieceColor::Black => self.white_elo,
        }
    }
}

/// A position reached in a game and the move that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionVisit {
    pub key: String,
    pub next_move: Option<String>,
}

/// Replay a game's mainline from the standard start, recording every
/// position reached. The final position has no next move.
pub fn replay(game: usize, record: &GameRecord) -> Result<Vec<PositionVisit>, LibraryError> {
    let codec = StandardCodec;
    let mut position = Position::initial();
    let mut visits = Vec::with_capacity(record.moves.len() + 1);

    for (ply, text) in record.moves.iter().enumerate() {
        let invalid = || LibraryError::InvalidMove {
            game,
            ply,
            mv: text.clone(),
        };
        let mv = parse_uci_move(text).ok_or_else(invalid)?;
        let next = codec.apply(&position, mv).map_err(|_| invalid())?;

        visits.push(PositionVisit {
            key: position.key(),
            next_move: Some(format_uci_move(mv)),
        });
        position = next;
    }

    visits.push(PositionVisit {
        key: position.key(),
        next_move: None,
    });
    Ok(visits)
}

#[derive(Debug, Clone)]
struct IndexedGame {
    record: GameRecord,
    winner: Option<PieceColor>,
    visits: Vec<PositionVisit>,
}

#[derive(Debug, Default)]
struct Tally {
    total: u64,
    wins: u64,
    draws: u64,
    opponent_elo_sum: u64,
}

/// Replayed games, ready to answer statistics queries.
#[derive(Debug, Clone, Default)]
pub struct GameLibrary {
    games: Vec<IndexedGame>,
    skipped: usize,
}

impl GameLibrary {
    /// Load a library file. A missing file is an empty library.
    pub fn load(path: &Path) -> Result<Self, LibraryError> {
        if !path.exists() {
            tracing::info!("No game library at {:?}, statistics will be empty", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| LibraryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let library = Self::from_json(&contents)?;
        tracing::info!(
            "Loaded {} games from {:?} ({} skipped)",
            library.len(),
            path,
            library.skipped()
        );
        Ok(library)
    }

    pub fn from_json(json: &str) -> Result<Self, LibraryError> {
        let records: Vec<GameRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    /// Index `records`, skipping games that cannot be replayed.
    pub fn from_records(records: Vec<GameRecord>) -> Self {
        let mut library = Self::default();
        for (index, record) in records.into_iter().enumerate() {
            match Self::index_game(index, record) {
                Ok(game) => library.games.push(game),
                Err(e) => {
                    tracing::warn!("Skipping game: {}", e);
                    library.skipped += 1;
                }
            }
        }
        library
    }

    fn index_game(index: usize, record: GameRecord) -> Result<IndexedGame, LibraryError> {
        let winner = match record.winner.as_deref() {
            None => None,
            Some(text) => Some(PieceColor::parse(text).ok_or_else(|| {
                LibraryError::InvalidWinner {
                    game: index,
                    winner: text.to_string(),
                }
            })?),
        };
        let visits = replay(index, &record)?;
        Ok(IndexedGame {
            record,
            winner,
            visits,
        })
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Games dropped at load time.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Tally the moves `query.username` made from the queried position,
    /// playing `query.play_as`. Returned in move order.
    pub fn aggregate(&self, position_key: &str, query: &StatsQuery) -> Vec<MoveStat> {
        let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();

        let games = self.games.iter().filter(|game| {
            game.record.platform == query.platform
                && game.record.color_of(&query.username) == Some(query.play_as)
                && query.time_range.contains(game.record.finished_at_unix)
        });

        for game in games {
            let next_moves = game
                .visits
                .iter()
                .filter(|visit| visit.key == position_key)
                .filter_map(|visit| visit.next_move.as_deref());

            for next in next_moves {
                let tally = tallies.entry(next).or_default();
                tally.total += 1;
                match game.winner {
                    None => tally.draws += 1,
                    Some(color) if color == query.play_as => tally.wins += 1,
                    Some(_) => {}
                }
                tally.opponent_elo_sum += u64::from(game.record.opponent_elo(query.play_as));
            }
        }

        tallies
            .into_iter()
            .map(|(mv, tally)| MoveStat {
                move_uci: mv.to_string(),
                total: tally.total,
                wins: tally.wins,
                draws: tally.draws,
                avg_opponent_elo: average_elo(tally.opponent_elo_sum, tally.total),
            })
            .collect()
    }
}

fn average_elo(sum: u64, count: u64) -> u16 {
    if count == 0 {
        return 0;
    }
    let rounded = (sum + count / 2) / count;
    u16::try_from(rounded).unwrap_or(u16::MAX)
}

#[async_trait]
impl StatsService for GameLibrary {
    async fn move_stats(&self, query: &StatsQuery) -> StatsResult<Vec<MoveStat>> {
        let position = StandardCodec.parse(&query.fen)?;
        Ok(self.aggregate(&position.key(), query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatsError;
    use crate::types::TimeRange;
    use chess::STANDARD_FEN;

    fn game(
        white: &str,
        black: &str,
        elos: (u16, u16),
        winner: Option<&str>,
        finished_at_unix: i64,
        moves: &[&str],
    ) -> GameRecord {
        GameRecord {
            white: white.to_string(),
            black: black.to_string(),
            white_elo: elos.0,
            black_elo: elos.1,
            winner: winner.map(str::to_string),
            platform: Platform::Chesscom,
            finished_at_unix,
            moves: moves.iter().map(|m| m.to_string()).collect(),
        }
    }

    fn sample_records() -> Vec<GameRecord> {
        let mut lichess = game("alice", "dave", (1500, 1800), Some("black"), 4000, &["e2e4", "e7e6"]);
        lichess.platform = Platform::Lichess;
        vec![
            game("alice", "bob", (1500, 1600), Some("white"), 1000, &["e2e4", "e7e5", "g1f3"]),
            game("Alice", "erin", (1500, 1400), None, 2000, &["d2d4", "d7d5"]),
            game("carol", "alice", (1700, 1500), Some("black"), 3000, &["e2e4", "c7c5"]),
            game("alice", "frank", (1500, 1700), Some("black"), 3500, &["e2e4", "e7e5"]),
            lichess,
            game("alice", "bob", (1500, 1600), None, 5000, &["e2e5"]),
        ]
    }

    fn query(fen: &str, play_as: PieceColor) -> StatsQuery {
        StatsQuery {
            fen: fen.to_string(),
            play_as,
            username: "alice".to_string(),
            platform: Platform::Chesscom,
            time_range: TimeRange::default(),
        }
    }

    fn after(moves: &[&str]) -> Position {
        let codec = StandardCodec;
        moves.iter().fold(Position::initial(), |pos, mv| {
            codec.apply(&pos, parse_uci_move(mv).unwrap()).unwrap()
        })
    }

    #[test]
    fn test_replay_records_next_moves() {
        let record = game("a", "b", (0, 0), None, 0, &["e2e4", "e7e5"]);
        let visits = replay(0, &record).unwrap();
        assert_eq!(visits.len(), 3);
        assert_eq!(visits[0].key, Position::initial().key());
        assert_eq!(visits[0].next_move.as_deref(), Some("e2e4"));
        assert_eq!(visits[2].next_move, None);
    }

    #[test]
    fn test_replay_rejects_illegal_move() {
        let record = game("a", "b", (0, 0), None, 0, &["e2e4", "e2e4"]);
        assert!(matches!(
            replay(7, &record),
            Err(LibraryError::InvalidMove { game: 7, ply: 1, .. })
        ));
    }

    #[test]
    fn test_replay_accepts_castling_in_king_form() {
        let record = game(
            "a",
            "b",
            (0, 0),
            None,
            0,
            &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1"],
        );
        let visits = replay(0, &record).unwrap();
        assert_eq!(visits[6].next_move.as_deref(), Some("e1g1"));
    }

    #[test]
    fn test_invalid_games_are_skipped() {
        let library = GameLibrary::from_records(sample_records());
        assert_eq!(library.len(), 5);
        assert_eq!(library.skipped(), 1);

        let bad_winner = game("a", "b", (0, 0), Some("purple"), 0, &[]);
        let library = GameLibrary::from_records(vec![bad_winner]);
        assert!(library.is_empty());
        assert_eq!(library.skipped(), 1);
    }

    #[test]
    fn test_aggregate_as_white() {
        let library = GameLibrary::from_records(sample_records());
        let q = query(STANDARD_FEN, PieceColor::White);
        let stats = library.aggregate(&Position::initial().key(), &q);

        assert_eq!(
            stats,
            vec![
                MoveStat {
                    move_uci: "d2d4".to_string(),
                    total: 1,
                    wins: 0,
                    draws: 1,
                    avg_opponent_elo: 1400,
                },
                MoveStat {
                    move_uci: "e2e4".to_string(),
                    total: 2,
                    wins: 1,
                    draws: 0,
                    avg_opponent_elo: 1650,
                },
            ]
        );
    }

    #[test]
    fn test_aggregate_as_black_uses_opponent_moves_position() {
        let library = GameLibrary::from_records(sample_records());
        let position = after(&["e2e4"]);
        let q = query(position.fen(), PieceColor::Black);
        let stats = library.aggregate(&position.key(), &q);

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].move_uci, "c7c5");
        assert_eq!(stats[0].wins, 1);
        assert_eq!(stats[0].avg_opponent_elo, 1700);
    }

    #[test]
    fn test_aggregate_respects_time_range() {
        let library = GameLibrary::from_records(sample_records());
        let mut q = query(STANDARD_FEN, PieceColor::White);
        q.time_range = TimeRange::new(Some(1500), Some(3000));
        let stats = library.aggregate(&Position::initial().key(), &q);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].move_uci, "d2d4");
    }

    #[test]
    fn test_aggregate_respects_platform() {
        let library = GameLibrary::from_records(sample_records());
        let mut q = query(STANDARD_FEN, PieceColor::White);
        q.platform = Platform::Lichess;
        let stats = library.aggregate(&Position::initial().key(), &q);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].total, 1);
        assert_eq!(stats[0].wins, 0);
        assert_eq!(stats[0].avg_opponent_elo, 1800);
    }

    #[test]
    fn test_average_elo_rounds() {
        assert_eq!(average_elo(3001, 2), 1501);
        assert_eq!(average_elo(3000, 2), 1500);
        assert_eq!(average_elo(0, 0), 0);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.json");
        let json = serde_json::to_string_pretty(&sample_records()).unwrap();
        std::fs::write(&path, json).unwrap();

        let library = GameLibrary::load(&path).unwrap();
        assert_eq!(library.len(), 5);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let library = GameLibrary::load(&dir.path().join("missing.json")).unwrap();
        assert!(library.is_empty());
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(GameLibrary::load(&path), Err(LibraryError::Json(_))));
    }

    #[test]
    fn test_record_defaults() {
        let json = r#"[{"white":"a","black":"b","white_elo":1,"black_elo":2,
                        "finished_at_unix":0,"moves":[]}]"#;
        let records: Vec<GameRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].winner, None);
        assert_eq!(records[0].platform, Platform::Chesscom);
    }

    #[tokio::test]
    async fn test_service_answers_queries() {
        let library = GameLibrary::from_records(sample_records());
        let stats = library
            .move_stats(&query(STANDARD_FEN, PieceColor::White))
            .await
            .unwrap();
        assert_eq!(stats.iter().map(|s| s.total).sum::<u64>(), 3);
    }

    #[tokio::test]
    async fn test_service_rejects_bad_fen() {
        let library = GameLibrary::default();
        let result = library.move_stats(&query("garbage", PieceColor::White)).await;
        assert!(matches!(result, Err(StatsError::InvalidPosition(_))));
    }
}
