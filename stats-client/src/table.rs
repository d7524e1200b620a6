//! Derived statistics for display: per-move rates, position summary and
//! the panel state the explorer renders.

use chess::{parse_uci_move, CompleteMove};

use crate::types::MoveStat;

/// One row of the move table.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveRow {
    pub stat: MoveStat,
    /// Parsed move, `None` if the backend sent something unreadable.
    pub mv: Option<CompleteMove>,
    pub play_rate: f64,
    pub win_rate: f64,
    pub hovered: bool,
}

/// Moves from one position, most played first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsTable {
    rows: Vec<MoveRow>,
}

impl StatsTable {
    pub fn from_stats(stats: Vec<MoveStat>) -> Self {
        let total_games: u64 = stats.iter().map(|s| s.total).sum();

        let mut rows: Vec<MoveRow> = stats
            .into_iter()
            .map(|stat| {
                let play_rate = ratio(stat.total, total_games);
                let win_rate = ratio(stat.wins, stat.total);
                MoveRow {
                    mv: parse_uci_move(&stat.move_uci),
                    stat,
                    play_rate,
                    win_rate,
                    hovered: false,
                }
            })
            .collect();
        rows.sort_by(|a, b| b.play_rate.total_cmp(&a.play_rate));

        Self { rows }
    }

    pub fn rows(&self) -> &[MoveRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Mark a row as hovered; out-of-range indices are ignored.
    pub fn set_hovered(&mut self, index: usize, hovered: bool) {
        if let Some(row) = self.rows.get_mut(index) {
            row.hovered = hovered;
        }
    }

    pub fn hovered(&self) -> impl Iterator<Item = &MoveRow> {
        self.rows.iter().filter(|row| row.hovered)
    }

    pub fn clear_hover(&mut self) {
        for row in &mut self.rows {
            row.hovered = false;
        }
    }
}

/// Totals over every move played from a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSummary {
    pub total_games: u64,
    pub wins: u64,
    pub draws: u64,
    /// Opponent Elo averaged over games, weighted by each move's count.
    pub avg_opponent_elo: f64,
}

impl PositionSummary {
    /// `None` when no game reached the position.
    pub fn from_stats(stats: &[MoveStat]) -> Option<Self> {
        let total_games: u64 = stats.iter().map(|s| s.total).sum();
        if total_games == 0 {
            return None;
        }

        let weighted_elo: f64 = stats
            .iter()
            .map(|s| f64::from(s.avg_opponent_elo) * s.total as f64)
            .sum();

        Some(Self {
            total_games,
            wins: stats.iter().map(|s| s.wins).sum(),
            draws: stats.iter().map(|s| s.draws).sum(),
            avg_opponent_elo: weighted_elo / total_games as f64,
        })
    }

    pub fn win_rate(&self) -> f64 {
        ratio(self.wins, self.total_games)
    }
}

/// What the statistics panel currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum StatsPanel {
    /// Nothing requested yet, or the last request failed.
    #[default]
    Empty,
    Loading,
    Ready {
        table: StatsTable,
        summary: Option<PositionSummary>,
    },
}

impl StatsPanel {
    pub fn ready(stats: Vec<MoveStat>) -> Self {
        let summary = PositionSummary::from_stats(&stats);
        StatsPanel::Ready {
            table: StatsTable::from_stats(stats),
            summary,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, StatsPanel::Loading)
    }

    pub fn table(&self) -> Option<&StatsTable> {
        match self {
            StatsPanel::Ready { table, .. } => Some(table),
            _ => None,
        }
    }

    pub fn table_mut(&mut self) -> Option<&mut StatsTable> {
        match self {
            StatsPanel::Ready { table, .. } => Some(table),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<&PositionSummary> {
        match self {
            StatsPanel::Ready { summary, .. } => summary.as_ref(),
            _ => None,
        }
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
