//! Linear history of reached positions with a rewind cursor.
//!
//! The cursor counts back from the newest entry: 0 is the live position.
//! Committing while rewound discards everything ahead of the cursor; the
//! history is a single line, never a tree.

use chess::Position;

use crate::resolver::PlayedMove;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub position: Position,
    /// The move that produced this position. `None` for the first entry.
    pub reached_by: Option<PlayedMove>,
}

#[derive(Debug, Clone)]
pub struct PositionHistory {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl PositionHistory {
    pub fn new(initial: Position) -> Self {
        Self {
            entries: vec![HistoryEntry {
                position: initial,
                reached_by: None,
            }],
            cursor: 0,
        }
    }

    /// The displayed position.
    pub fn current(&self) -> &Position {
        &self.current_entry().position
    }

    pub fn current_entry(&self) -> &HistoryEntry {
        &self.entries[self.current_index()]
    }

    /// Index of the displayed entry, 0 = oldest.
    pub fn current_index(&self) -> usize {
        self.entries.len() - 1 - self.cursor
    }

    /// The move that led to the displayed position.
    pub fn last_move(&self) -> Option<&PlayedMove> {
        self.current_entry().reached_by.as_ref()
    }

    pub fn initial(&self) -> &Position {
        &self.entries[0].position
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_live(&self) -> bool {
        self.cursor == 0
    }

    pub fn can_step_back(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn can_step_forward(&self) -> bool {
        self.cursor > 0
    }

    /// Append a position, truncating anything ahead of the cursor.
    /// Returns the number of discarded entries.
    pub fn commit(&mut self, position: Position) -> usize {
        self.push(HistoryEntry {
            position,
            reached_by: None,
        })
    }

    pub fn commit_move(&mut self, position: Position, played: PlayedMove) -> usize {
        self.push(HistoryEntry {
            position,
            reached_by: Some(played),
        })
    }

    fn push(&mut self, entry: HistoryEntry) -> usize {
        let keep = self.entries.len() - self.cursor;
        let dropped = self.cursor;
        self.entries.truncate(keep);
        self.entries.push(entry);
        self.cursor = 0;
        dropped
    }

    /// Returns false when already at the oldest entry.
    pub fn step_back(&mut self) -> bool {
        let next = (self.cursor + 1).min(self.entries.len() - 1);
        let moved = next != self.cursor;
        self.cursor = next;
        moved
    }

    /// Returns false when already live.
    pub fn step_forward(&mut self) -> bool {
        let moved = self.cursor > 0;
        self.cursor = self.cursor.saturating_sub(1);
        moved
    }

    pub fn jump_to_start(&mut self) -> bool {
        let oldest = self.entries.len() - 1;
        let moved = self.cursor != oldest;
        self.cursor = oldest;
        moved
    }

    pub fn jump_to_live(&mut self) -> bool {
        let moved = self.cursor != 0;
        self.cursor = 0;
        moved
    }

    pub fn reset(&mut self, initial: Position) {
        self.entries.clear();
        self.entries.push(HistoryEntry {
            position: initial,
            reached_by: None,
        });
        self.cursor = 0;
    }
}
