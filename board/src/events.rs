use chess::{PieceColor, Square};

use crate::resolver::PendingPromotion;

/// Change notifications emitted by the board controller after each
/// mutation. Listeners decide what to redraw or re-query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// The displayed position changed (move, navigation or reset).
    PositionChanged {
        fen: String,
        cursor: usize,
        history_len: usize,
    },
    SelectionChanged(Option<Square>),
    PromotionPending(PendingPromotion),
    PromotionCleared,
    OrientationChanged(PieceColor),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&BoardEvent)>;

#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    pub fn add(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn emit(&mut self, event: BoardEvent) {
        tracing::trace!(?event, "board event");
        for (_, listener) in self.entries.iter_mut() {
            listener(&event);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
