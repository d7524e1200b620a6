//! Board interaction controller.
//!
//! One owned instance per board view. It is the only writer of selection,
//! pending promotion, orientation and history; rendering and statistics
//! read from it and subscribe to its [`BoardEvent`]s.

use chess::{
    Codec, DraftMove, FenError, PieceColor, PieceKind, Position, PositionStatus, Square,
    StandardCodec,
};

use crate::events::{BoardEvent, ListenerId, Listeners};
use crate::history::PositionHistory;
use crate::orientation::Orientation;
use crate::promotion::{PromotionFlow, PromotionResolution};
use crate::resolver::{resolve_complete, resolve_draft, MoveOutcome, PendingPromotion, PlayedMove};

/// Result of a click or drop, for callers that want to react to it.
/// The controller state is already updated when this is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEffect {
    /// Nothing changed.
    Ignored,
    Selected(Square),
    Deselected,
    Moved(PlayedMove),
    PromotionPending(PendingPromotion),
    /// The move was illegal; the target was re-selected if it holds a piece
    /// of the side to move.
    Rejected { reselected: Option<Square> },
}

pub struct BoardController<C: Codec = StandardCodec> {
    codec: C,
    start: Position,
    history: PositionHistory,
    selected: Option<Square>,
    promotion: PromotionFlow,
    /// Selection in effect when the pending promotion began, restored if
    /// the promotion does not complete.
    parked_selection: Option<Square>,
    orientation: Orientation,
    listeners: Listeners,
}

impl BoardController<StandardCodec> {
    /// A board at the standard starting position, white at the bottom.
    pub fn new() -> Self {
        Self::with_codec(StandardCodec, Position::initial())
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let start = StandardCodec.parse(fen)?;
        Ok(Self::with_codec(StandardCodec, start))
    }
}

impl Default for BoardController<StandardCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Codec> BoardController<C> {
    pub fn with_codec(codec: C, start: Position) -> Self {
        Self {
            codec,
            history: PositionHistory::new(start.clone()),
            start,
            selected: None,
            promotion: PromotionFlow::new(),
            parked_selection: None,
            orientation: Orientation::default(),
            listeners: Listeners::default(),
        }
    }

    pub fn with_orientation(mut self, bottom: PieceColor) -> Self {
        self.orientation = Orientation::new(bottom);
        self
    }

    // --- Queries ---

    pub fn current(&self) -> &Position {
        self.history.current()
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn history(&self) -> &PositionHistory {
        &self.history
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.promotion.pending()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The side whose perspective statistics are requested for.
    pub fn play_as(&self) -> PieceColor {
        self.orientation.bottom()
    }

    pub fn cursor(&self) -> usize {
        self.history.cursor()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_step_back(&self) -> bool {
        self.history.can_step_back()
    }

    pub fn can_step_forward(&self) -> bool {
        self.history.can_step_forward()
    }

    pub fn last_move(&self) -> Option<&PlayedMove> {
        self.history.last_move()
    }

    pub fn status(&self) -> PositionStatus {
        self.current().status()
    }

    /// Destinations of the selected piece, for highlighting.
    pub fn selection_destinations(&self) -> Vec<Square> {
        match self.selected {
            Some(square) => self.codec.legal_destinations(self.current(), square),
            None => Vec::new(),
        }
    }

    // --- Observers ---

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&BoardEvent) + 'static,
    {
        self.listeners.add(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    // --- Input ---

    /// Two-click move entry.
    pub fn click(&mut self, square: Square) -> InputEffect {
        if self.promotion.is_awaiting() {
            tracing::debug!("Click ignored while a promotion is pending");
            return InputEffect::Ignored;
        }

        match self.selected {
            None => self.select_own(square),
            Some(selected) if selected == square => {
                self.set_selected(None);
                InputEffect::Deselected
            }
            Some(selected) => self.settle(DraftMove::new(selected, square)),
        }
    }

    /// A piece dragged from `from` and released on `to`. Releasing on the
    /// origin toggles selection like a click on that square.
    pub fn drop_piece(&mut self, from: Square, to: Square) -> InputEffect {
        if self.promotion.is_awaiting() {
            tracing::debug!("Drop ignored while a promotion is pending");
            return InputEffect::Ignored;
        }

        if from == to {
            if self.selected == Some(from) {
                self.set_selected(None);
                return InputEffect::Deselected;
            }
            return self.select_own(from);
        }

        self.settle(DraftMove::new(from, to))
    }

    /// Select a square holding a piece of the side to move.
    pub fn select(&mut self, square: Square) -> bool {
        if self.promotion.is_awaiting() {
            return false;
        }
        matches!(self.select_own(square), InputEffect::Selected(_))
    }

    pub fn deselect(&mut self) {
        self.set_selected(None);
    }

    /// Try a move directly, bypassing click selection. Without a role a
    /// pawn reaching its last rank starts the promotion sub-flow.
    pub fn attempt_move(&mut self, from: Square, to: Square, role: Option<PieceKind>) -> MoveOutcome {
        if self.promotion.is_awaiting() {
            tracing::debug!("Move attempt ignored while a promotion is pending");
            return MoveOutcome::Illegal;
        }

        let draft = DraftMove::new(from, to);
        let outcome = match role {
            None => resolve_draft(&self.codec, self.current(), draft),
            Some(role) => resolve_complete(&self.codec, self.current(), draft.with_role(role)),
        };

        match &outcome {
            MoveOutcome::Success(applied) => {
                self.commit(applied.position.clone(), applied.played.clone());
                self.set_selected(None);
            }
            MoveOutcome::Promotion(pending) => self.begin_promotion(*pending),
            MoveOutcome::Illegal => {}
        }

        outcome
    }

    /// Finish a pending promotion with a role, or cancel it with `None`.
    pub fn resolve_promotion(&mut self, role: Option<PieceKind>) -> PromotionResolution {
        let resolution = self
            .promotion
            .resolve(&self.codec, self.history.current(), role);

        match &resolution {
            PromotionResolution::NothingPending => return resolution,
            PromotionResolution::Committed(applied) => {
                self.parked_selection = None;
                self.commit(applied.position.clone(), applied.played.clone());
                self.set_selected(None);
            }
            PromotionResolution::Cancelled(_) | PromotionResolution::Rejected(_) => {
                let parked = self.parked_selection.take();
                self.set_selected(parked);
            }
        }

        self.listeners.emit(BoardEvent::PromotionCleared);
        resolution
    }

    // --- Commands ---

    /// Back to the starting position with a single-entry history.
    pub fn reset_board(&mut self) {
        self.abandon_promotion();
        self.set_selected(None);
        self.history.reset(self.start.clone());
        tracing::info!("Board reset to {}", self.start);
        self.emit_position();
    }

    pub fn flip_orientation(&mut self) {
        self.orientation.flip();
        self.listeners
            .emit(BoardEvent::OrientationChanged(self.orientation.bottom()));
    }

    pub fn step_back(&mut self) -> bool {
        self.navigate(PositionHistory::step_back)
    }

    pub fn step_forward(&mut self) -> bool {
        self.navigate(PositionHistory::step_forward)
    }

    pub fn jump_to_start(&mut self) -> bool {
        self.navigate(PositionHistory::jump_to_start)
    }

    pub fn jump_to_live(&mut self) -> bool {
        self.navigate(PositionHistory::jump_to_live)
    }

    // --- Internal ---

    fn navigate(&mut self, step: fn(&mut PositionHistory) -> bool) -> bool {
        if !step(&mut self.history) {
            return false;
        }
        // A selection or pending move belongs to the position it was made on.
        self.abandon_promotion();
        self.set_selected(None);
        self.emit_position();
        true
    }

    fn select_own(&mut self, square: Square) -> InputEffect {
        if self.current().has_own_piece(square) {
            self.set_selected(Some(square));
            InputEffect::Selected(square)
        } else {
            InputEffect::Ignored
        }
    }

    /// Run a two-square move through the resolver and settle selection.
    fn settle(&mut self, draft: DraftMove) -> InputEffect {
        match resolve_draft(&self.codec, self.current(), draft) {
            MoveOutcome::Success(applied) => {
                self.commit(applied.position, applied.played.clone());
                self.set_selected(None);
                InputEffect::Moved(applied.played)
            }
            MoveOutcome::Promotion(pending) => {
                self.begin_promotion(pending);
                InputEffect::PromotionPending(pending)
            }
            MoveOutcome::Illegal => {
                let reselected = self
                    .current()
                    .has_own_piece(draft.to)
                    .then_some(draft.to);
                self.set_selected(reselected);
                InputEffect::Rejected { reselected }
            }
        }
    }

    fn begin_promotion(&mut self, pending: PendingPromotion) {
        if self.promotion.begin(pending) {
            self.parked_selection = self.selected;
            self.set_selected(None);
            self.listeners.emit(BoardEvent::PromotionPending(pending));
        }
    }

    fn abandon_promotion(&mut self) {
        self.parked_selection = None;
        if self.promotion.cancel().is_some() {
            self.listeners.emit(BoardEvent::PromotionCleared);
        }
    }

    fn commit(&mut self, position: Position, played: PlayedMove) {
        tracing::info!("Played {} ({})", played.san, played.mv);
        let dropped = self.history.commit_move(position, played);
        if dropped > 0 {
            tracing::debug!("Discarded {} positions ahead of the cursor", dropped);
        }
        self.emit_position();
    }

    fn set_selected(&mut self, square: Option<Square>) {
        if self.selected != square {
            self.selected = square;
            self.listeners.emit(BoardEvent::SelectionChanged(square));
        }
    }

    fn emit_position(&mut self) {
        let event = BoardEvent::PositionChanged {
            fen: self.current().fen().to_string(),
            cursor: self.history.cursor(),
            history_len: self.history.len(),
        };
        self.listeners.emit(event);
    }
}

impl<C: Codec> std::fmt::Debug for BoardController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardController")
            .field("current", &self.current().fen())
            .field("selected", &self.selected)
            .field("pending_promotion", &self.promotion.pending())
            .field("orientation", &self.orientation.bottom())
            .field("cursor", &self.history.cursor())
            .field("history_len", &self.history.len())
            .finish()
    }
}
