use chess::{Codec, PieceKind, Position};

use crate::resolver::{resolve_complete, AppliedMove, MoveOutcome, PendingPromotion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromotionState {
    #[default]
    Idle,
    AwaitingRole(PendingPromotion),
}

/// What `resolve` did with the pending move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromotionResolution {
    NothingPending,
    Cancelled(PendingPromotion),
    Committed(AppliedMove),
    /// The chosen role did not produce a legal move.
    Rejected(PendingPromotion),
}

/// Holds at most one move waiting for its promotion role.
#[derive(Debug, Clone, Default)]
pub struct PromotionFlow {
    state: PromotionState,
}

impl PromotionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PromotionState {
        self.state
    }

    pub fn pending(&self) -> Option<PendingPromotion> {
        match self.state {
            PromotionState::Idle => None,
            PromotionState::AwaitingRole(pending) => Some(pending),
        }
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self.state, PromotionState::AwaitingRole(_))
    }

    /// Enter `AwaitingRole`. Refused while another promotion is pending.
    pub fn begin(&mut self, pending: PendingPromotion) -> bool {
        if self.is_awaiting() {
            tracing::debug!("Promotion already pending, ignoring {:?}", pending);
            return false;
        }
        self.state = PromotionState::AwaitingRole(pending);
        true
    }

    /// Drop the pending move without playing it.
    pub fn cancel(&mut self) -> Option<PendingPromotion> {
        let pending = self.pending();
        self.state = PromotionState::Idle;
        pending
    }

    /// Finish the sub-flow. Always leaves the flow `Idle`; the caller commits
    /// the position of a `Committed` resolution.
    pub fn resolve<C: Codec>(
        &mut self,
        codec: &C,
        position: &Position,
        role: Option<PieceKind>,
    ) -> PromotionResolution {
        let Some(pending) = self.cancel() else {
            return PromotionResolution::NothingPending;
        };

        let Some(role) = role else {
            tracing::debug!("Promotion {:?} cancelled", pending);
            return PromotionResolution::Cancelled(pending);
        };

        match resolve_complete(codec, position, pending.with_role(role)) {
            MoveOutcome::Success(applied) => PromotionResolution::Committed(applied),
            MoveOutcome::Illegal | MoveOutcome::Promotion(_) => {
                tracing::debug!("Promotion of {:?} to {} rejected", pending, role);
                PromotionResolution::Rejected(pending)
            }
        }
    }
}
