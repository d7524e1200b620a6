//! StatsService trait abstraction for statistics backends

use crate::error::StatsResult;
use crate::types::{MoveStat, StatsQuery};
use async_trait::async_trait;

/// Move statistics source.
/// Implemented by the local game library and MockStatsService
#[async_trait]
pub trait StatsService: Send + Sync {
    /// Moves the player made from the queried position, one entry per move
    async fn move_stats(&self, query: &StatsQuery) -> StatsResult<Vec<MoveStat>>;
}
