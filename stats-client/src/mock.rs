//! Mock StatsService implementation for testing

use crate::error::{StatsError, StatsResult};
use crate::traits::StatsService;
use crate::types::{MoveStat, StatsQuery};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

type Responder = Box<dyn Fn(&StatsQuery) -> StatsResult<Vec<MoveStat>> + Send>;

/// Mock service for testing - only compiled in test mode or with mock feature
#[cfg(any(test, feature = "mock"))]
#[derive(Clone)]
pub struct MockStatsService {
    responder: Arc<Mutex<Option<Responder>>>,
    call_log: Arc<Mutex<Vec<StatsQuery>>>,
}

#[cfg(any(test, feature = "mock"))]
impl Default for MockStatsService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "mock"))]
impl MockStatsService {
    pub fn new() -> Self {
        Self {
            responder: Arc::new(Mutex::new(None)),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Configure move_stats response
    pub fn with_response<F>(self, f: F) -> Self
    where
        F: Fn(&StatsQuery) -> StatsResult<Vec<MoveStat>> + Send + 'static,
    {
        *self.responder.lock().unwrap() = Some(Box::new(f));
        self
    }

    /// Answer every query with the same stats
    pub fn with_stats(self, stats: Vec<MoveStat>) -> Self {
        self.with_response(move |_| Ok(stats.clone()))
    }

    /// Get recorded calls for verification
    pub fn get_calls(&self) -> Vec<StatsQuery> {
        self.call_log.lock().unwrap().clone()
    }

    /// Clear call history
    pub fn clear_calls(&self) {
        self.call_log.lock().unwrap().clear()
    }
}

#[cfg(any(test, feature = "mock"))]
#[async_trait]
impl StatsService for MockStatsService {
    async fn move_stats(&self, query: &StatsQuery) -> StatsResult<Vec<MoveStat>> {
        self.call_log.lock().unwrap().push(query.clone());

        let responder = self.responder.lock().unwrap();
        if let Some(ref f) = *responder {
            f(query)
        } else {
            Err(StatsError::NotConfigured("move_stats".to_string()))
        }
    }
}
