//! In-memory [`ScoreSync`] for tests and offline runs.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use skat_core::AggregateUpdate;

use super::{ScoreSync, SyncError};

/// Records every pushed update. Can be switched to fail.
#[derive(Debug, Clone, Default)]
pub struct MockScoreSync {
    pushed: Arc<Mutex<Vec<AggregateUpdate>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MockScoreSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent pushes fail with `reason`, or succeed again with `None`.
    pub fn set_failure(&self, reason: Option<&str>) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = reason.map(str::to_owned);
        }
    }

    /// Updates accepted so far, in push order.
    pub fn pushed(&self) -> Vec<AggregateUpdate> {
        self.pushed
            .lock()
            .map(|pushed| pushed.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ScoreSync for MockScoreSync {
    async fn push(&self, update: &AggregateUpdate) -> Result<(), SyncError> {
        let failure = self
            .failure
            .lock()
            .map_err(|_| SyncError::Unavailable("mock lock poisoned".into()))?
            .clone();
        if let Some(reason) = failure {
            return Err(SyncError::Unavailable(reason));
        }

        self.pushed
            .lock()
            .map_err(|_| SyncError::Unavailable("mock lock poisoned".into()))?
            .push(update.clone());
        Ok(())
    }
}
