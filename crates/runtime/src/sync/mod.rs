//! Remote score service clients.
//!
//! Aggregate updates produced by completed rounds are pushed to a remote
//! service by the sync worker. [`ScoreSync`] abstracts the transport so the
//! runtime can run without a remote ([`NoopScoreSync`]) or against a test
//! double ([`MockScoreSync`]).

mod http;
mod mock;

pub use http::HttpScoreSync;
pub use mock::MockScoreSync;

use async_trait::async_trait;
use thiserror::Error;

use skat_core::AggregateUpdate;

/// Errors raised while pushing an update to the score service.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("request to score service failed")]
    Transport(#[from] reqwest::Error),

    #[error("score service responded with status {status}")]
    Status { status: u16 },

    #[error("score service rejected the update: {0}")]
    Rejected(String),

    #[error("score service unavailable: {0}")]
    Unavailable(String),
}

/// Pushes per-participant totals to a remote score service.
#[async_trait]
pub trait ScoreSync: Send + Sync {
    async fn push(&self, update: &AggregateUpdate) -> Result<(), SyncError>;
}

/// Used when no remote service is configured. Accepts every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopScoreSync;

#[async_trait]
impl ScoreSync for NoopScoreSync {
    async fn push(&self, update: &AggregateUpdate) -> Result<(), SyncError> {
        tracing::trace!(
            participant = %update.participant,
            total_points = update.total_points,
            "no score service configured; update dropped"
        );
        Ok(())
    }
}
