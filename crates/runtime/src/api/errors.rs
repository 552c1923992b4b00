//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, and the score sheet
//! so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use skat_core::{ConfigError, ExecuteError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("sheet worker command channel closed")]
    CommandChannelClosed,

    #[error("sheet worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    /// The score sheet refused the command; nothing changed.
    #[error(transparent)]
    Rejected(#[from] ExecuteError),

    #[error("invalid series configuration")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("failed to initialize score sync client")]
    SyncClient(#[source] crate::sync::SyncError),
}

impl RuntimeError {
    /// The sheet rejection behind this error, if any.
    pub fn rejection(&self) -> Option<&ExecuteError> {
        match self {
            Self::Rejected(error) => Some(error),
            _ => None,
        }
    }
}
