//! Error types for the command pipeline.

use crate::action::{CommandKind, SheetError};
use crate::error::{ErrorSeverity, SkatError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// A command rejected by [`super::SheetEngine`]. The sheet is unchanged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{command} command failed: {failure}")]
pub struct ExecuteError {
    pub command: CommandKind,
    pub failure: TransitionPhaseError<SheetError>,
}

impl ExecuteError {
    pub fn new(command: CommandKind, failure: TransitionPhaseError<SheetError>) -> Self {
        Self { command, failure }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.failure.phase
    }

    pub fn sheet_error(&self) -> &SheetError {
        &self.failure.error
    }
}

impl SkatError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self.failure.phase {
            TransitionPhase::PreValidate => self.failure.error.severity(),
            TransitionPhase::Apply | TransitionPhase::PostValidate => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        self.failure.error.error_code()
    }
}
