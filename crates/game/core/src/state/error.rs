//! Errors raised while rebuilding a sheet from persisted data.

use crate::config::ConfigError;
use crate::error::{ErrorSeverity, SkatError};
use crate::state::ParticipantIndex;

/// A persisted series could not be turned back into a consistent sheet.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HydrateError {
    #[error("invalid series configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("stored round {number} is outside a series of {total} rounds")]
    RoundOutOfRange { number: u32, total: u32 },

    #[error("round {0} is stored more than once")]
    DuplicateRound(u32),

    #[error("round {number} names {participant}, who is not seated at this table")]
    ParticipantOutOfRange {
        number: u32,
        participant: ParticipantIndex,
    },

    #[error("round {number} was dealt by {found}, rotation expects {expected}")]
    DealerMismatch {
        number: u32,
        expected: ParticipantIndex,
        found: ParticipantIndex,
    },

    #[error("round {number} was played by its dealer {dealer}")]
    DealerPlayed { number: u32, dealer: ParticipantIndex },

    #[error("expected {expected} aggregates, found {found}")]
    AggregateCount { expected: u8, found: usize },

    #[error("stored aggregates do not match the stored rounds")]
    AggregateMismatch,
}

impl SkatError for HydrateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Config(_) => ErrorSeverity::Validation,
            _ => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "HYDRATE_CONFIG",
            Self::RoundOutOfRange { .. } => "HYDRATE_ROUND_OUT_OF_RANGE",
            Self::DuplicateRound(_) => "HYDRATE_DUPLICATE_ROUND",
            Self::ParticipantOutOfRange { .. } => "HYDRATE_PARTICIPANT_OUT_OF_RANGE",
            Self::DealerMismatch { .. } => "HYDRATE_DEALER_MISMATCH",
            Self::DealerPlayed { .. } => "HYDRATE_DEALER_PLAYED",
            Self::AggregateCount { .. } => "HYDRATE_AGGREGATE_COUNT",
            Self::AggregateMismatch => "HYDRATE_AGGREGATE_MISMATCH",
        }
    }
}
