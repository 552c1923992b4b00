//! Event types for different topics.

use serde::{Deserialize, Serialize};

use skat_core::engine::TransitionPhase;
use skat_core::{CommandKind, ParticipantIndex, SeriesStatus, Step};

/// Events related to the score sheet itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SheetEvent {
    /// A command was applied
    CommandApplied { command: CommandKind, step: Step },

    /// A command was rejected; the sheet is unchanged
    CommandRejected {
        command: CommandKind,
        phase: TransitionPhase,
        code: String,
        error: String,
    },

    /// A round was committed, either for the first time or after an edit
    RoundCompleted {
        round_number: u32,
        status: SeriesStatus,
    },
}

/// Outcome of side effects executed by the background workers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EffectEvent {
    /// Remote score service accepted an aggregate update
    Synced {
        participant: ParticipantIndex,
        total_points: i64,
    },

    /// Remote score service could not be updated. Not retried.
    SyncFailed {
        participant: ParticipantIndex,
        error: String,
    },

    /// A round record was written to the repository
    Persisted { series_id: String, round_number: u32 },

    /// A round record could not be written. Not retried.
    PersistFailed {
        series_id: String,
        round_number: u32,
        error: String,
    },
}
