//! Rejection reasons for score sheet commands.

use crate::action::CommandKind;
use crate::error::{ErrorSeverity, SkatError};
use crate::state::{GameType, Modifier, ParticipantIndex, ScoreSheet, Step};

/// Why a command was rejected. The sheet is left unchanged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SheetError {
    #[error("{command} is not accepted while {step}")]
    StepMismatch { command: CommandKind, step: Step },

    #[error("{participant} is not seated at a table of {participants}")]
    ParticipantOutOfRange {
        participant: ParticipantIndex,
        participants: u8,
    },

    #[error("dealer {dealer} cannot play at a table of four")]
    DealerCannotPlay { dealer: ParticipantIndex },

    #[error("passed rounds are recorded with the pass command")]
    PassedNotSelectable,

    #[error("{modifier} is not available for {game_type:?}")]
    ModifierUnavailable {
        modifier: Modifier,
        game_type: Option<GameType>,
    },

    #[error("round has no player")]
    MissingPlayer,

    #[error("round has no game type")]
    MissingGameType,

    #[error("already at the first selection step")]
    AtFirstStep,

    #[error("every round of the series is completed")]
    SeriesComplete,

    #[error("round {0} does not exist")]
    RoundNotFound(u32),

    #[error("round {0} has not been completed yet")]
    RoundNotCompleted(u32),

    #[error("no round is being edited")]
    NotEditing,
}

impl SheetError {
    /// Rejects `command` unless the sheet is at `expected`.
    pub(crate) fn ensure_step(
        sheet: &ScoreSheet,
        command: CommandKind,
        expected: Step,
    ) -> Result<(), Self> {
        match sheet.step() {
            step if step == expected => Ok(()),
            Step::Completed => Err(Self::SeriesComplete),
            step => Err(Self::StepMismatch { command, step }),
        }
    }
}

impl SkatError for SheetError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::StepMismatch { .. } => "SHEET_STEP_MISMATCH",
            Self::ParticipantOutOfRange { .. } => "SHEET_PARTICIPANT_OUT_OF_RANGE",
            Self::DealerCannotPlay { .. } => "SHEET_DEALER_CANNOT_PLAY",
            Self::PassedNotSelectable => "SHEET_PASSED_NOT_SELECTABLE",
            Self::ModifierUnavailable { .. } => "SHEET_MODIFIER_UNAVAILABLE",
            Self::MissingPlayer => "SHEET_MISSING_PLAYER",
            Self::MissingGameType => "SHEET_MISSING_GAME_TYPE",
            Self::AtFirstStep => "SHEET_AT_FIRST_STEP",
            Self::SeriesComplete => "SHEET_SERIES_COMPLETE",
            Self::RoundNotFound(_) => "SHEET_ROUND_NOT_FOUND",
            Self::RoundNotCompleted(_) => "SHEET_ROUND_NOT_COMPLETED",
            Self::NotEditing => "SHEET_NOT_EDITING",
        }
    }
}
