use super::{ParticipantIndex, Round};

/// Selection step of the round currently being entered.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Step {
    #[default]
    SelectingPlayer,
    SelectingGameType,
    SelectingWithWithout,
    SelectingModifiers,
    SelectingOutcome,
    /// Every round of the series is completed.
    Completed,
}

impl Step {
    /// Step a prefilled round resumes at when it is opened for editing.
    ///
    /// A round with both player and contract set goes straight to the outcome;
    /// the caller can still walk back to change earlier selections.
    pub fn resume_point(round: &Round) -> Self {
        match (round.player, round.game_type) {
            (None, _) => Self::SelectingPlayer,
            (Some(_), None) => Self::SelectingGameType,
            (Some(_), Some(_)) => Self::SelectingOutcome,
        }
    }
}

/// Which counter changed in the most recent completion.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    WonCount,
    LostCount,
}

/// Advisory marker of the last aggregate change, used for highlighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LastUpdated {
    pub participant: ParticipantIndex,
    pub stat: StatKind,
}

/// Lifecycle of a series as seen by persistence.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SeriesStatus {
    #[default]
    InProgress,
    Completed,
}
