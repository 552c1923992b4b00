//! Series configuration: table size, length and dealer rotation.

use crate::rotation::DealerRotation;
use crate::state::ParticipantIndex;

/// Number of participants at the table.
///
/// With four participants the dealer sits out every round, so the dealer can
/// never be the player and defenders earn a smaller bonus.
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
pub enum TableMode {
    Three,
    #[default]
    Four,
}

impl TableMode {
    pub const fn participants(self) -> u8 {
        match self {
            Self::Three => 3,
            Self::Four => 4,
        }
    }

    /// Points credited to each defender when the player loses.
    pub const fn defender_bonus(self) -> i32 {
        match self {
            Self::Three => 40,
            Self::Four => 30,
        }
    }

    pub const fn dealer_may_play(self) -> bool {
        matches!(self, Self::Three)
    }

    /// Series length used when none is configured.
    pub const fn default_total_rounds(self) -> u32 {
        match self {
            Self::Three => 36,
            Self::Four => 48,
        }
    }

    pub fn from_participants(count: u8) -> Result<Self, ConfigError> {
        match count {
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            other => Err(ConfigError::UnsupportedParticipantCount(other)),
        }
    }
}

/// Static parameters of a series, fixed when the series starts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesConfig {
    pub mode: TableMode,
    pub total_rounds: u32,
    pub rotation: DealerRotation,
    pub first_dealer: ParticipantIndex,
    /// Display names by seat. Empty when the table is unnamed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub participant_names: Vec<String>,
}

impl SeriesConfig {
    /// Upper bound on participants, used to size aggregate tables.
    pub const MAX_PARTICIPANTS: usize = 4;

    pub fn new(mode: TableMode) -> Self {
        Self {
            mode,
            total_rounds: mode.default_total_rounds(),
            rotation: DealerRotation::default_for(mode),
            first_dealer: ParticipantIndex::FIRST,
            participant_names: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_total_rounds(mut self, total_rounds: u32) -> Self {
        self.total_rounds = total_rounds;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: DealerRotation) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub fn with_first_dealer(mut self, first_dealer: ParticipantIndex) -> Self {
        self.first_dealer = first_dealer;
        self
    }

    #[must_use]
    pub fn with_participant_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participant_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn participant_name(&self, participant: ParticipantIndex) -> Option<&str> {
        self.participant_names
            .get(participant.index())
            .map(String::as_str)
    }

    #[inline]
    pub fn participants(&self) -> u8 {
        self.mode.participants()
    }

    /// Dealer assigned to the round with the given 1-based number.
    pub fn dealer_for_round(&self, number: u32) -> ParticipantIndex {
        self.rotation
            .dealer_for(self.mode, self.first_dealer, number.saturating_sub(1))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        if self.first_dealer.0 >= self.participants() {
            return Err(ConfigError::FirstDealerOutOfRange {
                dealer: self.first_dealer,
                participants: self.participants(),
            });
        }
        let names = self.participant_names.len();
        if names != 0 && names != usize::from(self.participants()) {
            return Err(ConfigError::ParticipantNames {
                expected: self.participants(),
                found: names,
            });
        }
        Ok(())
    }
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self::new(TableMode::default())
    }
}

/// Errors raised while validating a [`SeriesConfig`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("a series needs at least one round")]
    NoRounds,

    #[error("first dealer {dealer} is not seated at a table of {participants}")]
    FirstDealerOutOfRange {
        dealer: ParticipantIndex,
        participants: u8,
    },

    #[error("unsupported participant count {0}, expected 3 or 4")]
    UnsupportedParticipantCount(u8),

    #[error("expected {expected} participant names, found {found}")]
    ParticipantNames { expected: u8, found: usize },
}
