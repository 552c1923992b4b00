/// Contract declared by the player for a round.
///
/// `Passed` is not a contract in the card-game sense: every participant
/// passed and the round is recorded without a player and without points.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GameType {
    Clubs,
    Spades,
    Hearts,
    Diamonds,
    Grand,
    Null,
    Passed,
}

impl GameType {
    /// Base value of suit and grand contracts.
    ///
    /// Returns `None` for Null (its value depends on hand/ouvert) and Passed.
    pub const fn suit_base_value(self) -> Option<i32> {
        match self {
            Self::Diamonds => Some(9),
            Self::Hearts => Some(10),
            Self::Spades => Some(11),
            Self::Clubs => Some(12),
            Self::Grand => Some(24),
            Self::Null | Self::Passed => None,
        }
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn is_passed(self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Whether the player held the top trumps ("with") or lacked them ("without").
///
/// Only informational for scoring; the count itself lives in
/// [`super::Round::multiplier_bonus`].
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
pub enum TrumpChoice {
    #[default]
    With,
    Without,
}
