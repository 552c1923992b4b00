use bitflags::bitflags;

use super::GameType;

bitflags! {
    /// Modifier flags declared or achieved in a round.
    ///
    /// Each set flag adds one to the multiplier of suit and grand contracts.
    /// Null contracts only look at `HAND` and `OUVERT`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u8 {
        const HAND                = 1 << 0;
        const SCHNEIDER           = 1 << 1;
        const SCHNEIDER_ANNOUNCED = 1 << 2;
        const SCHWARZ             = 1 << 3;
        const SCHWARZ_ANNOUNCED   = 1 << 4;
        const OUVERT              = 1 << 5;
    }
}

impl Modifiers {
    /// Flags that make sense for a Null contract.
    pub const NULL_APPLICABLE: Self = Self::HAND.union(Self::OUVERT);

    /// Number of set flags, i.e. their contribution to the multiplier.
    #[inline]
    pub const fn multiplier_steps(self) -> i32 {
        self.bits().count_ones() as i32
    }

    /// Flags a player may toggle for the given contract.
    ///
    /// Nothing is available while no contract is chosen or for a passed round.
    pub const fn available_for(game_type: Option<GameType>) -> Self {
        match game_type {
            None | Some(GameType::Passed) => Self::empty(),
            Some(GameType::Null) => Self::NULL_APPLICABLE,
            Some(_) => Self::all(),
        }
    }
}

/// A single toggleable modifier, the command-level view of [`Modifiers`].
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
pub enum Modifier {
    Hand,
    Schneider,
    SchneiderAnnounced,
    Schwarz,
    SchwarzAnnounced,
    Ouvert,
}

impl Modifier {
    pub const fn flag(self) -> Modifiers {
        match self {
            Self::Hand => Modifiers::HAND,
            Self::Schneider => Modifiers::SCHNEIDER,
            Self::SchneiderAnnounced => Modifiers::SCHNEIDER_ANNOUNCED,
            Self::Schwarz => Modifiers::SCHWARZ,
            Self::SchwarzAnnounced => Modifiers::SCHWARZ_ANNOUNCED,
            Self::Ouvert => Modifiers::OUVERT,
        }
    }

    pub const fn is_available_for(self, game_type: Option<GameType>) -> bool {
        Modifiers::available_for(game_type).contains(self.flag())
    }
}
