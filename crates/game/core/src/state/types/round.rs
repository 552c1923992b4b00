use super::{GameType, Modifiers, ParticipantIndex, TrumpChoice};

/// Point values produced by scoring a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundValue {
    /// Game value credited (won) or debited (lost, already doubled and negated).
    pub base_points: i32,
    /// Base points plus the +50 / -50 outcome adjustment.
    pub total_points: i32,
    /// Bonus credited to every non-player participant when the player lost.
    pub defender_bonus: i32,
}

impl RoundValue {
    pub const ZERO: Self = Self {
        base_points: 0,
        total_points: 0,
        defender_bonus: 0,
    };
}

/// One numbered round of a series.
///
/// Rounds are created up front for the whole series and mutated in place;
/// `number` never changes after creation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Round {
    /// 1-based position inside the series.
    pub number: u32,
    pub dealer: ParticipantIndex,
    pub player: Option<ParticipantIndex>,
    pub game_type: Option<GameType>,
    pub trump_choice: TrumpChoice,
    /// Matadors counted on top of the base multiplier of one.
    pub multiplier_bonus: u8,
    pub modifiers: Modifiers,
    pub completed: bool,
    pub won: bool,
    /// Value applied to the aggregates when the round was completed.
    ///
    /// Kept so that an edit can reverse exactly what was applied.
    pub awarded: Option<RoundValue>,
    pub editing: bool,
}

impl Round {
    /// Creates an empty round awaiting a player selection.
    pub fn new(number: u32, dealer: ParticipantIndex) -> Self {
        Self {
            number,
            dealer,
            player: None,
            game_type: None,
            trump_choice: TrumpChoice::default(),
            multiplier_bonus: 0,
            modifiers: Modifiers::empty(),
            completed: false,
            won: false,
            awarded: None,
            editing: false,
        }
    }

    /// True for a completed round that was passed in.
    pub fn is_passed(&self) -> bool {
        self.game_type.is_some_and(GameType::is_passed)
    }

    /// Clears every contract detail chosen after the player.
    pub(crate) fn clear_contract(&mut self) {
        self.game_type = None;
        self.reset_contract_details();
    }

    /// Resets modifiers and the with/without selection to their defaults.
    pub(crate) fn reset_contract_details(&mut self) {
        self.trump_choice = TrumpChoice::default();
        self.multiplier_bonus = 0;
        self.modifiers = Modifiers::empty();
    }
}
