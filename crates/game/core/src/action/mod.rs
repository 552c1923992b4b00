//! Commands accepted by the score sheet.
//!
//! Every command is a small transition type implementing [`SheetTransition`]
//! and is driven by [`crate::engine::SheetEngine`] through the same
//! three-phase pipeline.
//!
//! # Module Structure
//!
//! - `error`: [`SheetError`], the rejection reasons shared by all commands
//! - `selection`: player, contract, with/without and modifier selection
//! - `navigation`: proceed, back and the passed shortcut
//! - `complete`: scoring a round and advancing the series
//! - `edit`: opening a completed round for editing and rolling it back
//! - `effect`: side effects handed to the runtime after a commit

pub mod complete;
pub mod edit;
pub mod effect;
pub mod error;
pub mod navigation;
pub mod selection;

pub use complete::{CompleteRoundCommand, RoundOutcome};
pub use edit::{CancelEditingCommand, StartEditingCommand};
pub use effect::{AggregateUpdate, Effect, RoundRecord};
pub use error::SheetError;
pub use navigation::{BackCommand, PassCommand, ProceedCommand};
pub use selection::{
    AdjustMultiplierCommand, ChooseTrumpCommand, SelectGameTypeCommand, SelectPlayerCommand,
    ToggleModifierCommand,
};

use crate::state::{GameType, Modifier, ParticipantIndex, ScoreSheet, TrumpChoice};

/// Defines how a command mutates the score sheet.
pub trait SheetTransition {
    type Error;
    type Result;

    /// Validates pre-conditions using the sheet **before** mutation.
    fn pre_validate(&self, _sheet: &ScoreSheet) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the command by mutating the sheet directly.
    fn apply(&self, sheet: &mut ScoreSheet) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the sheet **after** mutation.
    fn post_validate(&self, sheet: &ScoreSheet) -> Result<(), Self::Error> {
        sheet.debug_check_invariants();
        Ok(())
    }
}

/// Discriminant of [`Command`], used in errors and logs.
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
pub enum CommandKind {
    SelectPlayer,
    SelectGameType,
    ChooseTrump,
    AdjustMultiplier,
    ToggleModifier,
    Proceed,
    Back,
    Pass,
    CompleteRound,
    StartEditing,
    CancelEditing,
}

/// A single operation on the score sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    SelectPlayer(SelectPlayerCommand),
    SelectGameType(SelectGameTypeCommand),
    ChooseTrump(ChooseTrumpCommand),
    AdjustMultiplier(AdjustMultiplierCommand),
    ToggleModifier(ToggleModifierCommand),
    Proceed(ProceedCommand),
    Back(BackCommand),
    Pass(PassCommand),
    CompleteRound(CompleteRoundCommand),
    StartEditing(StartEditingCommand),
    CancelEditing(CancelEditingCommand),
}

impl Command {
    pub fn select_player(player: ParticipantIndex) -> Self {
        Self::SelectPlayer(SelectPlayerCommand { player })
    }

    pub fn select_game_type(game_type: GameType) -> Self {
        Self::SelectGameType(SelectGameTypeCommand { game_type })
    }

    pub fn choose_trump(choice: TrumpChoice) -> Self {
        Self::ChooseTrump(ChooseTrumpCommand { choice })
    }

    pub fn adjust_multiplier(delta: i8) -> Self {
        Self::AdjustMultiplier(AdjustMultiplierCommand { delta })
    }

    pub fn toggle_modifier(modifier: Modifier) -> Self {
        Self::ToggleModifier(ToggleModifierCommand { modifier })
    }

    pub fn proceed() -> Self {
        Self::Proceed(ProceedCommand)
    }

    pub fn back() -> Self {
        Self::Back(BackCommand)
    }

    pub fn pass() -> Self {
        Self::Pass(PassCommand)
    }

    pub fn complete(outcome: RoundOutcome) -> Self {
        Self::CompleteRound(CompleteRoundCommand { outcome })
    }

    pub fn start_editing(round_number: u32) -> Self {
        Self::StartEditing(StartEditingCommand { round_number })
    }

    pub fn cancel_editing() -> Self {
        Self::CancelEditing(CancelEditingCommand)
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Self::SelectPlayer(_) => CommandKind::SelectPlayer,
            Self::SelectGameType(_) => CommandKind::SelectGameType,
            Self::ChooseTrump(_) => CommandKind::ChooseTrump,
            Self::AdjustMultiplier(_) => CommandKind::AdjustMultiplier,
            Self::ToggleModifier(_) => CommandKind::ToggleModifier,
            Self::Proceed(_) => CommandKind::Proceed,
            Self::Back(_) => CommandKind::Back,
            Self::Pass(_) => CommandKind::Pass,
            Self::CompleteRound(_) => CommandKind::CompleteRound,
            Self::StartEditing(_) => CommandKind::StartEditing,
            Self::CancelEditing(_) => CommandKind::CancelEditing,
        }
    }
}
