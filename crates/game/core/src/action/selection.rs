//! Selection commands for the round currently being entered.

use crate::action::{CommandKind, SheetError, SheetTransition};
use crate::state::{GameType, Modifier, ParticipantIndex, ScoreSheet, Step, TrumpChoice};

/// Chooses the declaring player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectPlayerCommand {
    pub player: ParticipantIndex,
}

impl SheetTransition for SelectPlayerCommand {
    type Error = SheetError;
    type Result = ();

    fn pre_validate(&self, sheet: &ScoreSheet) -> Result<(), Self::Error> {
        SheetError::ensure_step(sheet, CommandKind::SelectPlayer, Step::SelectingPlayer)?;

        let participants = sheet.config().participants();
        if self.player.0 >= participants {
            return Err(SheetError::ParticipantOutOfRange {
                participant: self.player,
                participants,
            });
        }

        let dealer = sheet.current().dealer;
        if !sheet.config().mode.dealer_may_play() && self.player == dealer {
            return Err(SheetError::DealerCannotPlay { dealer });
        }

        Ok(())
    }

    fn apply(&self, sheet: &mut ScoreSheet) -> Result<(), Self::Error> {
        sheet.current.player = Some(self.player);
        sheet.step = Step::SelectingGameType;
        Ok(())
    }
}

/// Chooses the contract. Resets every modifier chosen before.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectGameTypeCommand {
    pub game_type: GameType,
}

impl SheetTransition for SelectGameTypeCommand {
    type Error = SheetError;
    type Result = ();

    fn pre_validate(&self, sheet: &ScoreSheet) -> Result<(), Self::Error> {
        SheetError::ensure_step(sheet, CommandKind::SelectGameType, Step::SelectingGameType)?;
        if self.game_type.is_passed() {
            return Err(SheetError::PassedNotSelectable);
        }
        Ok(())
    }

    fn apply(&self, sheet: &mut ScoreSheet) -> Result<(), Self::Error> {
        sheet.current.game_type = Some(self.game_type);
        sheet.current.reset_contract_details();
        sheet.step = if self.game_type.is_null() {
            Step::SelectingModifiers
        } else {
            Step::SelectingWithWithout
        };
        Ok(())
    }
}

/// Records whether the player played with or without the top trumps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChooseTrumpCommand {
    pub choice: TrumpChoice,
}

impl SheetTransition for ChooseTrumpCommand {
    type Error = SheetError;
    type Result = ();

    fn pre_validate(&self, sheet: &ScoreSheet) -> Result<(), Self::Error> {
        SheetError::ensure_step(sheet, CommandKind::ChooseTrump, Step::SelectingWithWithout)
    }

    fn apply(&self, sheet: &mut ScoreSheet) -> Result<(), Self::Error> {
        sheet.current.trump_choice = self.choice;
        Ok(())
    }
}

/// Raises or lowers the matador count; never drops below zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjustMultiplierCommand {
    pub delta: i8,
}

impl SheetTransition for AdjustMultiplierCommand {
    type Error = SheetError;
    type Result = ();

    fn pre_validate(&self, sheet: &ScoreSheet) -> Result<(), Self::Error> {
        SheetError::ensure_step(
            sheet,
            CommandKind::AdjustMultiplier,
            Step::SelectingWithWithout,
        )
    }

    fn apply(&self, sheet: &mut ScoreSheet) -> Result<(), Self::Error> {
        let bonus = &mut sheet.current.multiplier_bonus;
        *bonus = bonus.saturating_add_signed(self.delta);
        Ok(())
    }
}

/// Flips one modifier flag on the current round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToggleModifierCommand {
    pub modifier: Modifier,
}

impl SheetTransition for ToggleModifierCommand {
    type Error = SheetError;
    type Result = ();

    fn pre_validate(&self, sheet: &ScoreSheet) -> Result<(), Self::Error> {
        SheetError::ensure_step(sheet, CommandKind::ToggleModifier, Step::SelectingModifiers)?;

        let game_type = sheet.current().game_type;
        if !self.modifier.is_available_for(game_type) {
            return Err(SheetError::ModifierUnavailable {
                modifier: self.modifier,
                game_type,
            });
        }
        Ok(())
    }

    fn apply(&self, sheet: &mut ScoreSheet) -> Result<(), Self::Error> {
        sheet.current.modifiers.toggle(self.modifier.flag());
        Ok(())
    }
}
