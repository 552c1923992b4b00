//! Moving between selection steps.

use crate::action::complete::commit_round;
use crate::action::{CommandKind, Effect, SheetError, SheetTransition};
use crate::state::{GameType, ScoreSheet, Step};

/// Explicitly moves on from with/without or from the modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProceedCommand;

impl SheetTransition for ProceedCommand {
    type Error = SheetError;
    type Result = ();

    fn pre_validate(&self, sheet: &ScoreSheet) -> Result<(), Self::Error> {
        match sheet.step() {
            Step::SelectingWithWithout | Step::SelectingModifiers => Ok(()),
            Step::Completed => Err(SheetError::SeriesComplete),
            step => Err(SheetError::StepMismatch {
                command: CommandKind::Proceed,
                step,
            }),
        }
    }

    fn apply(&self, sheet: &mut ScoreSheet) -> Result<(), Self::Error> {
        sheet.step = match sheet.step {
            Step::SelectingWithWithout => Step::SelectingModifiers,
            Step::SelectingModifiers => Step::SelectingOutcome,
            step => step,
        };
        Ok(())
    }
}

/// Steps back one selection, discarding the choice made on the step left behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackCommand;

impl SheetTransition for BackCommand {
    type Error = SheetError;
    type Result = ();

    fn pre_validate(&self, sheet: &ScoreSheet) -> Result<(), Self::Error> {
        match sheet.step() {
            Step::SelectingPlayer => Err(SheetError::AtFirstStep),
            Step::Completed => Err(SheetError::SeriesComplete),
            _ => Ok(()),
        }
    }

    fn apply(&self, sheet: &mut ScoreSheet) -> Result<(), Self::Error> {
        let round = &mut sheet.current;
        sheet.step = match sheet.step {
            Step::SelectingOutcome => Step::SelectingModifiers,
            Step::SelectingModifiers if round.game_type != Some(GameType::Null) => {
                Step::SelectingWithWithout
            }
            Step::SelectingModifiers | Step::SelectingWithWithout => {
                round.clear_contract();
                Step::SelectingGameType
            }
            Step::SelectingGameType => {
                round.player = None;
                round.clear_contract();
                Step::SelectingPlayer
            }
            step => step,
        };
        Ok(())
    }
}

/// Records the current round as passed: no player, no points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassCommand;

impl SheetTransition for PassCommand {
    type Error = SheetError;
    type Result = Vec<Effect>;

    fn pre_validate(&self, sheet: &ScoreSheet) -> Result<(), Self::Error> {
        SheetError::ensure_step(sheet, CommandKind::Pass, Step::SelectingPlayer)
    }

    fn apply(&self, sheet: &mut ScoreSheet) -> Result<Self::Result, Self::Error> {
        sheet.current.player = None;
        sheet.current.clear_contract();
        sheet.current.game_type = Some(GameType::Passed);
        Ok(commit_round(sheet, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{SelectGameTypeCommand, SelectPlayerCommand};
    use crate::config::{SeriesConfig, TableMode};
    use crate::state::{ParticipantIndex, RoundValue};

    fn sheet() -> ScoreSheet {
        ScoreSheet::new(SeriesConfig::new(TableMode::Four).with_total_rounds(3), "test").unwrap()
    }

    fn to_modifiers(sheet: &mut ScoreSheet, game_type: GameType) {
        SelectPlayerCommand {
            player: ParticipantIndex(1),
        }
        .apply(sheet)
        .unwrap();
        SelectGameTypeCommand { game_type }.apply(sheet).unwrap();
        if !game_type.is_null() {
            ProceedCommand.apply(sheet).unwrap();
        }
    }

    #[test]
    fn back_walks_suit_round_to_start() {
        let mut sheet = sheet();
        to_modifiers(&mut sheet, GameType::Spades);
        ProceedCommand.apply(&mut sheet).unwrap();
        assert_eq!(sheet.step(), Step::SelectingOutcome);

        let expected = [
            Step::SelectingModifiers,
            Step::SelectingWithWithout,
            Step::SelectingGameType,
            Step::SelectingPlayer,
        ];
        for step in expected {
            BackCommand.pre_validate(&sheet).unwrap();
            BackCommand.apply(&mut sheet).unwrap();
            assert_eq!(sheet.step(), step);
        }

        assert_eq!(sheet.current().player, None);
        assert_eq!(sheet.current().game_type, None);
        assert_eq!(BackCommand.pre_validate(&sheet), Err(SheetError::AtFirstStep));
    }

    #[test]
    fn back_from_null_modifiers_returns_to_game_type() {
        let mut sheet = sheet();
        to_modifiers(&mut sheet, GameType::Null);

        BackCommand.apply(&mut sheet).unwrap();

        assert_eq!(sheet.step(), Step::SelectingGameType);
        assert_eq!(sheet.current().game_type, None);
        assert_eq!(sheet.current().player, Some(ParticipantIndex(1)));
    }

    #[test]
    fn proceed_is_explicit_only_after_with_without_and_modifiers() {
        let sheet = sheet();
        assert_eq!(
            ProceedCommand.pre_validate(&sheet),
            Err(SheetError::StepMismatch {
                command: CommandKind::Proceed,
                step: Step::SelectingPlayer,
            })
        );
    }

    #[test]
    fn pass_completes_round_without_touching_aggregates() {
        let mut sheet = sheet();
        let before = sheet.aggregates().to_vec();

        PassCommand.pre_validate(&sheet).unwrap();
        let effects = PassCommand.apply(&mut sheet).unwrap();

        let passed = sheet.round(1).unwrap();
        assert!(passed.completed);
        assert_eq!(passed.game_type, Some(GameType::Passed));
        assert_eq!(passed.awarded, Some(RoundValue::ZERO));
        assert_eq!(sheet.aggregates(), before.as_slice());
        assert_eq!(sheet.current().number, 2);
        assert_eq!(sheet.last_updated(), None);
        assert!(matches!(effects.as_slice(), [Effect::PersistRound(_)]));
    }
}
