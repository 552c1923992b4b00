//! Re-opening completed rounds.
//!
//! Starting an edit snapshots the sheet. Committing the edited round goes
//! through the regular completion path; cancelling restores the snapshot
//! verbatim.

use crate::action::{SheetError, SheetTransition};
use crate::state::{EditSession, GameType, ScoreSheet, Step};

/// Opens a completed round for editing.
///
/// If another edit is active it is rolled back first and its round number is
/// returned; the most recent request wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartEditingCommand {
    pub round_number: u32,
}

impl SheetTransition for StartEditingCommand {
    type Error = SheetError;
    type Result = Option<u32>;

    fn pre_validate(&self, sheet: &ScoreSheet) -> Result<(), Self::Error> {
        let round = sheet
            .round(self.round_number)
            .ok_or(SheetError::RoundNotFound(self.round_number))?;
        if !round.completed {
            return Err(SheetError::RoundNotCompleted(self.round_number));
        }
        Ok(())
    }

    fn apply(&self, sheet: &mut ScoreSheet) -> Result<Self::Result, Self::Error> {
        let superseded = sheet.edit.take().map(|session| {
            let number = session.round_number;
            sheet.restore(session.snapshot);
            number
        });

        let snapshot = sheet.capture();
        let mut round = sheet
            .round(self.round_number)
            .cloned()
            .ok_or(SheetError::RoundNotFound(self.round_number))?;

        for stored in sheet.rounds.iter_mut() {
            stored.editing = stored.number == self.round_number;
        }

        round.completed = false;
        round.editing = true;
        if matches!(round.game_type, Some(GameType::Null | GameType::Passed)) {
            round.clear_contract();
        }

        sheet.step = Step::resume_point(&round);
        sheet.current = round;
        sheet.edit = Some(EditSession {
            round_number: self.round_number,
            snapshot,
        });

        Ok(superseded)
    }

    fn post_validate(&self, sheet: &ScoreSheet) -> Result<(), Self::Error> {
        sheet.debug_check_invariants();
        debug_assert_eq!(sheet.editing_round(), Some(self.round_number));
        Ok(())
    }
}

/// Abandons the active edit and restores the sheet as it was before.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CancelEditingCommand;

impl SheetTransition for CancelEditingCommand {
    type Error = SheetError;
    type Result = ();

    fn pre_validate(&self, sheet: &ScoreSheet) -> Result<(), Self::Error> {
        if sheet.is_editing() {
            Ok(())
        } else {
            Err(SheetError::NotEditing)
        }
    }

    fn apply(&self, sheet: &mut ScoreSheet) -> Result<(), Self::Error> {
        let session = sheet.edit.take().ok_or(SheetError::NotEditing)?;
        sheet.restore(session.snapshot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{
        CompleteRoundCommand, Effect, PassCommand, ProceedCommand, RoundOutcome,
        SelectGameTypeCommand, SelectPlayerCommand,
    };
    use crate::config::{SeriesConfig, TableMode};
    use crate::state::{ParticipantIndex, Round};

    fn drive<T: SheetTransition<Error = SheetError>>(
        command: &T,
        sheet: &mut ScoreSheet,
    ) -> Result<T::Result, SheetError> {
        command.pre_validate(sheet)?;
        let result = command.apply(sheet)?;
        command.post_validate(sheet)?;
        Ok(result)
    }

    fn play(sheet: &mut ScoreSheet, player: u8, game_type: GameType, outcome: RoundOutcome) {
        drive(&SelectPlayerCommand { player: ParticipantIndex(player) }, sheet).unwrap();
        drive(&SelectGameTypeCommand { game_type }, sheet).unwrap();
        if !game_type.is_null() {
            drive(&ProceedCommand, sheet).unwrap();
        }
        drive(&ProceedCommand, sheet).unwrap();
        drive(&CompleteRoundCommand { outcome }, sheet).unwrap();
    }

    fn three_rounds_played() -> ScoreSheet {
        let config = SeriesConfig::new(TableMode::Three).with_total_rounds(6);
        let mut sheet = ScoreSheet::new(config, "edit").unwrap();
        play(&mut sheet, 0, GameType::Clubs, RoundOutcome::Won);
        play(&mut sheet, 1, GameType::Null, RoundOutcome::Lost);
        drive(&PassCommand, &mut sheet).unwrap();
        sheet
    }

    #[test]
    fn rejects_missing_and_open_rounds() {
        let sheet = three_rounds_played();
        assert_eq!(
            StartEditingCommand { round_number: 0 }.pre_validate(&sheet),
            Err(SheetError::RoundNotFound(0))
        );
        assert_eq!(
            StartEditingCommand { round_number: 7 }.pre_validate(&sheet),
            Err(SheetError::RoundNotFound(7))
        );
        assert_eq!(
            StartEditingCommand { round_number: 4 }.pre_validate(&sheet),
            Err(SheetError::RoundNotCompleted(4))
        );
    }

    #[test]
    fn suit_round_resumes_at_outcome_with_selections() {
        let mut sheet = three_rounds_played();

        drive(&StartEditingCommand { round_number: 1 }, &mut sheet).unwrap();

        let current = sheet.current();
        assert_eq!(sheet.step(), Step::SelectingOutcome);
        assert_eq!(current.number, 1);
        assert_eq!(current.player, Some(ParticipantIndex(0)));
        assert_eq!(current.game_type, Some(GameType::Clubs));
        assert!(current.editing);
        assert!(!current.completed);
        assert!(sheet.round(1).unwrap().editing);
        assert!(sheet.round(1).unwrap().completed);
    }

    #[test]
    fn null_round_resumes_at_game_type() {
        let mut sheet = three_rounds_played();

        drive(&StartEditingCommand { round_number: 2 }, &mut sheet).unwrap();

        assert_eq!(sheet.step(), Step::SelectingGameType);
        assert_eq!(sheet.current().player, Some(ParticipantIndex(1)));
        assert_eq!(sheet.current().game_type, None);
    }

    #[test]
    fn passed_round_resumes_at_player() {
        let mut sheet = three_rounds_played();

        drive(&StartEditingCommand { round_number: 3 }, &mut sheet).unwrap();

        assert_eq!(sheet.step(), Step::SelectingPlayer);
        assert_eq!(sheet.current().game_type, None);
    }

    #[test]
    fn cancel_restores_sheet_exactly() {
        let mut sheet = three_rounds_played();
        drive(&SelectPlayerCommand { player: ParticipantIndex(2) }, &mut sheet).unwrap();
        let before = sheet.clone();

        drive(&StartEditingCommand { round_number: 1 }, &mut sheet).unwrap();
        drive(&crate::action::BackCommand, &mut sheet).unwrap();
        drive(&CancelEditingCommand, &mut sheet).unwrap();

        assert_eq!(sheet, before);
        assert_eq!(
            CancelEditingCommand.pre_validate(&sheet),
            Err(SheetError::NotEditing)
        );
    }

    #[test]
    fn latest_start_supersedes_active_edit() {
        let mut sheet = three_rounds_played();
        let before = sheet.clone();

        assert_eq!(drive(&StartEditingCommand { round_number: 1 }, &mut sheet), Ok(None));
        assert_eq!(
            drive(&StartEditingCommand { round_number: 2 }, &mut sheet),
            Ok(Some(1))
        );

        assert_eq!(sheet.editing_round(), Some(2));
        assert_eq!(sheet.rounds().iter().filter(|r| r.editing).count(), 1);

        drive(&CancelEditingCommand, &mut sheet).unwrap();
        assert_eq!(sheet, before);
    }

    #[test]
    fn committing_edit_replaces_contribution_and_resumes_series() {
        let mut sheet = three_rounds_played();
        let resume: Round = sheet.current().clone();

        drive(&StartEditingCommand { round_number: 1 }, &mut sheet).unwrap();
        let effects = drive(
            &CompleteRoundCommand {
                outcome: RoundOutcome::Lost,
            },
            &mut sheet,
        )
        .unwrap();

        let aggregates = sheet.aggregates();
        assert_eq!(aggregates[0].won_count, 0);
        assert_eq!(aggregates[0].lost_count, 1);
        assert_eq!(aggregates[0].base_points, -24);
        // round 2: Null lost by seat 1 pays 40 to seats 0 and 2
        assert_eq!(aggregates[0].total_points, -74 + 40);
        assert_eq!(aggregates[1].total_points, -46 - 50 + 40);
        assert_eq!(aggregates[2].total_points, 40 + 40);

        assert!(!sheet.is_editing());
        assert_eq!(sheet.current(), &resume);
        assert_eq!(sheet.step(), Step::SelectingPlayer);
        assert!(sheet.rounds().iter().all(|round| !round.editing));

        let synced: Vec<u8> = effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::SyncAggregate(update) => Some(update.participant.0),
                Effect::PersistRound(_) => None,
            })
            .collect();
        assert_eq!(synced, vec![0, 1, 2]);
    }

    #[test]
    fn changing_player_syncs_the_previous_player() {
        let mut sheet = three_rounds_played();

        drive(&StartEditingCommand { round_number: 1 }, &mut sheet).unwrap();
        for _ in 0..4 {
            drive(&crate::action::BackCommand, &mut sheet).unwrap();
        }
        play(&mut sheet, 2, GameType::Clubs, RoundOutcome::Won);

        assert_eq!(sheet.aggregates()[0].won_count, 0);
        assert_eq!(sheet.aggregates()[0].total_points, 40);
        assert_eq!(sheet.aggregates()[2].won_count, 1);
        assert_eq!(sheet.round(1).unwrap().player, Some(ParticipantIndex(2)));
    }
}
