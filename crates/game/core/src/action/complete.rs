//! Completing a round: scoring, aggregate bookkeeping and advancing the series.

use crate::action::{AggregateUpdate, CommandKind, Effect, RoundRecord, SheetError, SheetTransition};
use crate::state::{
    Contribution, EditSession, LastUpdated, ParticipantAggregate, ParticipantIndex, Round,
    ScoreSheet, StatKind, Step,
};
use crate::scoring;

/// Result of a played round from the player's point of view.
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
pub enum RoundOutcome {
    Won,
    Lost,
}

impl RoundOutcome {
    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// Records the outcome of the current round.
///
/// On an edit commit the previously applied contribution is reverted first,
/// using the values stored on the round when it was originally completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompleteRoundCommand {
    pub outcome: RoundOutcome,
}

impl SheetTransition for CompleteRoundCommand {
    type Error = SheetError;
    type Result = Vec<Effect>;

    fn pre_validate(&self, sheet: &ScoreSheet) -> Result<(), Self::Error> {
        SheetError::ensure_step(sheet, CommandKind::CompleteRound, Step::SelectingOutcome)?;

        let round = sheet.current();
        if round.player.is_none() {
            return Err(SheetError::MissingPlayer);
        }
        if round.game_type.is_none() {
            return Err(SheetError::MissingGameType);
        }
        Ok(())
    }

    fn apply(&self, sheet: &mut ScoreSheet) -> Result<Self::Result, Self::Error> {
        Ok(commit_round(sheet, self.outcome.is_won()))
    }

    fn post_validate(&self, sheet: &ScoreSheet) -> Result<(), Self::Error> {
        sheet.debug_check_invariants();
        debug_assert!(!sheet.is_editing(), "a commit always closes the edit session");
        Ok(())
    }
}

/// Scores the current round, updates aggregates and moves the sheet on.
///
/// Shared by [`CompleteRoundCommand`] and the passed shortcut.
pub(crate) fn commit_round(sheet: &mut ScoreSheet, won: bool) -> Vec<Effect> {
    let mode = sheet.config.mode;
    let before = sheet.aggregates.clone();

    if let Some(prior) = sheet
        .edit
        .as_ref()
        .and_then(EditSession::original_round)
        .and_then(Contribution::of)
    {
        prior.revert(&mut sheet.aggregates);
    }

    let round = &mut sheet.current;
    round.won = won && !round.is_passed();
    round.awarded = Some(scoring::compute_round_value(round, mode));
    round.completed = true;
    round.editing = false;

    let contribution = Contribution::of(&sheet.current);
    sheet.last_updated = match contribution {
        Some(contribution) => {
            contribution.apply(&mut sheet.aggregates);
            Some(LastUpdated {
                participant: contribution.player,
                stat: if contribution.won {
                    StatKind::WonCount
                } else {
                    StatKind::LostCount
                },
            })
        }
        None => None,
    };

    let committed = sheet.current.clone();
    for stored in sheet.rounds.iter_mut() {
        stored.editing = false;
        if stored.number == committed.number {
            *stored = committed.clone();
        }
    }

    let mut effects: Vec<Effect> = sync_targets(contribution, &before, &sheet.aggregates)
        .into_iter()
        .filter_map(|participant| AggregateUpdate::from_sheet(sheet, participant))
        .map(Effect::SyncAggregate)
        .collect();

    advance(sheet);
    effects.push(Effect::PersistRound(RoundRecord::from_sheet(sheet, committed)));
    effects
}

/// Participants whose totals must be pushed to the score service.
///
/// The player comes first, then every defender when the player lost. An edit
/// can also change participants outside that set (for example when the player
/// was changed), so anyone whose aggregate moved is appended.
fn sync_targets(
    contribution: Option<Contribution>,
    before: &[ParticipantAggregate],
    after: &[ParticipantAggregate],
) -> Vec<ParticipantIndex> {
    let mut targets = Vec::with_capacity(after.len());

    if let Some(contribution) = contribution {
        targets.push(contribution.player);
        if !contribution.won {
            targets.extend(
                seats(after.len()).filter(|&participant| participant != contribution.player),
            );
        }
    }

    for (participant, (old, new)) in seats(after.len()).zip(before.iter().zip(after)) {
        if old != new && !targets.contains(&participant) {
            targets.push(participant);
        }
    }

    targets
}

fn seats(count: usize) -> impl Iterator<Item = ParticipantIndex> {
    // at most four seats
    (0..count as u8).map(ParticipantIndex)
}

/// Selects the round to continue with after a commit.
fn advance(sheet: &mut ScoreSheet) {
    if let Some(session) = sheet.edit.take() {
        let mut resumed = session.snapshot.current;
        if resumed.completed
            && let Some(latest) = sheet.round(resumed.number)
        {
            resumed = latest.clone();
        }
        sheet.current = resumed;
        sheet.step = session.snapshot.step;
        return;
    }

    let finished = sheet.current.number;
    let next = sheet
        .rounds
        .iter()
        .skip(finished as usize)
        .chain(sheet.rounds.iter())
        .find(|round| !round.completed)
        .map(|round| (round.number, round.dealer));

    let Some((number, stored_dealer)) = next else {
        sheet.step = Step::Completed;
        return;
    };

    let config = &sheet.config;
    let dealer = if number == finished + 1 {
        config.rotation.next_dealer(
            config.mode,
            config.first_dealer,
            sheet.current.dealer,
            number - 1,
        )
    } else {
        stored_dealer
    };

    sheet.current = Round::new(number, dealer);
    sheet.step = Step::SelectingPlayer;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ProceedCommand, SelectGameTypeCommand, SelectPlayerCommand, ToggleModifierCommand};
    use crate::config::{SeriesConfig, TableMode};
    use crate::state::{GameType, Modifier, RoundValue, SeriesStatus};

    fn sheet(mode: TableMode, rounds: u32) -> ScoreSheet {
        ScoreSheet::new(SeriesConfig::new(mode).with_total_rounds(rounds), "series-7").unwrap()
    }

    fn enter(sheet: &mut ScoreSheet, player: u8, game_type: GameType, modifiers: &[Modifier]) {
        SelectPlayerCommand {
            player: ParticipantIndex(player),
        }
        .apply(sheet)
        .unwrap();
        SelectGameTypeCommand { game_type }.apply(sheet).unwrap();
        if !game_type.is_null() {
            ProceedCommand.apply(sheet).unwrap();
        }
        for &modifier in modifiers {
            ToggleModifierCommand { modifier }.apply(sheet).unwrap();
        }
        ProceedCommand.apply(sheet).unwrap();
    }

    fn complete(sheet: &mut ScoreSheet, outcome: RoundOutcome) -> Vec<Effect> {
        let command = CompleteRoundCommand { outcome };
        command.pre_validate(sheet).unwrap();
        let effects = command.apply(sheet).unwrap();
        command.post_validate(sheet).unwrap();
        effects
    }

    fn synced(effects: &[Effect]) -> Vec<u8> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::SyncAggregate(update) => Some(update.participant.0),
                Effect::PersistRound(_) => None,
            })
            .collect()
    }

    #[test]
    fn clubs_won_at_four_seats() {
        let mut sheet = sheet(TableMode::Four, 4);
        enter(&mut sheet, 1, GameType::Clubs, &[]);

        let effects = complete(&mut sheet, RoundOutcome::Won);

        let round = sheet.round(1).unwrap();
        assert_eq!(
            round.awarded,
            Some(RoundValue {
                base_points: 12,
                total_points: 62,
                defender_bonus: 0,
            })
        );
        let aggregates = sheet.aggregates();
        assert_eq!(aggregates[1].won_count, 1);
        assert_eq!(aggregates[1].base_points, 12);
        assert_eq!(aggregates[1].total_points, 62);
        for seat in [0, 2, 3] {
            assert_eq!(aggregates[seat], ParticipantAggregate::default());
        }
        assert_eq!(synced(&effects), vec![1]);
        assert_eq!(
            sheet.last_updated(),
            Some(LastUpdated {
                participant: ParticipantIndex(1),
                stat: StatKind::WonCount,
            })
        );
    }

    #[test]
    fn clubs_lost_at_four_seats() {
        let mut sheet = sheet(TableMode::Four, 4);
        enter(&mut sheet, 1, GameType::Clubs, &[]);

        let effects = complete(&mut sheet, RoundOutcome::Lost);

        let aggregates = sheet.aggregates();
        assert_eq!(aggregates[1].lost_count, 1);
        assert_eq!(aggregates[1].base_points, -24);
        assert_eq!(aggregates[1].total_points, -74);
        for seat in [0, 2, 3] {
            assert_eq!(aggregates[seat].total_points, 30);
            assert_eq!(aggregates[seat].base_points, 0);
        }
        assert_eq!(synced(&effects), vec![1, 0, 2, 3]);
    }

    #[test]
    fn null_hand_ouvert_won() {
        let mut sheet = sheet(TableMode::Four, 4);
        enter(&mut sheet, 2, GameType::Null, &[Modifier::Hand, Modifier::Ouvert]);

        complete(&mut sheet, RoundOutcome::Won);

        let aggregate = sheet.aggregates()[2];
        assert_eq!(aggregate.base_points, 59);
        assert_eq!(aggregate.total_points, 109);
    }

    #[test]
    fn null_hand_ouvert_lost_at_three_seats_pays_forty() {
        let mut sheet = sheet(TableMode::Three, 3);
        enter(&mut sheet, 0, GameType::Null, &[Modifier::Hand, Modifier::Ouvert]);

        complete(&mut sheet, RoundOutcome::Lost);

        let aggregates = sheet.aggregates();
        assert_eq!(aggregates[0].total_points, -168);
        assert_eq!(aggregates[1].total_points, 40);
        assert_eq!(aggregates[2].total_points, 40);
    }

    #[test]
    fn advances_dealer_and_persists_each_round() {
        let mut sheet = sheet(TableMode::Three, 3);
        enter(&mut sheet, 1, GameType::Diamonds, &[]);

        let effects = complete(&mut sheet, RoundOutcome::Won);

        assert_eq!(sheet.current().number, 2);
        assert_eq!(sheet.current().dealer, ParticipantIndex(1));
        assert_eq!(sheet.step(), Step::SelectingPlayer);
        match effects.last() {
            Some(Effect::PersistRound(record)) => {
                assert_eq!(record.series_id, "series-7");
                assert_eq!(record.round.number, 1);
                assert!(record.round.completed);
                assert_eq!(record.status, SeriesStatus::InProgress);
                assert_eq!(record.aggregates, sheet.aggregates());
            }
            other => panic!("expected persistence effect, got {other:?}"),
        }
    }

    #[test]
    fn last_round_completes_the_series() {
        let mut sheet = sheet(TableMode::Three, 1);
        enter(&mut sheet, 2, GameType::Grand, &[]);

        let effects = complete(&mut sheet, RoundOutcome::Won);

        assert_eq!(sheet.step(), Step::Completed);
        assert_eq!(sheet.status(), SeriesStatus::Completed);
        assert!(matches!(
            effects.last(),
            Some(Effect::PersistRound(record)) if record.status == SeriesStatus::Completed
        ));
        assert_eq!(
            SelectPlayerCommand { player: ParticipantIndex(0) }.pre_validate(&sheet),
            Err(SheetError::SeriesComplete)
        );
    }

    #[test]
    fn rejects_completion_outside_outcome_step() {
        let sheet = sheet(TableMode::Four, 2);
        let result = CompleteRoundCommand {
            outcome: RoundOutcome::Won,
        }
        .pre_validate(&sheet);
        assert_eq!(
            result,
            Err(SheetError::StepMismatch {
                command: CommandKind::CompleteRound,
                step: Step::SelectingPlayer,
            })
        );
    }
}
