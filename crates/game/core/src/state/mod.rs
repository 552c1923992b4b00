//! Authoritative score sheet representation.
//!
//! This module owns the round list, the per-participant aggregates and the
//! round currently being entered. Runtime layers clone or query the sheet but
//! mutate it exclusively through [`crate::engine::SheetEngine`].
mod error;
mod step;
pub mod types;

pub use error::HydrateError;
pub use step::{LastUpdated, SeriesStatus, StatKind, Step};
pub use types::{
    Contribution, GameType, Modifier, Modifiers, ParticipantAggregate, ParticipantIndex, Round,
    RoundValue, TrumpChoice,
};

use arrayvec::ArrayVec;

use crate::config::{ConfigError, SeriesConfig};
use crate::scoring;

/// Aggregate table, one entry per seat.
pub type Aggregates = ArrayVec<ParticipantAggregate, { SeriesConfig::MAX_PARTICIPANTS }>;

/// Everything an edit may touch, captured when the edit starts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetSnapshot {
    pub current: Round,
    pub step: Step,
    pub rounds: Vec<Round>,
    pub aggregates: Aggregates,
    pub last_updated: Option<LastUpdated>,
}

/// An edit in progress together with the state needed to roll it back.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EditSession {
    pub round_number: u32,
    pub snapshot: SheetSnapshot,
}

impl EditSession {
    /// The edited round as it was before the edit started.
    pub fn original_round(&self) -> Option<&Round> {
        self.snapshot
            .rounds
            .get(self.round_number.checked_sub(1)? as usize)
    }
}

/// Score sheet of one series.
///
/// Invariants maintained by the engine:
/// - `rounds[i].number == i + 1` for every round
/// - at most one round has `editing` set, and only while `edit` is active
/// - `aggregates` equals the sum of the contributions of completed rounds
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreSheet {
    pub(crate) config: SeriesConfig,
    pub(crate) series_id: String,
    pub(crate) table_id: Option<String>,
    pub(crate) rounds: Vec<Round>,
    pub(crate) aggregates: Aggregates,
    pub(crate) current: Round,
    pub(crate) step: Step,
    pub(crate) last_updated: Option<LastUpdated>,
    pub(crate) edit: Option<EditSession>,
}

impl ScoreSheet {
    /// Creates a fresh series with every round laid out and zeroed aggregates.
    pub fn new(config: SeriesConfig, series_id: impl Into<String>) -> Result<Self, ConfigError> {
        config.validate()?;

        let rounds: Vec<Round> = (1..=config.total_rounds)
            .map(|number| Round::new(number, config.dealer_for_round(number)))
            .collect();
        let aggregates = (0..config.participants())
            .map(|_| ParticipantAggregate::default())
            .collect();
        let current = rounds[0].clone();

        Ok(Self {
            config,
            series_id: series_id.into(),
            table_id: None,
            rounds,
            aggregates,
            current,
            step: Step::SelectingPlayer,
            last_updated: None,
            edit: None,
        })
    }

    /// Rebuilds a sheet from a persisted series.
    ///
    /// Stored rounds replace the fresh rounds with the same number. The current
    /// round becomes the first round that is not completed, or the last round
    /// when the series is finished. Stored aggregates must match what the
    /// completed rounds add up to.
    pub fn hydrate(
        config: SeriesConfig,
        series_id: impl Into<String>,
        stored_rounds: impl IntoIterator<Item = Round>,
        stored_aggregates: &[ParticipantAggregate],
    ) -> Result<Self, HydrateError> {
        let mut sheet = Self::new(config, series_id)?;
        let total = sheet.config.total_rounds;
        let participants = sheet.config.participants();
        let mut seen = vec![false; sheet.rounds.len()];

        for mut round in stored_rounds {
            if round.number == 0 || round.number > total {
                return Err(HydrateError::RoundOutOfRange {
                    number: round.number,
                    total,
                });
            }
            let slot = (round.number - 1) as usize;
            if std::mem::replace(&mut seen[slot], true) {
                return Err(HydrateError::DuplicateRound(round.number));
            }
            if let Some(player) = round.player
                && player.0 >= participants
            {
                return Err(HydrateError::ParticipantOutOfRange {
                    number: round.number,
                    participant: player,
                });
            }
            let expected = sheet.rounds[slot].dealer;
            if round.dealer != expected {
                return Err(HydrateError::DealerMismatch {
                    number: round.number,
                    expected,
                    found: round.dealer,
                });
            }
            if !sheet.config.mode.dealer_may_play() && round.player == Some(round.dealer) {
                return Err(HydrateError::DealerPlayed {
                    number: round.number,
                    dealer: round.dealer,
                });
            }
            round.editing = false;
            sheet.rounds[slot] = round;
        }

        if stored_aggregates.len() != usize::from(participants) {
            return Err(HydrateError::AggregateCount {
                expected: participants,
                found: stored_aggregates.len(),
            });
        }

        let mut recomputed: Aggregates = (0..participants)
            .map(|_| ParticipantAggregate::default())
            .collect();
        for round in &sheet.rounds {
            if let Some(contribution) = Contribution::of(round) {
                contribution.apply(&mut recomputed);
            }
        }
        if recomputed.as_slice() != stored_aggregates {
            return Err(HydrateError::AggregateMismatch);
        }
        sheet.aggregates = recomputed;

        match sheet.rounds.iter().find(|round| !round.completed) {
            Some(open) => {
                sheet.current = Round::new(open.number, open.dealer);
                sheet.step = Step::SelectingPlayer;
            }
            None => {
                // non-empty: validated by SeriesConfig
                if let Some(last) = sheet.rounds.last() {
                    sheet.current = last.clone();
                }
                sheet.step = Step::Completed;
            }
        }

        Ok(sheet)
    }

    /// Attaches the remote table identifier forwarded with aggregate updates.
    #[must_use]
    pub fn with_table_id(mut self, table_id: impl Into<String>) -> Self {
        self.table_id = Some(table_id.into());
        self
    }

    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    pub fn series_id(&self) -> &str {
        &self.series_id
    }

    pub fn table_id(&self) -> Option<&str> {
        self.table_id.as_deref()
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Round by 1-based number.
    pub fn round(&self, number: u32) -> Option<&Round> {
        self.rounds.get(number.checked_sub(1)? as usize)
    }

    pub fn aggregates(&self) -> &[ParticipantAggregate] {
        &self.aggregates
    }

    pub fn aggregate(&self, participant: ParticipantIndex) -> Option<&ParticipantAggregate> {
        self.aggregates.get(participant.index())
    }

    /// Round currently being entered (or edited).
    pub fn current(&self) -> &Round {
        &self.current
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn last_updated(&self) -> Option<LastUpdated> {
        self.last_updated
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    pub fn editing_round(&self) -> Option<u32> {
        self.edit.as_ref().map(|session| session.round_number)
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    pub fn played_rounds(&self) -> usize {
        self.rounds.iter().filter(|round| round.completed).count()
    }

    pub fn is_complete(&self) -> bool {
        self.rounds.iter().all(|round| round.completed)
    }

    pub fn status(&self) -> SeriesStatus {
        if self.is_complete() {
            SeriesStatus::Completed
        } else {
            SeriesStatus::InProgress
        }
    }

    /// Modifiers that may be toggled on the current round.
    pub fn available_modifiers(&self) -> Modifiers {
        Modifiers::available_for(self.current.game_type)
    }

    /// What the current round would score if the player won.
    pub fn preview(&self) -> RoundValue {
        scoring::preview_value(&self.current, self.config.mode)
    }

    pub(crate) fn capture(&self) -> SheetSnapshot {
        SheetSnapshot {
            current: self.current.clone(),
            step: self.step,
            rounds: self.rounds.clone(),
            aggregates: self.aggregates.clone(),
            last_updated: self.last_updated,
        }
    }

    pub(crate) fn restore(&mut self, snapshot: SheetSnapshot) {
        self.current = snapshot.current;
        self.step = snapshot.step;
        self.rounds = snapshot.rounds;
        self.aggregates = snapshot.aggregates;
        self.last_updated = snapshot.last_updated;
    }

    /// Checks the structural invariants in debug builds.
    pub(crate) fn debug_check_invariants(&self) {
        debug_assert!(
            self.rounds
                .iter()
                .enumerate()
                .all(|(i, round)| round.number as usize == i + 1),
            "round numbers must be contiguous from 1"
        );

        let editing: Vec<u32> = self
            .rounds
            .iter()
            .filter(|round| round.editing)
            .map(|round| round.number)
            .collect();
        debug_assert!(editing.len() <= 1, "at most one round may be editing");
        debug_assert_eq!(
            editing.first().copied(),
            self.editing_round(),
            "editing flag must match the active edit session"
        );
        debug_assert_eq!(
            self.aggregates.len(),
            usize::from(self.config.participants()),
            "one aggregate per participant"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableMode;

    fn completed(number: u32, dealer: u8, player: u8, game_type: GameType, won: bool) -> Round {
        let mut round = Round::new(number, ParticipantIndex(dealer));
        round.player = Some(ParticipantIndex(player));
        round.game_type = Some(game_type);
        round.won = won;
        round.completed = true;
        round.awarded = Some(scoring::compute_round_value(&round, TableMode::Three));
        round
    }

    #[test]
    fn new_sheet_lays_out_every_round() {
        let config = SeriesConfig::new(TableMode::Four).with_total_rounds(8);
        let sheet = ScoreSheet::new(config, "series-1").unwrap();

        assert_eq!(sheet.rounds().len(), 8);
        assert_eq!(sheet.aggregates().len(), 4);
        assert_eq!(sheet.current().number, 1);
        assert_eq!(sheet.step(), Step::SelectingPlayer);
        assert_eq!(sheet.round(4).unwrap().dealer, ParticipantIndex(1));
        assert_eq!(sheet.status(), SeriesStatus::InProgress);
    }

    #[test]
    fn hydrate_resumes_at_first_open_round() {
        let config = SeriesConfig::new(TableMode::Three).with_total_rounds(4);
        let rounds = vec![
            completed(1, 0, 1, GameType::Clubs, true),
            completed(2, 1, 2, GameType::Grand, false),
        ];
        let mut aggregates = [ParticipantAggregate::default(); 3];
        for round in &rounds {
            Contribution::of(round).unwrap().apply(&mut aggregates);
        }

        let sheet = ScoreSheet::hydrate(config, "series-1", rounds, &aggregates).unwrap();

        assert_eq!(sheet.current().number, 3);
        assert_eq!(sheet.current().dealer, ParticipantIndex(2));
        assert_eq!(sheet.step(), Step::SelectingPlayer);
        assert_eq!(sheet.played_rounds(), 2);
        assert_eq!(sheet.aggregates(), &aggregates);
    }

    #[test]
    fn hydrate_finished_series_selects_last_round() {
        let config = SeriesConfig::new(TableMode::Three).with_total_rounds(2);
        let rounds = vec![
            completed(1, 0, 1, GameType::Hearts, true),
            completed(2, 1, 0, GameType::Null, true),
        ];
        let mut aggregates = [ParticipantAggregate::default(); 3];
        for round in &rounds {
            Contribution::of(round).unwrap().apply(&mut aggregates);
        }

        let sheet = ScoreSheet::hydrate(config, "series-1", rounds, &aggregates).unwrap();

        assert_eq!(sheet.current().number, 2);
        assert_eq!(sheet.step(), Step::Completed);
        assert_eq!(sheet.status(), SeriesStatus::Completed);
    }

    #[test]
    fn hydrate_rejects_inconsistent_data() {
        let config = SeriesConfig::new(TableMode::Three).with_total_rounds(2);
        let zero = [ParticipantAggregate::default(); 3];

        let out_of_range = ScoreSheet::hydrate(
            config.clone(),
            "s",
            vec![completed(3, 0, 1, GameType::Clubs, true)],
            &zero,
        );
        assert!(matches!(
            out_of_range,
            Err(HydrateError::RoundOutOfRange { number: 3, total: 2 })
        ));

        let wrong_count = ScoreSheet::hydrate(config.clone(), "s", Vec::new(), &zero[..2]);
        assert!(matches!(
            wrong_count,
            Err(HydrateError::AggregateCount { expected: 3, found: 2 })
        ));

        let mismatch = ScoreSheet::hydrate(
            config,
            "s",
            vec![completed(1, 0, 1, GameType::Clubs, true)],
            &zero,
        );
        assert!(matches!(mismatch, Err(HydrateError::AggregateMismatch)));
    }

    #[test]
    fn hydrate_rejects_rounds_a_live_table_could_not_produce() {
        let config = SeriesConfig::new(TableMode::Three).with_total_rounds(3);
        let zero = [ParticipantAggregate::default(); 3];
        let wrong_dealer = ScoreSheet::hydrate(
            config,
            "s",
            vec![completed(2, 0, 1, GameType::Clubs, true)],
            &zero,
        );
        assert_eq!(
            wrong_dealer.unwrap_err(),
            HydrateError::DealerMismatch {
                number: 2,
                expected: ParticipantIndex(1),
                found: ParticipantIndex(0),
            }
        );

        let config = SeriesConfig::new(TableMode::Four).with_total_rounds(4);
        let zero = [ParticipantAggregate::default(); 4];
        let dealer_played = ScoreSheet::hydrate(
            config,
            "s",
            vec![completed(1, 0, 0, GameType::Hearts, true)],
            &zero,
        );
        assert_eq!(
            dealer_played.unwrap_err(),
            HydrateError::DealerPlayed {
                number: 1,
                dealer: ParticipantIndex(0),
            }
        );
    }
}
