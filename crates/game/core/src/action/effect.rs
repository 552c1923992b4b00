//! Side effects produced by committing a round.
//!
//! The sheet never talks to collaborators itself. Completing a round returns
//! these values alongside the new state and the runtime executes them without
//! blocking subsequent commands.

use crate::config::SeriesConfig;
use crate::state::{ParticipantAggregate, ParticipantIndex, Round, ScoreSheet, SeriesStatus};

/// Updated totals of one participant, sent to the remote score service.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregateUpdate {
    pub participant: ParticipantIndex,
    pub series_id: String,
    pub table_id: Option<String>,
    pub total_points: i64,
    pub won_count: u32,
    pub lost_count: u32,
}

impl AggregateUpdate {
    pub(crate) fn from_sheet(sheet: &ScoreSheet, participant: ParticipantIndex) -> Option<Self> {
        let aggregate = sheet.aggregate(participant)?;
        Some(Self {
            participant,
            series_id: sheet.series_id().to_owned(),
            table_id: sheet.table_id().map(str::to_owned),
            total_points: aggregate.total_points,
            won_count: aggregate.won_count,
            lost_count: aggregate.lost_count,
        })
    }
}

/// A committed round together with the aggregates it produced.
///
/// Carries the series configuration so a stored series can be resumed
/// without relying on the configuration of the next run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundRecord {
    pub series_id: String,
    pub config: SeriesConfig,
    pub round: Round,
    pub aggregates: Vec<ParticipantAggregate>,
    pub status: SeriesStatus,
}

impl RoundRecord {
    pub(crate) fn from_sheet(sheet: &ScoreSheet, round: Round) -> Self {
        Self {
            series_id: sheet.series_id().to_owned(),
            config: sheet.config().clone(),
            round,
            aggregates: sheet.aggregates().to_vec(),
            status: sheet.status(),
        }
    }
}

/// Work for the runtime to perform after a command commits.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    SyncAggregate(AggregateUpdate),
    PersistRound(RoundRecord),
}
