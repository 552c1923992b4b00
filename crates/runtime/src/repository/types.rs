//! Persisted representation of a series.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use skat_core::{ParticipantAggregate, Round, RoundRecord, SeriesConfig, SeriesStatus};

/// Everything needed to resume a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSeries {
    pub series_id: String,
    /// Configuration the series was played with.
    pub config: SeriesConfig,
    /// Completed rounds, sorted by number.
    pub rounds: Vec<Round>,
    pub aggregates: Vec<ParticipantAggregate>,
    pub status: SeriesStatus,
    pub updated_at: DateTime<Utc>,
}

impl StoredSeries {
    /// An empty series, no round played yet.
    pub fn new(series_id: impl Into<String>, config: SeriesConfig) -> Self {
        let aggregates = vec![ParticipantAggregate::default(); usize::from(config.participants())];
        Self {
            series_id: series_id.into(),
            config,
            rounds: Vec::new(),
            aggregates,
            status: SeriesStatus::InProgress,
            updated_at: Utc::now(),
        }
    }

    /// Starts a stored series from its first record.
    pub fn from_record(record: &RoundRecord) -> Self {
        let mut series = Self::new(record.series_id.clone(), record.config.clone());
        series.merge(record);
        series
    }

    /// Inserts or replaces the record's round and adopts its aggregates.
    pub fn merge(&mut self, record: &RoundRecord) {
        let number = record.round.number;
        match self
            .rounds
            .binary_search_by_key(&number, |round| round.number)
        {
            Ok(index) => self.rounds[index] = record.round.clone(),
            Err(index) => self.rounds.insert(index, record.round.clone()),
        }
        self.config = record.config.clone();
        self.aggregates = record.aggregates.clone();
        self.status = record.status;
        self.updated_at = Utc::now();
    }

    pub fn round(&self, number: u32) -> Option<&Round> {
        self.rounds.iter().find(|round| round.number == number)
    }
}
