//! In-memory SeriesRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use skat_core::{RoundRecord, SeriesConfig};

use super::{RepositoryError, Result, SeriesRepository, StoredSeries};

/// In-memory implementation of SeriesRepository.
#[derive(Default)]
pub struct InMemorySeriesRepository {
    series: RwLock<HashMap<String, StoredSeries>>,
}

impl InMemorySeriesRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a series already stored.
    pub fn with_series(stored: StoredSeries) -> Self {
        let mut series = HashMap::new();
        series.insert(stored.series_id.clone(), stored);
        Self {
            series: RwLock::new(series),
        }
    }
}

impl SeriesRepository for InMemorySeriesRepository {
    fn save_round(&self, record: &RoundRecord) -> Result<()> {
        let mut series = self
            .series
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        series
            .entry(record.series_id.clone())
            .and_modify(|stored| stored.merge(record))
            .or_insert_with(|| StoredSeries::from_record(record));
        Ok(())
    }

    fn reset(&self, series_id: &str, config: &SeriesConfig) -> Result<()> {
        let mut series = self
            .series
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        series.insert(
            series_id.to_owned(),
            StoredSeries::new(series_id, config.clone()),
        );
        Ok(())
    }

    fn load(&self, series_id: &str) -> Result<Option<StoredSeries>> {
        let series = self
            .series
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(series.get(series_id).cloned())
    }
}
