//! File-based SeriesRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use skat_core::{RoundRecord, SeriesConfig};

use super::{RepositoryError, Result, SeriesRepository, StoredSeries};

/// Stores each series as one JSON document, `series_{id}.json`.
///
/// Writes go to a temporary file that is then renamed over the document, so a
/// crash never leaves a half-written series behind.
pub struct FileSeriesRepository {
    base_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSeriesRepository {
    /// Create a repository rooted at `base_dir`, creating it if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn series_path(&self, series_id: &str) -> Result<PathBuf> {
        let valid = !series_id.is_empty()
            && series_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !series_id.starts_with('.');
        if !valid {
            return Err(RepositoryError::InvalidSeriesId(series_id.to_owned()));
        }
        Ok(self.base_dir.join(format!("series_{series_id}.json")))
    }

    fn read(&self, path: &Path, series_id: &str) -> Result<Option<StoredSeries>> {
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(path)?;
        let stored: StoredSeries =
            serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Json(e.to_string()))?;
        if stored.series_id != series_id {
            return Err(RepositoryError::CorruptedData(format!(
                "{} holds series {:?}",
                path.display(),
                stored.series_id
            )));
        }
        Ok(Some(stored))
    }

    fn write(&self, path: &Path, stored: &StoredSeries) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(stored)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }
}

impl SeriesRepository for FileSeriesRepository {
    fn save_round(&self, record: &RoundRecord) -> Result<()> {
        let path = self.series_path(&record.series_id)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let stored = match self.read(&path, &record.series_id)? {
            Some(mut stored) => {
                stored.merge(record);
                stored
            }
            None => StoredSeries::from_record(record),
        };
        self.write(&path, &stored)?;

        tracing::debug!(
            "Saved round {} of series {} to {}",
            record.round.number,
            record.series_id,
            path.display()
        );

        Ok(())
    }

    /// The previous document, readable or not, is kept as `series_{id}.json.bak`.
    fn reset(&self, series_id: &str, config: &SeriesConfig) -> Result<()> {
        let path = self.series_path(series_id)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        if path.exists() {
            let backup = path.with_extension("json.bak");
            fs::rename(&path, &backup)?;
            tracing::info!(
                "Moved discarded series {} to {}",
                series_id,
                backup.display()
            );
        }
        self.write(&path, &StoredSeries::new(series_id, config.clone()))
    }

    fn load(&self, series_id: &str) -> Result<Option<StoredSeries>> {
        let path = self.series_path(series_id)?;
        let stored = self.read(&path, series_id)?;
        if stored.is_some() {
            tracing::debug!("Loaded series {} from {}", series_id, path.display());
        }
        Ok(stored)
    }
}
