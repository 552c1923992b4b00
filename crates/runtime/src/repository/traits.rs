//! Repository contract for persisting score sheets.

use skat_core::{RoundRecord, SeriesConfig};

use super::Result;
use super::types::StoredSeries;

/// Repository for completed rounds of a series.
///
/// Each saved round is merged into the stored series: a round with the same
/// number is replaced, otherwise it is inserted. The stored aggregates and
/// status always reflect the most recent record.
pub trait SeriesRepository: Send + Sync {
    /// Merge a committed round into its series.
    fn save_round(&self, record: &RoundRecord) -> Result<()>;

    /// Discard whatever is stored under `series_id` and store an empty series
    /// with `config` in its place. Implementations may keep the discarded
    /// document aside.
    fn reset(&self, series_id: &str, config: &SeriesConfig) -> Result<()>;

    /// Load a series by id.
    fn load(&self, series_id: &str) -> Result<Option<StoredSeries>>;

    /// Check if a series has been stored.
    fn exists(&self, series_id: &str) -> Result<bool> {
        Ok(self.load(series_id)?.is_some())
    }
}
