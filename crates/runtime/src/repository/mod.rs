//! Repository layer for score sheet persistence.
//!
//! Completed rounds are saved as they are committed; a stored series is
//! what [`skat_core::ScoreSheet::hydrate`] resumes from.

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use file::FileSeriesRepository;
pub use memory::InMemorySeriesRepository;
pub use traits::SeriesRepository;
pub use types::StoredSeries;
