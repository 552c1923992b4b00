//! Worker tasks that back the runtime orchestration.
//!
//! The sheet worker owns the score sheet and executes commands; the sync and
//! persistence workers execute the effects of committed rounds without
//! blocking it.

mod persistence;
mod sheet;
mod sync;

pub use persistence::PersistenceWorker;
pub use sheet::{SheetRequest, SheetWorker};
pub use sync::SyncWorker;
