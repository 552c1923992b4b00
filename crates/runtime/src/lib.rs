//! Runtime orchestration for the Skat score sheet.
//!
//! This crate wires the pure [`skat_core`] state machine to its
//! collaborators: a single sheet worker owns the sheet, while background
//! workers push aggregate updates to the remote score service and persist
//! committed rounds. Consumers embed [`Runtime`] and interact with it through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`sync`] and [`repository`] provide collaborator adapters
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod repository;
pub mod runtime;
pub mod sync;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{EffectEvent, Event, EventBus, SheetEvent, Topic};
pub use repository::{
    FileSeriesRepository, InMemorySeriesRepository, RepositoryError, SeriesRepository,
    StoredSeries,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use sync::{HttpScoreSync, MockScoreSync, NoopScoreSync, ScoreSync, SyncError};
