//! High-level runtime orchestrator.
//!
//! The runtime owns background workers, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the score sheet.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use skat_core::{Modifiers, ScoreSheet, SeriesConfig};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::repository::{InMemorySeriesRepository, SeriesRepository};
use crate::sync::{NoopScoreSync, ScoreSync};
use crate::workers::{PersistenceWorker, SheetRequest, SheetWorker, SyncWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub series: SeriesConfig,
    pub series_id: String,
    /// Remote table identifier forwarded with aggregate updates.
    pub table_id: Option<String>,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Capacity of the sync queue. Persistence is never dropped.
    pub effect_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            series: SeriesConfig::default(),
            series_id: "default".to_owned(),
            table_id: None,
            event_buffer_size: 100,
            command_buffer_size: 32,
            effect_buffer_size: 64,
        }
    }
}

/// Main runtime that owns the sheet worker and the effect workers.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sheet_worker: JoinHandle<()>,
    sync_worker: JoinHandle<()>,
    persistence_worker: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the effect workers to drain their queues. Handles cloned
    /// from this runtime keep the sheet worker alive until they are dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sheet_worker.await.map_err(RuntimeError::WorkerJoin)?;
        self.sync_worker.await.map_err(RuntimeError::WorkerJoin)?;
        self.persistence_worker
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    repository: Option<Arc<dyn SeriesRepository>>,
    score_sync: Option<Arc<dyn ScoreSync>>,
    resume: bool,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            repository: None,
            score_sync: None,
            resume: true,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the series repository (default: in-memory)
    pub fn repository(mut self, repository: impl SeriesRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Share an existing repository with the runtime
    pub fn shared_repository(mut self, repository: Arc<dyn SeriesRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Set the remote score service client (default: no remote)
    pub fn score_sync(mut self, score_sync: impl ScoreSync + 'static) -> Self {
        self.score_sync = Some(Arc::new(score_sync));
        self
    }

    /// Share an existing score service client with the runtime
    pub fn shared_score_sync(mut self, score_sync: Arc<dyn ScoreSync>) -> Self {
        self.score_sync = Some(score_sync);
        self
    }

    /// Resume a stored series with the configured id (default: true)
    pub fn resume(mut self, resume: bool) -> Self {
        self.resume = resume;
        self
    }

    /// Build the runtime and spawn its workers
    pub async fn build(self) -> Result<Runtime> {
        let config = self.config;
        config.series.validate()?;

        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemorySeriesRepository::new()));
        let score_sync = self
            .score_sync
            .unwrap_or_else(|| Arc::new(NoopScoreSync));

        let mut sheet = if self.resume {
            resume_or_fresh(&config, repository.as_ref())?
        } else {
            start_fresh(&config, repository.as_ref())?
        };
        if let Some(table_id) = &config.table_id {
            sheet = sheet.with_table_id(table_id.clone());
        }

        let event_bus = EventBus::with_capacity(config.event_buffer_size);
        let (request_tx, request_rx) = mpsc::channel::<SheetRequest>(config.command_buffer_size);
        let (sync_tx, sync_rx) = mpsc::channel(config.effect_buffer_size);
        let (persist_tx, persist_rx) = mpsc::unbounded_channel();

        let handle = RuntimeHandle::new(request_tx, event_bus.clone());

        let sheet_worker = SheetWorker::new(sheet, request_rx, event_bus.clone(), sync_tx, persist_tx);
        let sync_worker = SyncWorker::new(score_sync, sync_rx, event_bus.clone());
        let persistence_worker = PersistenceWorker::new(repository, persist_rx, event_bus);

        Ok(Runtime {
            handle,
            sheet_worker: tokio::spawn(sheet_worker.run()),
            sync_worker: tokio::spawn(sync_worker.run()),
            persistence_worker: tokio::spawn(persistence_worker.run()),
        })
    }
}

/// Loads and hydrates the configured series, falling back to a fresh sheet
/// when nothing usable is stored.
///
/// A stored series resumes with the configuration it was played with.
fn resume_or_fresh(config: &RuntimeConfig, repository: &dyn SeriesRepository) -> Result<ScoreSheet> {
    let series_id = config.series_id.as_str();

    match repository.load(series_id) {
        Ok(Some(stored)) => {
            if stored.config != config.series {
                info!(
                    target: "runtime",
                    series_id,
                    stored = ?stored.config,
                    configured = ?config.series,
                    "resuming with the stored series configuration"
                );
            }
            match ScoreSheet::hydrate(
                stored.config,
                series_id,
                stored.rounds,
                &stored.aggregates,
            ) {
                Ok(sheet) => {
                    // kept as stored, scoring already happened
                    for round in sheet.rounds() {
                        let unavailable = round
                            .modifiers
                            .difference(Modifiers::available_for(round.game_type));
                        if !unavailable.is_empty() {
                            warn!(
                                target: "runtime",
                                series_id,
                                round_number = round.number,
                                modifiers = ?unavailable,
                                "stored round carries modifiers unavailable for its game type"
                            );
                        }
                    }
                    info!(
                        target: "runtime",
                        series_id,
                        played = sheet.played_rounds(),
                        "resumed stored series"
                    );
                    return Ok(sheet);
                }
                Err(hydrate_error) => {
                    error!(
                        target: "runtime",
                        series_id,
                        error = %hydrate_error,
                        "stored series is inconsistent; starting fresh"
                    );
                }
            }
        }
        Ok(None) => {
            info!(target: "runtime", series_id, "starting new series");
            return Ok(ScoreSheet::new(config.series.clone(), series_id)?);
        }
        Err(repository_error) => {
            error!(
                target: "runtime",
                series_id,
                error = %repository_error,
                "failed to load stored series; starting fresh"
            );
        }
    }

    start_fresh(config, repository)
}

/// Replaces any stored series with an empty one so later saves never merge
/// into a discarded round list.
fn start_fresh(config: &RuntimeConfig, repository: &dyn SeriesRepository) -> Result<ScoreSheet> {
    let series_id = config.series_id.as_str();
    let sheet = ScoreSheet::new(config.series.clone(), series_id)?;
    repository.reset(series_id, &config.series)?;
    warn!(target: "runtime", series_id, "stored series replaced by a fresh one");
    Ok(sheet)
}
