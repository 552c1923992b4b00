//! Persistence worker writing committed rounds to the repository.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use skat_core::RoundRecord;

use crate::events::{EffectEvent, EventBus};
use crate::repository::SeriesRepository;

/// Background task saving round records in commit order.
///
/// Repository calls block, so each save runs on the blocking pool. The queue
/// is unbounded: a dropped record would leave the stored aggregates out of
/// step with the stored rounds.
pub struct PersistenceWorker {
    repository: Arc<dyn SeriesRepository>,
    record_rx: mpsc::UnboundedReceiver<RoundRecord>,
    event_bus: EventBus,
}

impl PersistenceWorker {
    pub fn new(
        repository: Arc<dyn SeriesRepository>,
        record_rx: mpsc::UnboundedReceiver<RoundRecord>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            repository,
            record_rx,
            event_bus,
        }
    }

    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(record) = self.record_rx.recv() => {
                    self.save(record).await;
                }
                else => break,
            }
        }

        info!(target: "runtime::persistence", "persistence worker stopped");
    }

    async fn save(&self, record: RoundRecord) {
        let series_id = record.series_id.clone();
        let round_number = record.round.number;
        let repository = Arc::clone(&self.repository);

        let result = tokio::task::spawn_blocking(move || repository.save_round(&record)).await;

        let failure = match result {
            Ok(Ok(())) => {
                debug!(target: "runtime::persistence", %series_id, round_number, "round persisted");
                self.event_bus.publish(EffectEvent::Persisted {
                    series_id,
                    round_number,
                });
                return;
            }
            Ok(Err(repository_error)) => {
                warn!(
                    target: "runtime::persistence",
                    %series_id,
                    round_number,
                    error = %repository_error,
                    "failed to persist round"
                );
                repository_error.to_string()
            }
            Err(join_error) => {
                error!(
                    target: "runtime::persistence",
                    %series_id,
                    round_number,
                    error = %join_error,
                    "persistence task panicked"
                );
                join_error.to_string()
            }
        };

        self.event_bus.publish(EffectEvent::PersistFailed {
            series_id,
            round_number,
            error: failure,
        });
    }
}
