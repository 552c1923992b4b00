//! Sync worker pushing aggregate updates to the score service.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use skat_core::AggregateUpdate;

use crate::events::{EffectEvent, EventBus};
use crate::sync::ScoreSync;

/// Background task draining the sync queue in order. Failures are reported,
/// never retried.
pub struct SyncWorker {
    sync: Arc<dyn ScoreSync>,
    update_rx: mpsc::Receiver<AggregateUpdate>,
    event_bus: EventBus,
}

impl SyncWorker {
    pub fn new(
        sync: Arc<dyn ScoreSync>,
        update_rx: mpsc::Receiver<AggregateUpdate>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            sync,
            update_rx,
            event_bus,
        }
    }

    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(update) = self.update_rx.recv() => {
                    self.push(update).await;
                }
                else => break,
            }
        }

        info!(target: "runtime::sync", "sync worker stopped");
    }

    async fn push(&self, update: AggregateUpdate) {
        match self.sync.push(&update).await {
            Ok(()) => {
                debug!(
                    target: "runtime::sync",
                    participant = %update.participant,
                    total_points = update.total_points,
                    "aggregate synced"
                );
                self.event_bus.publish(EffectEvent::Synced {
                    participant: update.participant,
                    total_points: update.total_points,
                });
            }
            Err(error) => {
                warn!(
                    target: "runtime::sync",
                    participant = %update.participant,
                    error = %error,
                    "aggregate sync failed"
                );
                self.event_bus.publish(EffectEvent::SyncFailed {
                    participant: update.participant,
                    error: error.to_string(),
                });
            }
        }
    }
}
