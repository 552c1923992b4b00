//! Sheet worker that owns the authoritative [`skat_core::ScoreSheet`].
//!
//! Receives requests from [`crate::RuntimeHandle`], executes commands via
//! [`skat_core::SheetEngine`], publishes [`SheetEvent`] notifications and
//! forwards the resulting effects to the effect workers.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use skat_core::{
    AggregateUpdate, Command, Effect, ExecuteError, ExecutionOutcome, RoundRecord, ScoreSheet,
    SheetEngine, SkatError,
};

use crate::api::{Result, RuntimeError};
use crate::events::{EffectEvent, EventBus, SheetEvent};

/// Requests that can be sent to the sheet worker
pub enum SheetRequest {
    /// Execute a command against the sheet.
    Execute {
        command: Command,
        reply: oneshot::Sender<Result<ExecutionOutcome>>,
    },
    /// Query the current sheet (read-only).
    QuerySheet { reply: oneshot::Sender<ScoreSheet> },
}

/// Background task that processes score sheet commands one at a time.
pub struct SheetWorker {
    sheet: ScoreSheet,
    request_rx: mpsc::Receiver<SheetRequest>,
    event_bus: EventBus,
    sync_tx: mpsc::Sender<AggregateUpdate>,
    persist_tx: mpsc::UnboundedSender<RoundRecord>,
}

impl SheetWorker {
    pub fn new(
        sheet: ScoreSheet,
        request_rx: mpsc::Receiver<SheetRequest>,
        event_bus: EventBus,
        sync_tx: mpsc::Sender<AggregateUpdate>,
        persist_tx: mpsc::UnboundedSender<RoundRecord>,
    ) -> Self {
        Self {
            sheet,
            request_rx,
            event_bus,
            sync_tx,
            persist_tx,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        info!(
            target: "runtime::sheet",
            series_id = self.sheet.series_id(),
            round = self.sheet.current().number,
            "sheet worker started"
        );

        loop {
            tokio::select! {
                Some(request) = self.request_rx.recv() => {
                    self.handle_request(request);
                }
                else => break,
            }
        }

        info!(target: "runtime::sheet", "sheet worker stopped");
    }

    fn handle_request(&mut self, request: SheetRequest) {
        match request {
            SheetRequest::Execute { command, reply } => {
                let result = self.execute(&command);
                if reply.send(result).is_err() {
                    debug!(target: "runtime::sheet", "caller dropped before reply");
                }
            }
            SheetRequest::QuerySheet { reply } => {
                let _ = reply.send(self.sheet.clone());
            }
        }
    }

    fn execute(&mut self, command: &Command) -> Result<ExecutionOutcome> {
        debug!(target: "runtime::sheet", command = ?command, "executing command");

        let result = SheetEngine::new(&mut self.sheet).execute(command);
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(error) => {
                self.report_rejection(command, &error);
                return Err(RuntimeError::Rejected(error));
            }
        };

        if let Some(round_number) = outcome.superseded_edit {
            warn!(
                target: "runtime::sheet",
                round_number,
                "edit rolled back by a newer edit request"
            );
        }

        self.event_bus.publish(SheetEvent::CommandApplied {
            command: command.kind(),
            step: outcome.step,
        });

        for effect in &outcome.effects {
            self.dispatch(effect.clone());
        }

        Ok(outcome)
    }

    /// Hands an effect to its worker without waiting.
    fn dispatch(&self, effect: Effect) {
        match effect {
            Effect::SyncAggregate(update) => {
                let participant = update.participant;
                if let Err(error) = self.sync_tx.try_send(update) {
                    warn!(target: "runtime::sheet", %participant, %error, "sync queue unavailable");
                    self.event_bus.publish(EffectEvent::SyncFailed {
                        participant,
                        error: error.to_string(),
                    });
                }
            }
            Effect::PersistRound(record) => {
                let round_number = record.round.number;
                let series_id = record.series_id.clone();
                info!(
                    target: "runtime::sheet",
                    round_number,
                    status = ?record.status,
                    "round completed"
                );
                self.event_bus.publish(SheetEvent::RoundCompleted {
                    round_number,
                    status: record.status,
                });

                if let Err(error) = self.persist_tx.send(record) {
                    warn!(target: "runtime::sheet", round_number, %error, "persistence queue closed");
                    self.event_bus.publish(EffectEvent::PersistFailed {
                        series_id,
                        round_number,
                        error: error.to_string(),
                    });
                }
            }
        }
    }

    fn report_rejection(&self, command: &Command, error: &ExecuteError) {
        let phase = error.phase();
        if error.severity().is_internal() {
            tracing::error!(
                target: "runtime::sheet",
                command = %command.kind(),
                phase = phase.as_str(),
                error = %error,
                "command failed on an internal error"
            );
        } else {
            warn!(
                target: "runtime::sheet",
                command = %command.kind(),
                code = error.error_code(),
                error = %error.sheet_error(),
                "command rejected"
            );
        }

        self.event_bus.publish(SheetEvent::CommandRejected {
            command: command.kind(),
            phase,
            code: error.error_code().to_owned(),
            error: error.sheet_error().to_string(),
        });
    }
}
