//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving the score sheet or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use skat_core::{Command, ExecutionOutcome, ParticipantIndex, ScoreSheet};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::SheetRequest;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<SheetRequest>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<SheetRequest>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Applies a command to the score sheet.
    ///
    /// Resolves once the sheet has processed the command. Side effects of a
    /// completed round are queued to the background workers and may still be
    /// in flight when this returns.
    pub async fn execute(&self, command: Command) -> Result<ExecutionOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(SheetRequest::Execute {
                command,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Shorthand for [`Command::select_player`].
    pub async fn select_player(&self, player: ParticipantIndex) -> Result<ExecutionOutcome> {
        self.execute(Command::select_player(player)).await
    }

    /// Shorthand for [`Command::start_editing`].
    pub async fn start_editing(&self, round_number: u32) -> Result<ExecutionOutcome> {
        self.execute(Command::start_editing(round_number)).await
    }

    /// Shorthand for [`Command::cancel_editing`].
    pub async fn cancel_editing(&self) -> Result<ExecutionOutcome> {
        self.execute(Command::cancel_editing()).await
    }

    /// Query the current score sheet (read-only snapshot)
    pub async fn query_sheet(&self) -> Result<ScoreSheet> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(SheetRequest::QuerySheet { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Sheet` - Applied and rejected commands, completed rounds
    /// - `Topic::Effects` - Outcome of remote sync and persistence
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use skat_runtime::Topic;
    ///
    /// let mut sheet_rx = handle.subscribe(Topic::Sheet);
    /// while let Ok(event) = sheet_rx.recv().await {
    ///     // Handle sheet events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
