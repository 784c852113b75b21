//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! starting games, submitting human input, and streaming events from
//! specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{GameSetup, GameState, LogEntry, PlayerIntent};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::view::TableView;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(make(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Deal and start a new game. Fails with
    /// [`RuntimeError::GameInProgress`] while a game is still running.
    pub async fn start_game(&self, setup: GameSetup) -> Result<()> {
        self.request(|reply| Command::Start { setup, reply }).await?
    }

    /// Discard the current game, including any AI decision still in flight,
    /// and deal a new one.
    pub async fn restart(&self, setup: GameSetup) -> Result<()> {
        self.request(|reply| Command::Restart { setup, reply }).await?
    }

    /// Submit human input for the current phase.
    ///
    /// Rejections such as a wrong phase or an invalid target come back as
    /// [`RuntimeError::Intent`] and leave the game untouched.
    pub async fn submit(&self, intent: PlayerIntent) -> Result<()> {
        self.request(|reply| Command::Submit { intent, reply }).await?
    }

    /// Full state of the current game. Includes hidden roles; not for the
    /// human's screen.
    pub async fn snapshot(&self) -> Result<GameState> {
        self.request(|reply| Command::Snapshot { reply })
            .await?
            .ok_or(RuntimeError::NotStarted)
    }

    /// Log entries the human may read, oldest first.
    pub async fn ui_log(&self) -> Result<Vec<LogEntry>> {
        self.request(|reply| Command::UiLog { reply }).await
    }

    /// The table as the human sees it, including the pending prompt.
    pub async fn table(&self) -> Result<TableView> {
        self.request(|reply| Command::Table { reply })
            .await?
            .ok_or(RuntimeError::NotStarted)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Phase` - Phase changes, human waits and stalls
    /// - `Topic::Log` - One event per appended log entry
    /// - `Topic::Outcome` - Game start, restart and end
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut phases = handle.subscribe(Topic::Phase);
    /// while let Ok(event) = phases.recv().await {
    ///     // Refresh the table
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
