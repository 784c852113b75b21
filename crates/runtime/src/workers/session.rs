//! Session worker: serialises client commands onto the [`Controller`].
//!
//! Commands arrive from [`RuntimeHandle`](crate::RuntimeHandle) over an mpsc
//! channel and are answered through oneshot replies. Anything that may let
//! the game move on wakes the driver afterwards.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use game_core::{GameSetup, GameState, LogEntry, PlayerIntent};

use super::driver::Waker;
use crate::api::{Result, RuntimeError};
use crate::controller::Controller;
use crate::view::TableView;

/// Commands that can be sent to the session worker.
pub enum Command {
    /// Deal and start a game. Refused while one is running.
    Start {
        setup: GameSetup,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Throw the current game away and deal a new one.
    Restart {
        setup: GameSetup,
        reply: oneshot::Sender<Result<()>>,
    },
    Submit {
        intent: PlayerIntent,
        reply: oneshot::Sender<Result<()>>,
    },
    Snapshot {
        reply: oneshot::Sender<Option<GameState>>,
    },
    UiLog {
        reply: oneshot::Sender<Vec<LogEntry>>,
    },
    Table {
        reply: oneshot::Sender<Option<TableView>>,
    },
}

pub struct SessionWorker {
    controller: Arc<Controller>,
    command_rx: mpsc::Receiver<Command>,
    waker: Waker,
}

impl SessionWorker {
    pub fn new(controller: Arc<Controller>, command_rx: mpsc::Receiver<Command>, waker: Waker) -> Self {
        Self {
            controller,
            command_rx,
            waker,
        }
    }

    /// Runs until every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }
        debug!(target: "runtime::session", "command channel closed, session worker exiting");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Start { setup, reply } => {
                let result = self.controller.start(&setup).await;
                if result.is_ok() {
                    self.waker.wake();
                }
                if reply.send(result).is_err() {
                    debug!("Start reply channel closed (caller dropped)");
                }
            }
            Command::Restart { setup, reply } => {
                let result = self.controller.restart(&setup).await;
                if result.is_ok() {
                    self.waker.wake();
                }
                if reply.send(result).is_err() {
                    debug!("Restart reply channel closed (caller dropped)");
                }
            }
            Command::Submit { intent, reply } => {
                let result = self
                    .controller
                    .submit(intent)
                    .await
                    .map_err(RuntimeError::from);
                if result.is_ok() {
                    self.waker.wake();
                }
                if reply.send(result).is_err() {
                    debug!("Submit reply channel closed (caller dropped)");
                }
            }
            Command::Snapshot { reply } => {
                if reply.send(self.controller.snapshot().await).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
            Command::UiLog { reply } => {
                if reply.send(self.controller.ui_log().await).is_err() {
                    debug!("UiLog reply channel closed (caller dropped)");
                }
            }
            Command::Table { reply } => {
                if reply.send(self.controller.table_view().await).is_err() {
                    debug!("Table reply channel closed (caller dropped)");
                }
            }
        }
    }
}
