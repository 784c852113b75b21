//! Driver worker: runs the controller until it blocks, once per wake-up.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::controller::{Blocked, Controller};
use crate::events::{Event, PhaseEvent};

/// Wakes the driver. Wakes sent while one is already pending are merged.
#[derive(Clone)]
pub struct Waker(mpsc::Sender<()>);

impl Waker {
    pub fn wake(&self) {
        match self.0.try_send(()) {
            Ok(()) | Err(mpsc::error::TrySendError::Full(())) => {}
            Err(mpsc::error::TrySendError::Closed(())) => {
                debug!(target: "runtime::driver", "driver gone, wake dropped");
            }
        }
    }
}

pub struct DriverWorker {
    controller: Arc<Controller>,
    wake_rx: mpsc::Receiver<()>,
}

impl DriverWorker {
    pub fn new(controller: Arc<Controller>) -> (Self, Waker) {
        let (wake_tx, wake_rx) = mpsc::channel(1);
        (
            Self {
                controller,
                wake_rx,
            },
            Waker(wake_tx),
        )
    }

    /// Runs until every [`Waker`] has been dropped.
    pub async fn run(mut self) {
        while self.wake_rx.recv().await.is_some() {
            match self.controller.run_until_blocked().await {
                // Published here, after the step token is released, so a
                // subscriber reacting to it is not refused as busy.
                Blocked::Human(prompt) => {
                    debug!(target: "runtime::driver", phase = %prompt.phase, "waiting for the human");
                    self.controller
                        .events()
                        .publish(Event::Phase(PhaseEvent::AwaitingHuman {
                            phase: prompt.phase,
                        }));
                }
                Blocked::GameOver(winner) => {
                    info!(target: "runtime::driver", %winner, "game over");
                }
                blocked => debug!(target: "runtime::driver", ?blocked, "driver parked"),
            }
        }
        debug!(target: "runtime::driver", "all wakers dropped, driver exiting");
    }
}
