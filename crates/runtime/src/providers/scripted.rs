//! Decision provider that replays prepared answers.
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use game_core::{DecisionTask, PlayerId, TaskKind};

use crate::api::{DecisionProvider, ProviderError};
use crate::orchestrator::DecisionRequest;

/// Answers from per-seat queues first, then from per-task defaults.
///
/// Every request is recorded so tests can check who was asked what, and in
/// which order.
#[derive(Default)]
pub struct ScriptedProvider {
    queued: Mutex<HashMap<PlayerId, VecDeque<String>>>,
    defaults: HashMap<TaskKind, String>,
    asked: Mutex<Vec<DecisionTask>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `reply` as the seat's next answer.
    pub fn answer(self, seat: PlayerId, reply: impl Into<String>) -> Self {
        if let Ok(mut queued) = self.queued.lock() {
            queued.entry(seat).or_default().push_back(reply.into());
        }
        self
    }

    /// Reply used for `kind` whenever the seat's queue is empty.
    pub fn by_default(mut self, kind: TaskKind, reply: impl Into<String>) -> Self {
        self.defaults.insert(kind, reply.into());
        self
    }

    /// Tasks received so far, in order.
    pub fn asked(&self) -> Vec<DecisionTask> {
        self.asked
            .lock()
            .map(|asked| asked.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DecisionProvider for ScriptedProvider {
    async fn decide(&self, request: &DecisionRequest) -> Result<String, ProviderError> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(request.task);
        }

        let queued = self
            .queued
            .lock()
            .map_err(|_| ProviderError::Unavailable("script lock poisoned".into()))?
            .get_mut(&request.player)
            .and_then(VecDeque::pop_front);

        queued
            .or_else(|| self.defaults.get(&request.task.kind).cloned())
            .ok_or(ProviderError::Exhausted {
                player: request.player,
            })
    }
}
