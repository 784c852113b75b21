//! Asks AI seats for decisions.
//!
//! The orchestrator resolves the seat's provider, sends it a
//! [`DecisionRequest`], and normalises the reply. It never touches the game:
//! the controller commits the result after checking it is still current.

mod normalize;
mod request;

pub use normalize::{clean, normalize};
pub use request::{DecisionRequest, RosterEntry, roster_for};

use game_core::ParsedAction;
use tracing::{debug, warn};

use crate::api::{DecisionError, ProviderRegistry};

pub struct DecisionOrchestrator {
    registry: ProviderRegistry,
}

impl DecisionOrchestrator {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Asks the seat's provider and normalises the reply.
    ///
    /// Every failure is returned, never retried: the engine decides what a
    /// missing answer means for the task.
    pub async fn decide(&self, request: &DecisionRequest) -> Result<ParsedAction, DecisionError> {
        let task = request.task;
        let kind = self.registry.seat_kind(request.player);
        let provider = self
            .registry
            .get(kind)
            .map_err(|_| DecisionError::NoProvider { kind })?;

        debug!(
            target: "runtime::orchestrator",
            player = %request.player,
            task = %task.kind,
            round = task.round,
            history = request.history.len(),
            "requesting decision"
        );

        let raw = provider.decide(request).await.inspect_err(|error| {
            warn!(
                target: "runtime::orchestrator",
                player = %request.player,
                task = %task.kind,
                %error,
                "decision provider failed"
            );
        })?;

        let parsed = normalize(task.kind, &raw).inspect_err(|error| {
            warn!(
                target: "runtime::orchestrator",
                player = %request.player,
                %error,
                "unusable decision"
            );
        })?;

        debug!(
            target: "runtime::orchestrator",
            player = %request.player,
            task = %task.kind,
            answer = ?parsed,
            "decision received"
        );
        Ok(parsed)
    }
}
