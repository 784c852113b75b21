//! Asynchronous abstraction for sourcing AI player decisions.
//!
//! Runtime users plug in [`DecisionProvider`] implementations so AI seats can
//! be driven by a language model, scripted fixtures, or a random policy.
use async_trait::async_trait;

use super::errors::ProviderError;
use crate::orchestrator::DecisionRequest;

/// Answers one decision for one AI seat.
///
/// Implementations return the raw reply text. The orchestrator normalises
/// it into a [`game_core::ParsedAction`]; the engine validates the result
/// against the current game before committing it.
#[async_trait]
pub trait DecisionProvider: Send + Sync {
    async fn decide(&self, request: &DecisionRequest) -> Result<String, ProviderError>;
}
