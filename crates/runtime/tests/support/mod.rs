#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use game_core::{GameConfig, GamePhase, GameSetup, HumanPrompt, PlayerId, PlayerIntent, Role, TaskKind};
use runtime::{
    Controller, DecisionOrchestrator, DecisionProvider, DecisionRequest, EventBus, ProviderError,
    ProviderKind, ProviderRegistry,
};

/// Always takes the lowest legal seat, declines optional actions and says
/// the same thing every day. Games played with it are fully determined by
/// the seed.
pub struct FirstChoice;

#[async_trait]
impl DecisionProvider for FirstChoice {
    async fn decide(&self, request: &DecisionRequest) -> Result<String, ProviderError> {
        match request.task.kind {
            TaskKind::DiscussionStatement => Ok("I have nothing to add.".to_string()),
            TaskKind::WitchSave | TaskKind::WitchPoison | TaskKind::HunterShoot => {
                Ok("no".to_string())
            }
            _ => request
                .choices
                .first()
                .map(ToString::to_string)
                .ok_or_else(|| ProviderError::Refused("no legal choice".into())),
        }
    }
}

/// Every call fails.
pub struct Offline;

#[async_trait]
impl DecisionProvider for Offline {
    async fn decide(&self, _request: &DecisionRequest) -> Result<String, ProviderError> {
        Err(ProviderError::Unavailable("backend offline".into()))
    }
}

/// Holds the first decision until [`Gate::open`] is called, then behaves
/// like [`FirstChoice`].
#[derive(Default)]
pub struct Gate {
    entered: Notify,
    release: Notify,
    open: AtomicBool,
}

impl Gate {
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub fn open(&self) {
        self.open.store(true, Ordering::SeqCst);
        self.release.notify_one();
    }
}

#[async_trait]
impl DecisionProvider for Gate {
    async fn decide(&self, request: &DecisionRequest) -> Result<String, ProviderError> {
        if !self.open.load(Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        FirstChoice.decide(request).await
    }
}

pub fn registry_with(provider: Arc<dyn DecisionProvider>) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    registry.register_arc(ProviderKind::External, provider);
    registry.set_default(ProviderKind::External);
    registry
}

pub fn controller_with(provider: Arc<dyn DecisionProvider>) -> Arc<Controller> {
    Arc::new(Controller::new(
        GameConfig::default(),
        DecisionOrchestrator::new(registry_with(provider)),
        EventBus::with_capacity(1024),
    ))
}

/// Human villager in seat 0, so the human only ever votes and speaks.
pub fn villager_setup(seed: u64) -> GameSetup {
    GameSetup::with_seed(seed)
        .human_seat(PlayerId(0))
        .human_role(Role::Villager)
}

/// What a passive human villager answers to `prompt`.
pub fn human_answer(prompt: &HumanPrompt) -> PlayerIntent {
    match prompt.phase {
        GamePhase::ShowRoleModal => PlayerIntent::AcknowledgeRole,
        GamePhase::Voting => prompt
            .choices
            .first()
            .copied()
            .map(PlayerIntent::CastVote)
            .unwrap_or(PlayerIntent::Pass),
        _ => PlayerIntent::Pass,
    }
}
