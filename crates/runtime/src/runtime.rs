//! High-level runtime orchestrator.
//!
//! The runtime owns the background workers, wires up command and wake
//! channels, and exposes a builder-based API for clients to drive a game.

use std::env;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use game_core::{GameConfig, GameSetup, PlayerId};

use crate::api::{DecisionProvider, ProviderKind, ProviderRegistry, Result, RuntimeError, RuntimeHandle};
use crate::controller::Controller;
use crate::events::EventBus;
use crate::orchestrator::DecisionOrchestrator;
use crate::providers::RandomProvider;
use crate::workers::{DriverWorker, SessionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Seed for the built-in random provider. `None` uses system entropy.
    pub provider_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            provider_seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by `WEREWOLF_EVENT_BUFFER`,
    /// `WEREWOLF_COMMAND_BUFFER` and `WEREWOLF_PROVIDER_SEED`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("WEREWOLF_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("WEREWOLF_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }
        config.provider_seed = read_env::<u64>("WEREWOLF_PROVIDER_SEED");

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Running game service
///
/// Design: Runtime owns the workers; [`RuntimeHandle`] is the cloneable
/// façade clients talk to.
pub struct Runtime {
    handle: RuntimeHandle,
    controller: Arc<Controller>,
    session_worker_handle: JoinHandle<()>,
    driver_worker_handle: JoinHandle<()>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Direct access to the controller, bypassing the workers.
    pub fn controller(&self) -> &Arc<Controller> {
        &self.controller
    }

    /// Convenience for `handle().start_game(setup)`.
    pub async fn start_game(&self, setup: GameSetup) -> Result<()> {
        self.handle.start_game(setup).await
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for both workers. Clones of the handle held elsewhere keep the
    /// session worker alive, so drop them first.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.session_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;
        self.driver_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    registry: ProviderRegistry,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            registry: ProviderRegistry::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn game_config(mut self, game_config: GameConfig) -> Self {
        self.config.game_config = game_config;
        self
    }

    /// Register a provider for `kind`, replacing any previous one.
    pub fn provider(mut self, kind: ProviderKind, provider: impl DecisionProvider + 'static) -> Self {
        self.registry.register(kind, provider);
        self
    }

    pub fn provider_arc(mut self, kind: ProviderKind, provider: Arc<dyn DecisionProvider>) -> Self {
        self.registry.register_arc(kind, provider);
        self
    }

    /// Kind used by seats without an explicit binding.
    pub fn default_provider(mut self, kind: ProviderKind) -> Self {
        self.registry.set_default(kind);
        self
    }

    pub fn bind_seat(mut self, seat: PlayerId, kind: ProviderKind) -> Self {
        self.registry.bind_seat(seat, kind);
        self
    }

    /// Build the runtime and spawn its workers.
    ///
    /// A [`RandomProvider`] is registered when none was supplied. Any other
    /// default kind must have been registered.
    pub async fn build(mut self) -> Result<Runtime> {
        if !self.registry.has(ProviderKind::Random) {
            self.registry.register(
                ProviderKind::Random,
                RandomProvider::new(self.config.provider_seed),
            );
        }
        let default_kind = self.registry.default_kind();
        if !self.registry.has(default_kind) {
            return Err(RuntimeError::ProviderNotSet { kind: default_kind });
        }
        info!(
            target: "runtime",
            providers = self.registry.provider_count(),
            default = %default_kind,
            "runtime starting"
        );

        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let controller = Arc::new(Controller::new(
            self.config.game_config,
            DecisionOrchestrator::new(self.registry),
            event_bus.clone(),
        ));

        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus);

        let (driver, waker) = DriverWorker::new(Arc::clone(&controller));
        let driver_worker_handle = tokio::spawn(async move {
            driver.run().await;
        });

        let session = SessionWorker::new(Arc::clone(&controller), command_rx, waker);
        let session_worker_handle = tokio::spawn(async move {
            session.run().await;
        });

        Ok(Runtime {
            handle,
            controller,
            session_worker_handle,
            driver_worker_handle,
        })
    }
}
