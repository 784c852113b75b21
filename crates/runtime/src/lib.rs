//! Runtime orchestration for a werewolf table.
//!
//! This crate drives the deterministic `game-core` engine: it asks AI seats
//! for their decisions through pluggable providers, applies human input, and
//! publishes what happens on a topic-based event bus. Consumers embed
//! [`Runtime`] and talk to it through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the builder and owns the workers
//! - [`controller`] is the single-flight step driver over one session
//! - [`orchestrator`] turns engine tasks into provider requests and parses the replies
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`providers`] ships the random and scripted decision providers
pub mod api;
pub mod controller;
pub mod events;
pub mod orchestrator;
pub mod providers;
pub mod runtime;
pub mod view;

mod workers;

pub use api::{
    DecisionError, DecisionProvider, ProviderError, ProviderKind, ProviderRegistry, Result,
    RuntimeError, RuntimeHandle,
};
pub use controller::{Blocked, Controller};
pub use events::{Event, EventBus, LogEvent, OutcomeEvent, PhaseEvent, Topic};
pub use orchestrator::{DecisionOrchestrator, DecisionRequest, RosterEntry};
pub use providers::{RandomProvider, ScriptedProvider};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use view::TableView;
