//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the session worker, decision providers, and the game
//! engine so clients can bubble them up with consistent context.
use std::fmt;

use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{EngineError, InitializationError, IntentError, PlayerId, TaskKind};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no game has been started")]
    NotStarted,

    #[error("a game is already in progress; restart it instead")]
    GameInProgress,

    #[error("{kind} decision provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("runtime worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("failed to deal a new game")]
    Setup(#[from] InitializationError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Intent(#[from] IntentError),
}

/// Failure reported by a [`DecisionProvider`](super::DecisionProvider).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("no scripted answer left for player {player}")]
    Exhausted { player: PlayerId },

    #[error("provider refused to answer: {0}")]
    Refused(String),
}

/// Why an AI seat produced no usable action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    #[error("no {kind} decision provider registered")]
    NoProvider { kind: ProviderKind },

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("unusable {kind} answer: {raw:?}")]
    Unusable { kind: TaskKind, raw: String },
}

#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum ProviderKind {
    /// Seeded random legal choices.
    Random,
    /// Fixtures and demos.
    Scripted,
    /// Anything supplied by the embedding application, such as a language
    /// model backend.
    External,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Random => "random",
            ProviderKind::Scripted => "scripted",
            ProviderKind::External => "external",
        };
        write!(f, "{}", label)
    }
}
