//! Common error infrastructure for game-core.
//!
//! Domain errors live next to the code that raises them ([`IntentError`] with
//! the human inputs, [`EngineError`] with the engine). This module holds the
//! pieces they share.
//!
//! [`IntentError`]: crate::action::IntentError
//! [`EngineError`]: crate::engine::EngineError

use crate::state::{GamePhase, PlayerId};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: retrying later may succeed
/// - **Validation**: the input itself is wrong
/// - **Internal**: the state disagrees with itself
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Retry with the same input once the game is idle.
    Recoverable,

    /// Invalid input, rejected without any state change.
    ///
    /// Examples: dead target, self-target, wrong phase
    Validation,

    /// Unexpected state inconsistency. The step is aborted and the phase
    /// stays where it was.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Where in the game an error was raised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    pub phase: GamePhase,
    pub round: u32,
    pub actor: Option<PlayerId>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(phase: GamePhase, round: u32) -> Self {
        Self {
            phase,
            round,
            actor: None,
        }
    }

    #[must_use]
    pub const fn with_actor(mut self, actor: PlayerId) -> Self {
        self.actor = Some(actor);
        self
    }
}

/// Common trait for all game-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Stable identifier for the error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
