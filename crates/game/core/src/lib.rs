//! Deterministic rules of a werewolf game for one human and AI seats.
//!
//! `game-core` defines the roster and phase model, the night, vote and win
//! rules, and the role-scoped event log. All phase changes flow through
//! [`engine::GameEngine`]; the runtime crate drives it and supplies AI
//! decisions.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod log;
pub mod rules;
pub mod state;

pub use action::{
    AnswerShape, DecisionTask, HumanPrompt, IntentError, ParsedAction, PlayerIntent,
    TargetAction, TaskKind,
};
pub use config::{GameConfig, GameSetup};
pub use engine::{EngineError, Game, GameEngine, Step};
pub use env::{PcgRng, RngOracle, compute_seed};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use log::{LogCategory, LogDraft, LogEntry, LogKind, Visibility, VisibilityLog};
pub use rules::{Death, NightOutcome, VoteOutcome};
pub use state::{
    DeathCause, GamePhase, GameState, HunterResume, InitializationError, PendingHunter, Player,
    PlayerId, Role, RoleSet, RoundRecord, SeerCheck, Winner, WitchPotions,
};
