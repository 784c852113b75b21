//! Inputs to the engine.
//!
//! - `task`: decisions posed to AI seats and their normalised answers
//! - `intent`: discrete inputs from the human seat
//! - `error`: rejection reasons for human input

pub mod error;
pub mod intent;
pub mod task;

pub use error::IntentError;
pub use intent::{HumanPrompt, PlayerIntent, TargetAction};
pub use task::{AnswerShape, DecisionTask, ParsedAction, TaskKind};
