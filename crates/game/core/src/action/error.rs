use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::{GamePhase, PlayerId};

/// Rejected human input. The message is meant to be shown to the player;
/// nothing in the game changed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IntentError {
    #[error("that action is not available during {phase}")]
    WrongPhase { phase: GamePhase },

    #[error("it is not your turn")]
    NotYourTurn,

    #[error("you are dead and cannot act")]
    ActorDead,

    #[error("Player {0} does not exist")]
    UnknownTarget(PlayerId),

    #[error("Player {0} is already dead")]
    TargetDead(PlayerId),

    #[error("you cannot target yourself")]
    SelfTarget,

    #[error("you cannot protect Player {0} two nights in a row")]
    RepeatProtect(PlayerId),

    #[error("the {0} has already been used")]
    PotionUsed(&'static str),

    #[error("no one was attacked tonight")]
    NoVictim,

    #[error("the game is over")]
    GameOver,

    #[error("the game is busy resolving another step")]
    Busy,
}

impl GameError for IntentError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            IntentError::Busy => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            IntentError::WrongPhase { .. } => "WRONG_PHASE",
            IntentError::NotYourTurn => "NOT_YOUR_TURN",
            IntentError::ActorDead => "ACTOR_DEAD",
            IntentError::UnknownTarget(_) => "UNKNOWN_TARGET",
            IntentError::TargetDead(_) => "TARGET_DEAD",
            IntentError::SelfTarget => "SELF_TARGET",
            IntentError::RepeatProtect(_) => "REPEAT_PROTECT",
            IntentError::PotionUsed(_) => "POTION_USED",
            IntentError::NoVictim => "NO_VICTIM",
            IntentError::GameOver => "GAME_OVER",
            IntentError::Busy => "BUSY",
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        None
    }
}
