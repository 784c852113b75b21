//! Phase sequencing for one game.
//!
//! The [`GameEngine`] is the only code that moves [`GameState::phase`]. It
//! borrows the state and the log from their owner (usually a [`Game`]) and
//! exposes three entry points:
//!
//! - [`GameEngine::advance`] runs the deterministic part of the current phase
//!   and reports what the phase is waiting for,
//! - [`GameEngine::apply_decision`] commits an AI seat's answer,
//! - [`GameEngine::apply_intent`] validates and commits human input.
//!
//! The asynchronous part (asking AI seats) lives in the runtime crate.

mod day;
mod decision;
mod intent;
mod night;
mod plan;

use crate::action::{DecisionTask, HumanPrompt};
use crate::config::{GameConfig, GameSetup};
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::log::{LogCategory, LogDraft, VisibilityLog};
use crate::rules;
use crate::state::{GamePhase, GameState, InitializationError, Winner};

/// What the current phase needs next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Nothing can happen until the game is started or restarted.
    Idle,
    /// Blocked on input from the human seat.
    AwaitHuman(HumanPrompt),
    /// Blocked on one AI decision.
    Decide(DecisionTask),
    /// The phase can be resolved immediately.
    Transition(GamePhase),
}

/// Internal step failures. The phase is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("decision {task:?} does not match the current step")]
    StaleDecision { task: DecisionTask, context: ErrorContext },

    #[error("phase {} has no pending hunter shot", .context.phase)]
    MissingHunter { context: ErrorContext },

    #[error("a game can only be started from setup, not from {}", .context.phase)]
    AlreadyStarted { context: ErrorContext },
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            EngineError::StaleDecision { .. } => ErrorSeverity::Recoverable,
            EngineError::MissingHunter { .. } | EngineError::AlreadyStarted { .. } => {
                ErrorSeverity::Internal
            }
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            EngineError::StaleDecision { context, .. }
            | EngineError::MissingHunter { context }
            | EngineError::AlreadyStarted { context } => Some(context),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            EngineError::StaleDecision { .. } => "STALE_DECISION",
            EngineError::MissingHunter { .. } => "MISSING_HUNTER",
            EngineError::AlreadyStarted { .. } => "ALREADY_STARTED",
        }
    }
}

/// Owned state and log of one game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    pub state: GameState,
    pub log: VisibilityLog,
}

impl Game {
    /// Deals a new table. The game stays in `Setup` until started.
    pub fn new(config: &GameConfig, setup: &GameSetup) -> Result<Self, InitializationError> {
        let state = GameState::deal(config, setup)?;
        let log = VisibilityLog::new(state.human);
        Ok(Self { state, log })
    }

    pub fn engine(&mut self) -> GameEngine<'_> {
        GameEngine::new(&mut self.state, &mut self.log)
    }
}

/// Reducer over a borrowed game.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    log: &'a mut VisibilityLog,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState, log: &'a mut VisibilityLog) -> Self {
        Self { state, log }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    pub fn log(&self) -> &VisibilityLog {
        self.log
    }

    /// Leaves `Setup`: briefs the pack and shows the human their role.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.state.phase != GamePhase::Setup {
            return Err(EngineError::AlreadyStarted {
                context: self.context(),
            });
        }
        let count = self.state.players.len();
        self.log.append(LogDraft::public(format!(
            "A new game begins with {count} players. Roles have been dealt."
        )));
        let team = self.state.werewolf_team();
        self.log.werewolf_team(&team);
        self.enter(GamePhase::ShowRoleModal);
        Ok(())
    }

    /// Runs the current phase as far as it can go without outside input.
    ///
    /// Calling this repeatedly while the phase waits on input changes
    /// nothing: the human prompt is written once per phase entry and a
    /// pending AI decision is only reported.
    pub fn advance(&mut self) -> Result<Step, EngineError> {
        let step = self.plan();
        match &step {
            Step::Idle | Step::Decide(_) => {}
            Step::AwaitHuman(prompt) => {
                if self.state.prompted != Some(prompt.phase) {
                    self.state.prompted = Some(prompt.phase);
                    self.log.append(
                        LogDraft::ui_only(prompt.message.clone()).category(LogCategory::GameFlow),
                    );
                }
            }
            Step::Transition(phase) => self.transition(*phase)?,
        }
        Ok(step)
    }

    fn transition(&mut self, phase: GamePhase) -> Result<(), EngineError> {
        match phase {
            GamePhase::NightStart => self.start_night(),
            GamePhase::WerewolvesAct => self.enter(GamePhase::GuardActs),
            GamePhase::GuardActs => self.enter(GamePhase::SeerActs),
            GamePhase::SeerActs => self.enter(GamePhase::WitchActsSave),
            GamePhase::WitchActsSave => self.enter(GamePhase::WitchActsPoison),
            GamePhase::WitchActsPoison => self.enter(GamePhase::NightResolution),
            GamePhase::NightResolution => self.resolve_night(),
            GamePhase::DayStart => self.start_day(),
            GamePhase::HunterMayAct => self.finish_hunter()?,
            GamePhase::Discussion => self.enter(GamePhase::Voting),
            GamePhase::Voting => self.enter(GamePhase::VoteResults),
            GamePhase::VoteResults => self.resolve_votes(),
            GamePhase::Setup | GamePhase::ShowRoleModal | GamePhase::GameOver => {}
        }
        Ok(())
    }

    /// Moves to `phase` and performs its entry bookkeeping.
    fn enter(&mut self, phase: GamePhase) {
        self.state.phase = phase;
        self.state.prompted = None;
        match phase {
            GamePhase::WerewolvesAct => {
                self.announce("Werewolves, open your eyes and choose a victim.");
            }
            GamePhase::GuardActs => self.announce("Guard, open your eyes."),
            GamePhase::SeerActs => self.announce("Seer, open your eyes."),
            GamePhase::WitchActsSave => self.enter_witch(),
            GamePhase::Discussion => self.open_discussion(),
            GamePhase::Voting => self.open_voting(),
            _ => {}
        }
    }

    /// Runs the win evaluator. Returns `true` and moves to `GameOver` when
    /// the game just ended.
    fn check_win(&mut self) -> bool {
        let Some(winner) = rules::evaluate(&self.state.players) else {
            return false;
        };
        self.state.winner = Some(winner);
        let message = match winner {
            Winner::Villagers => "All werewolves have been eliminated. The villagers win!",
            Winner::Werewolves => {
                "The werewolves now equal or outnumber the villagers. The werewolves win!"
            }
            Winner::Draw => "No one is left alive. The game ends in a draw.",
        };
        self.announce(message);
        self.enter(GamePhase::GameOver);
        true
    }

    fn announce(&mut self, message: impl Into<String>) {
        self.log
            .append(LogDraft::public(message).category(LogCategory::GameFlow));
    }

    fn debug(&mut self, message: impl Into<String>) {
        self.log.append(LogDraft::system(message));
    }

    fn context(&self) -> ErrorContext {
        ErrorContext::new(self.state.phase, self.state.round)
    }
}

#[cfg(test)]
mod tests;
