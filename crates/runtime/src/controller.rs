//! Single-flight driver of the current game session.
//!
//! The controller owns the session behind an async mutex and is the only
//! code that calls into the engine. One step body runs at a time, guarded by
//! an atomic token. The session lock is never held while an AI decision is
//! awaited; when the answer arrives the step's ticket (game generation and
//! task) is checked again before anything is committed.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use game_core::{
    DecisionTask, ErrorSeverity, Game, GameConfig, GameError, GamePhase, GameSetup, GameState,
    HumanPrompt, IntentError, LogCategory, LogDraft, LogEntry, LogKind, PlayerIntent, Step,
    Visibility, Winner,
};

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, LogEvent, OutcomeEvent, PhaseEvent};
use crate::orchestrator::{DecisionOrchestrator, DecisionRequest};
use crate::view::TableView;

/// Where [`Controller::run_until_blocked`] stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Blocked {
    NotStarted,
    /// Another step body holds the token.
    Busy,
    Human(HumanPrompt),
    GameOver(Winner),
    Stalled(String),
}

struct Session {
    game: Game,
    generation: u64,
    /// Id of the last log entry mirrored to tracing and the bus.
    mirrored: u64,
    stalled: Option<String>,
}

#[derive(Default)]
struct Slot {
    session: Option<Session>,
    generation: u64,
}

/// Identifies the decision a step is waiting on.
#[derive(Debug, Clone, Copy)]
struct StepTicket {
    generation: u64,
    task: DecisionTask,
}

/// Held for the whole body of a step, await included. Released on drop, so
/// every exit path frees it.
struct StepToken<'a>(&'a AtomicBool);

impl<'a> StepToken<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for StepToken<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Controller {
    config: GameConfig,
    slot: Mutex<Slot>,
    busy: AtomicBool,
    orchestrator: DecisionOrchestrator,
    events: EventBus,
}

impl Controller {
    pub fn new(config: GameConfig, orchestrator: DecisionOrchestrator, events: EventBus) -> Self {
        Self {
            config,
            slot: Mutex::new(Slot::default()),
            busy: AtomicBool::new(false),
            orchestrator,
            events,
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Deals and starts a game. Fails while another game is still running.
    pub async fn start(&self, setup: &GameSetup) -> Result<()> {
        let mut slot = self.slot.lock().await;
        if slot
            .session
            .as_ref()
            .is_some_and(|s| !s.game.state.is_over())
        {
            return Err(RuntimeError::GameInProgress);
        }
        self.install(&mut slot, setup)?;
        Ok(())
    }

    /// Replaces the current game wholesale. A decision still in flight for
    /// the old game is discarded when it returns.
    pub async fn restart(&self, setup: &GameSetup) -> Result<()> {
        let mut slot = self.slot.lock().await;
        let generation = self.install(&mut slot, setup)?;
        self.events
            .publish(Event::Outcome(OutcomeEvent::Restarted { generation }));
        Ok(())
    }

    fn install(&self, slot: &mut Slot, setup: &GameSetup) -> Result<u64> {
        let mut game = Game::new(&self.config, setup)?;
        game.engine().start()?;

        slot.generation += 1;
        let generation = slot.generation;
        let players = game.state.players.len();
        info!(
            target: "runtime::controller",
            generation,
            seed = game.state.game_seed,
            human = %game.state.human,
            players,
            "game dealt"
        );

        let session = slot.session.insert(Session {
            game,
            generation,
            mirrored: 0,
            stalled: None,
        });
        self.events
            .publish(Event::Outcome(OutcomeEvent::Started { generation, players }));
        self.settle(session, GamePhase::Setup);
        Ok(generation)
    }

    /// Applies human input. Rejected with [`IntentError::Busy`] while a step
    /// body is running or the game is stalled.
    pub async fn submit(&self, intent: PlayerIntent) -> std::result::Result<(), IntentError> {
        let Some(_token) = StepToken::acquire(&self.busy) else {
            return Err(IntentError::Busy);
        };
        let mut slot = self.slot.lock().await;
        let Some(session) = slot.session.as_mut() else {
            return Err(IntentError::WrongPhase {
                phase: GamePhase::Setup,
            });
        };
        if session.stalled.is_some() {
            return Err(IntentError::Busy);
        }

        let before = session.game.state.phase;
        let description = format!("{intent:?}");
        match session.game.engine().apply_intent(intent) {
            Ok(()) => {
                info!(target: "runtime::controller", phase = %before, intent = %description, "intent applied");
                self.settle(session, before);
                Ok(())
            }
            Err(err) => {
                debug!(
                    target: "runtime::controller",
                    phase = %before,
                    intent = %description,
                    code = err.error_code(),
                    "intent rejected"
                );
                Err(err)
            }
        }
    }

    /// Advances the game until it needs the human, ends, or stalls, asking
    /// AI seats for their decisions one at a time along the way.
    pub async fn run_until_blocked(&self) -> Blocked {
        let Some(_token) = StepToken::acquire(&self.busy) else {
            return Blocked::Busy;
        };

        loop {
            let (ticket, request) = {
                let mut slot = self.slot.lock().await;
                let Some(session) = slot.session.as_mut() else {
                    return Blocked::NotStarted;
                };
                if let Some(message) = &session.stalled {
                    return Blocked::Stalled(message.clone());
                }

                let before = session.game.state.phase;
                let step = session.game.engine().advance();
                self.settle(session, before);

                match step {
                    Err(err) => return self.stall(session, &err),
                    Ok(Step::Transition(_)) => continue,
                    Ok(Step::Idle) => {
                        return match session.game.state.winner {
                            Some(winner) => Blocked::GameOver(winner),
                            None => Blocked::NotStarted,
                        };
                    }
                    Ok(Step::AwaitHuman(prompt)) => return Blocked::Human(prompt),
                    Ok(Step::Decide(task)) => {
                        let game = &session.game;
                        match DecisionRequest::build(&game.state, &game.log, task) {
                            Some(request) => (
                                StepTicket {
                                    generation: session.generation,
                                    task,
                                },
                                request,
                            ),
                            None => {
                                let message = format!("player {} is not seated", task.actor);
                                return self.stall(session, &message);
                            }
                        }
                    }
                }
            };

            self.events.publish(Event::Phase(PhaseEvent::Deciding {
                phase: ticket.task.kind.phase(),
                player: ticket.task.actor,
            }));
            let answer = self.orchestrator.decide(&request).await;

            let mut slot = self.slot.lock().await;
            let Some(session) = slot
                .session
                .as_mut()
                .filter(|s| s.generation == ticket.generation)
            else {
                debug!(
                    target: "runtime::controller",
                    generation = ticket.generation,
                    player = %ticket.task.actor,
                    "discarding decision for a replaced game"
                );
                continue;
            };

            let answer = match answer {
                Ok(answer) => Some(answer),
                Err(err) => {
                    session.game.log.append(
                        LogDraft::system(format!(
                            "Player {} failed to decide {}: {err}",
                            ticket.task.actor, ticket.task.kind
                        ))
                        .kind(LogKind::Error),
                    );
                    None
                }
            };

            let before = session.game.state.phase;
            let applied = session.game.engine().apply_decision(&ticket.task, answer);
            self.settle(session, before);
            match applied {
                Ok(()) => {}
                Err(err) if err.severity() == ErrorSeverity::Recoverable => {
                    debug!(
                        target: "runtime::controller",
                        player = %ticket.task.actor,
                        task = %ticket.task.kind,
                        error = %err,
                        "discarding stale decision"
                    );
                }
                Err(err) => return self.stall(session, &err),
            }
        }
    }

    /// Writes a public error entry and freezes the session until restart.
    fn stall(&self, session: &mut Session, err: &dyn std::fmt::Display) -> Blocked {
        let phase = session.game.state.phase;
        let message = err.to_string();
        error!(target: "runtime::controller", %phase, error = %message, "step failed, game stalled");

        session.game.log.append(
            LogDraft::public(format!(
                "Something went wrong ({message}). The game is paused until it is restarted."
            ))
            .kind(LogKind::Error)
            .category(LogCategory::Error),
        );
        session.stalled = Some(message.clone());
        self.settle(session, phase);
        self.events.publish(Event::Phase(PhaseEvent::Stalled {
            phase,
            error: message.clone(),
        }));
        Blocked::Stalled(message)
    }

    /// Mirrors new log entries and announces phase changes.
    fn settle(&self, session: &mut Session, before: GamePhase) {
        for entry in session.game.log.since(session.mirrored) {
            trace_entry(entry);
            self.events.publish(Event::Log(LogEvent {
                generation: session.generation,
                id: entry.id,
                kind: entry.kind,
                category: entry.category,
                visibility: entry.visibility,
            }));
            session.mirrored = entry.id;
        }

        let state = &session.game.state;
        if state.phase == before {
            return;
        }
        info!(
            target: "runtime::controller",
            from = %before,
            to = %state.phase,
            round = state.round,
            "phase changed"
        );
        self.events.publish(Event::Phase(PhaseEvent::Changed {
            from: before,
            to: state.phase,
            round: state.round,
        }));
        if let (GamePhase::GameOver, Some(winner)) = (state.phase, state.winner) {
            self.events.publish(Event::Outcome(OutcomeEvent::GameOver {
                winner,
                round: state.round,
            }));
        }
    }

    pub async fn snapshot(&self) -> Option<GameState> {
        let slot = self.slot.lock().await;
        slot.session.as_ref().map(|s| s.game.state.clone())
    }

    /// Log entries the human may read, oldest first.
    pub async fn ui_log(&self) -> Vec<LogEntry> {
        let slot = self.slot.lock().await;
        let Some(session) = slot.session.as_ref() else {
            return Vec::new();
        };
        let state = &session.game.state;
        match state.human_player() {
            Some(human) => session
                .game
                .log
                .for_ui(human.id, human.role)
                .into_iter()
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// The table as the human is entitled to see it.
    pub async fn table_view(&self) -> Option<TableView> {
        let mut slot = self.slot.lock().await;
        let session = slot.session.as_mut()?;
        let prompt = match session.game.engine().plan() {
            Step::AwaitHuman(prompt) => Some(prompt),
            _ => None,
        };
        Some(TableView::build(
            &session.game.state,
            session.generation,
            prompt,
            session.stalled.clone(),
        ))
    }
}

fn trace_entry(entry: &LogEntry) {
    let id = entry.id;
    let category = entry.category;
    let visibility = entry.visibility;
    let text = entry.message.as_str();
    match (entry.visibility, entry.kind) {
        (_, LogKind::Error) => {
            warn!(target: "runtime::log", id, %category, %visibility, "{text}");
        }
        (Visibility::System, _) => {
            debug!(target: "runtime::log", id, %category, %visibility, "{text}");
        }
        _ => {
            info!(target: "runtime::log", id, %category, %visibility, "{text}");
        }
    }
}
