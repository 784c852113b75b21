//! Line-oriented terminal front end.
//!
//! Reads commands from stdin and reacts to runtime events. Log text is
//! always fetched through [`RuntimeHandle::ui_log`], so only entries the
//! human may read ever reach the screen.
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use game_core::{LogEntry, LogKind, Winner};
use runtime::{Event, OutcomeEvent, PhaseEvent, RuntimeError, RuntimeHandle, Topic};

use crate::command::{Command, HELP};
use crate::config::ClientConfig;

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Log entries already on screen, per game.
#[derive(Debug, Default, PartialEq, Eq)]
struct Cursor {
    generation: u64,
    last: u64,
}

impl Cursor {
    /// Starts over when `generation` is newer than any game seen so far.
    fn observe(&mut self, generation: u64) {
        if generation > self.generation {
            *self = Cursor {
                generation,
                last: 0,
            };
        }
    }

    /// Entries not printed yet, which are then counted as printed.
    fn unseen<'a>(&mut self, entries: &'a [LogEntry]) -> Vec<&'a LogEntry> {
        let fresh: Vec<&LogEntry> = entries.iter().filter(|e| e.id > self.last).collect();
        if let Some(last) = fresh.last() {
            self.last = last.id;
        }
        fresh
    }
}

pub struct App {
    handle: RuntimeHandle,
    config: ClientConfig,
    shown: Cursor,
}

impl App {
    pub fn new(handle: RuntimeHandle, config: ClientConfig) -> Self {
        Self {
            handle,
            config,
            shown: Cursor::default(),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut phases = self.handle.subscribe(Topic::Phase);
        let mut logs = self.handle.subscribe(Topic::Log);
        let mut outcomes = self.handle.subscribe(Topic::Outcome);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        println!("Type `help` for the list of commands.");
        let setup = self.config.game_setup();
        info!(target: "client", seed = setup.seed, "dealing first game");
        self.handle.start_game(setup).await?;

        loop {
            let flow = tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => self.on_line(&line).await?,
                    None => Flow::Quit,
                },
                event = logs.recv() => match event {
                    Ok(Event::Log(event)) => {
                        self.shown.observe(event.generation);
                        self.print_new_entries().await?;
                        Flow::Continue
                    }
                    Ok(_) => Flow::Continue,
                    Err(err) => on_recv_error(err),
                },
                event = phases.recv() => match event {
                    Ok(Event::Phase(event)) => {
                        self.on_phase(event).await?;
                        Flow::Continue
                    }
                    Ok(_) => Flow::Continue,
                    Err(err) => on_recv_error(err),
                },
                event = outcomes.recv() => match event {
                    Ok(Event::Outcome(event)) => {
                        self.on_outcome(event).await?;
                        Flow::Continue
                    }
                    Ok(_) => Flow::Continue,
                    Err(err) => on_recv_error(err),
                },
            };
            if flow == Flow::Quit {
                break;
            }
        }

        info!(target: "client", "leaving");
        Ok(())
    }

    async fn on_line(&mut self, line: &str) -> Result<Flow> {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Intent(intent) => {
                debug!(target: "client", ?intent, "submitting");
                match self.handle.submit(intent).await {
                    Ok(()) => {}
                    Err(RuntimeError::Intent(err)) => println!("{err}"),
                    Err(err) => return Err(err.into()),
                }
            }
            Command::Status => match self.handle.table().await {
                Ok(table) => println!("{}", serde_json::to_string_pretty(&table)?),
                Err(RuntimeError::NotStarted) => println!("No game yet."),
                Err(err) => return Err(err.into()),
            },
            Command::Log => {
                for entry in self.handle.ui_log().await? {
                    println!("{}", render(&entry));
                }
            }
            Command::Restart => {
                let setup = self.config.game_setup();
                info!(target: "client", seed = setup.seed, "restarting");
                self.handle.restart(setup).await?;
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn print_new_entries(&mut self) -> Result<()> {
        let entries = self.handle.ui_log().await?;
        for entry in self.shown.unseen(&entries) {
            println!("{}", render(entry));
        }
        Ok(())
    }

    async fn on_phase(&mut self, event: PhaseEvent) -> Result<()> {
        match event {
            PhaseEvent::AwaitingHuman { .. } => {
                self.print_new_entries().await?;
                let table = self.handle.table().await?;
                if let Some(prompt) = table.prompt {
                    println!("> {}", prompt.message);
                    if !prompt.choices.is_empty() {
                        let seats: Vec<String> =
                            prompt.choices.iter().map(ToString::to_string).collect();
                        println!("  choices: {}", seats.join(", "));
                    }
                }
            }
            PhaseEvent::Stalled { error, .. } => {
                self.print_new_entries().await?;
                println!("The game is stuck ({error}). Type `restart` to deal again.");
            }
            PhaseEvent::Changed { from, to, round } => {
                debug!(target: "client", %from, %to, round, "phase changed");
            }
            PhaseEvent::Deciding { phase, player } => {
                debug!(target: "client", %phase, %player, "waiting on AI");
            }
        }
        Ok(())
    }

    async fn on_outcome(&mut self, event: OutcomeEvent) -> Result<()> {
        match event {
            OutcomeEvent::Started { generation, players } => {
                self.shown.observe(generation);
                println!("New game #{generation} with {players} players.");
            }
            OutcomeEvent::Restarted { generation } => {
                self.shown.observe(generation);
                debug!(target: "client", generation, "restarted");
            }
            OutcomeEvent::GameOver { winner, round } => {
                self.print_new_entries().await?;
                println!("{} after {round} rounds.", headline(winner));
                println!("Type `restart` to play again or `quit` to leave.");
            }
        }
        Ok(())
    }
}

fn on_recv_error(err: RecvError) -> Flow {
    match err {
        RecvError::Lagged(skipped) => {
            warn!(target: "client", skipped, "event stream lagged");
            Flow::Continue
        }
        RecvError::Closed => Flow::Quit,
    }
}

fn render(entry: &LogEntry) -> String {
    match entry.kind {
        LogKind::Error => format!("! {}", entry.message),
        _ => format!("[{}] {}", entry.category, entry.message),
    }
}

fn headline(winner: Winner) -> &'static str {
    match winner {
        Winner::Villagers => "The village wins",
        Winner::Werewolves => "The werewolves win",
        Winner::Draw => "Nobody survived; it is a draw",
    }
}
