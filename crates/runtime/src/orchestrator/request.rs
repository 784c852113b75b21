//! What an AI seat is shown when asked for a decision.
use serde::Serialize;

use game_core::{DecisionTask, GameState, LogEntry, PlayerId, Role, TaskKind, VisibilityLog};

/// One seat as a given viewer is entitled to see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub id: PlayerId,
    pub name: String,
    pub is_human: bool,
    pub is_alive: bool,
    /// Role as known to the viewer: their own, werewolf teammates, the
    /// seer's latest check, and roles revealed by death.
    pub known_role: Option<Role>,
    pub teammate: bool,
}

/// Builds the roster as seen from `viewer`'s seat.
pub fn roster_for(state: &GameState, viewer: PlayerId) -> Vec<RosterEntry> {
    let viewer_is_wolf = state.player(viewer).is_some_and(|p| p.is_werewolf());
    state
        .players
        .iter()
        .map(|p| RosterEntry {
            id: p.id,
            name: p.name.clone(),
            is_human: p.is_human,
            is_alive: p.is_alive,
            known_role: state.known_role(viewer, p.id),
            teammate: viewer_is_wolf && p.id != viewer && p.is_werewolf(),
        })
        .collect()
}

/// Everything a provider may use to answer one task.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionRequest {
    pub player: PlayerId,
    pub role: Role,
    pub task: DecisionTask,
    /// Log entries the role may see, oldest first, untruncated.
    pub history: Vec<LogEntry>,
    pub roster: Vec<RosterEntry>,
    /// Standing instructions for the role.
    pub briefing: String,
    /// The specific question for this task.
    pub question: String,
    /// Seats the engine will accept as a target, in seat order.
    pub choices: Vec<PlayerId>,
}

impl DecisionRequest {
    /// `None` when the task's actor is not seated.
    pub fn build(state: &GameState, log: &VisibilityLog, task: DecisionTask) -> Option<Self> {
        let actor = state.player(task.actor)?;
        let role = actor.role;
        Some(Self {
            player: actor.id,
            role,
            task,
            history: log
                .for_decision_context(role)
                .into_iter()
                .cloned()
                .collect(),
            roster: roster_for(state, actor.id),
            briefing: briefing(role).to_string(),
            question: question(state, &task),
            choices: choices(state, &task),
        })
    }

    /// Flattens the request into a single prompt for text-based providers.
    pub fn render_prompt(&self) -> String {
        let mut prompt = format!(
            "You are an AI player in an online text game of Werewolf. Your player ID is {}.\nYour role is {}.\n{}\n",
            self.player, self.role, self.briefing
        );

        prompt.push_str("--- Game history (oldest first) ---\n");
        for entry in &self.history {
            prompt.push_str(&format!("[{}] {}\n", entry.category, entry.message));
        }
        prompt.push_str("---\nPlayers:\n");
        for seat in &self.roster {
            let known = match (seat.known_role, seat.teammate) {
                (Some(role), true) => format!("{role} (your teammate)"),
                (Some(role), false) => role.to_string(),
                (None, _) => "Unknown".to_string(),
            };
            prompt.push_str(&format!(
                "  - Player {} ({}, {}, role as known to you: {known})\n",
                seat.id,
                if seat.is_human { "Human" } else { "AI" },
                if seat.is_alive { "alive" } else { "dead" },
            ));
        }

        if self.role == Role::Werewolf {
            let mates: Vec<String> = self
                .roster
                .iter()
                .filter(|s| s.teammate && s.is_alive)
                .map(|s| format!("Player {}", s.id))
                .collect();
            if mates.is_empty() {
                prompt.push_str("You are the only werewolf left.\n");
            } else {
                prompt.push_str(&format!(
                    "Your werewolf teammates are: {}.\n",
                    mates.join(", ")
                ));
            }
        }

        prompt.push_str("--- Your task ---\n");
        prompt.push_str(&self.question);
        prompt.push('\n');
        prompt.push_str(answer_format(self.task.kind));
        prompt
    }
}

fn briefing(role: Role) -> &'static str {
    match role {
        Role::Werewolf => {
            "Your goal is to eliminate every player outside the werewolf team. At night you choose a victim together with your teammates. During the day, hide your identity, mislead the villagers and avoid being voted out."
        }
        Role::Seer => {
            "Your goal is to find every werewolf. Each night you may check one player's identity. During the day, use what you learned to guide the vote, without exposing yourself too early."
        }
        Role::Witch => {
            "You own one antidote and one poison, each usable once per game. The antidote saves the werewolves' victim of the night; the poison kills a player of your choice. Use them carefully."
        }
        Role::Guard => {
            "Your goal is to protect the villagers. Each night you may shield one player from the werewolves, but never the same player two nights in a row."
        }
        Role::Hunter => {
            "When you die, whether killed at night or voted out, you may shoot one living player and take them with you. Aim at whoever you believe is a werewolf."
        }
        Role::Villager => {
            "You have no special ability. Help find and vote out every werewolf by analysing what the other players say and how they vote."
        }
    }
}

fn question(state: &GameState, task: &DecisionTask) -> String {
    let actor = task.actor;
    match task.kind {
        TaskKind::WerewolfTarget => "It is night and your turn to act. Choose a player for the werewolves to attack. Villager-side players are the usual targets.".to_string(),
        TaskKind::GuardProtect => {
            let last = state
                .guard_last_protected
                .map(|id| format!("Player {id}"))
                .unwrap_or_else(|| "no one".to_string());
            format!(
                "It is night and your turn to act. Choose a player to protect from the werewolves. You cannot protect the same player two nights in a row. Last night you protected {last}."
            )
        }
        TaskKind::SeerCheck => {
            "It is night and your turn to act. Choose a player whose identity you want to check.".to_string()
        }
        TaskKind::WitchSave => {
            let victim = task
                .subject
                .map(|id| format!("Player {id}"))
                .unwrap_or_else(|| "nobody".to_string());
            format!(
                "The werewolves attacked {victim} tonight. Your antidote is unused. Do you want to use it to save {victim}?"
            )
        }
        TaskKind::WitchPoison => {
            "Your poison is unused. Do you want to poison a player tonight?".to_string()
        }
        TaskKind::HunterShoot => format!(
            "You (Player {actor}) have just died. You may shoot one living player and take them with you, or choose not to shoot."
        ),
        TaskKind::DiscussionStatement => format!(
            "Discussion: it is your turn (Player {actor}) to speak. Based on what you know, take a stance that serves your side. Keep it to one or two sentences."
        ),
        TaskKind::VotePlayer => format!(
            "Voting: it is your turn (Player {actor}) to vote. Vote for the player you believe is most likely a werewolf or most harmful to your side."
        ),
    }
}

fn answer_format(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::WerewolfTarget
        | TaskKind::GuardProtect
        | TaskKind::SeerCheck
        | TaskKind::VotePlayer => "Reply only with the target player's ID number.",
        TaskKind::WitchSave => "Reply only 'yes' or 'no'.",
        TaskKind::WitchPoison | TaskKind::HunterShoot => {
            "Reply with the target player's ID number, or 'no' to pass."
        }
        TaskKind::DiscussionStatement => "Reply directly with what you say.",
    }
}

fn choices(state: &GameState, task: &DecisionTask) -> Vec<PlayerId> {
    match task.kind {
        TaskKind::WerewolfTarget => state.alive_ids(),
        TaskKind::GuardProtect => state
            .alive_ids()
            .into_iter()
            .filter(|id| Some(*id) != state.guard_last_protected)
            .collect(),
        TaskKind::WitchSave => task.subject.into_iter().collect(),
        TaskKind::DiscussionStatement => Vec::new(),
        TaskKind::SeerCheck
        | TaskKind::WitchPoison
        | TaskKind::HunterShoot
        | TaskKind::VotePlayer => state.valid_targets_for(task.actor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Game, GameConfig, GameSetup, SeerCheck};

    fn table() -> Game {
        let setup = GameSetup::with_seed(11).human_seat(PlayerId(0));
        let mut game = Game::new(&GameConfig::default(), &setup).unwrap();
        let roles = [
            Role::Villager,
            Role::Werewolf,
            Role::Werewolf,
            Role::Seer,
            Role::Witch,
            Role::Villager,
            Role::Guard,
            Role::Hunter,
        ];
        for (player, role) in game.state.players.iter_mut().zip(roles) {
            player.role = role;
        }
        game.engine().start().unwrap();
        game
    }

    fn task(actor: u8, kind: TaskKind) -> DecisionTask {
        DecisionTask {
            actor: PlayerId(actor),
            kind,
            round: 1,
            subject: None,
        }
    }

    #[test]
    fn werewolf_sees_teammate_and_pack_history() {
        let game = table();
        let request =
            DecisionRequest::build(&game.state, &game.log, task(1, TaskKind::WerewolfTarget))
                .unwrap();

        assert_eq!(request.role, Role::Werewolf);
        let mate = &request.roster[2];
        assert!(mate.teammate);
        assert_eq!(mate.known_role, Some(Role::Werewolf));
        assert_eq!(request.roster[3].known_role, None);
        assert!(
            request
                .history
                .iter()
                .any(|e| e.message == "The werewolf team is: Player 1, Player 2.")
        );

        let prompt = request.render_prompt();
        assert!(prompt.contains("Your werewolf teammates are: Player 2."));
        assert!(prompt.contains("Player 2 (AI, alive, role as known to you: Werewolf (your teammate))"));
        assert!(prompt.ends_with("Reply only with the target player's ID number."));
    }

    #[test]
    fn seer_knows_only_the_latest_check() {
        let mut game = table();
        game.state.seer_last_check = Some(SeerCheck {
            target: PlayerId(2),
            role: Role::Werewolf,
        });
        let request =
            DecisionRequest::build(&game.state, &game.log, task(3, TaskKind::VotePlayer)).unwrap();

        assert_eq!(request.roster[2].known_role, Some(Role::Werewolf));
        assert_eq!(request.roster[1].known_role, None);
        assert!(!request.roster[2].teammate);
        assert!(!request.choices.contains(&PlayerId(3)));
        assert!(
            !request
                .history
                .iter()
                .any(|e| e.message.starts_with("The werewolf team"))
        );
    }

    #[test]
    fn guard_choices_skip_last_protected() {
        let mut game = table();
        game.state.guard_last_protected = Some(PlayerId(5));
        let request =
            DecisionRequest::build(&game.state, &game.log, task(6, TaskKind::GuardProtect))
                .unwrap();
        assert!(!request.choices.contains(&PlayerId(5)));
        assert!(request.choices.contains(&PlayerId(6)));
        assert!(request.question.contains("Last night you protected Player 5."));
    }

    #[test]
    fn unknown_actor_builds_nothing() {
        let game = table();
        assert!(
            DecisionRequest::build(&game.state, &game.log, task(40, TaskKind::VotePlayer))
                .is_none()
        );
    }
}
