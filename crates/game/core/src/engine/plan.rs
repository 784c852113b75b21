use crate::action::{DecisionTask, HumanPrompt, TaskKind};
use crate::state::{GamePhase, Player, PlayerId, Role};

use super::{GameEngine, Step};

/// Who holds the action of a phase.
enum Actor<'p> {
    Human(&'p Player),
    Ai(&'p Player),
    Nobody,
}

impl<'a> GameEngine<'a> {
    /// Classifies the current phase without changing anything.
    pub fn plan(&self) -> Step {
        let state = &*self.state;
        let phase = state.phase;
        match phase {
            GamePhase::Setup | GamePhase::GameOver => Step::Idle,
            GamePhase::ShowRoleModal => Step::AwaitHuman(self.role_prompt()),
            GamePhase::NightStart
            | GamePhase::NightResolution
            | GamePhase::DayStart
            | GamePhase::VoteResults => Step::Transition(phase),

            GamePhase::WerewolvesAct => self.night_step(Role::Werewolf, TaskKind::WerewolfTarget),
            GamePhase::GuardActs => self.night_step(Role::Guard, TaskKind::GuardProtect),
            GamePhase::SeerActs => self.night_step(Role::Seer, TaskKind::SeerCheck),
            GamePhase::WitchActsSave => match self.save_victim() {
                Some(_) => self.night_step(Role::Witch, TaskKind::WitchSave),
                None => Step::Transition(phase),
            },
            GamePhase::WitchActsPoison => {
                if state.witch_potions.poison {
                    self.night_step(Role::Witch, TaskKind::WitchPoison)
                } else {
                    Step::Transition(phase)
                }
            }

            GamePhase::HunterMayAct => {
                let hunter = state
                    .pending_hunter
                    .and_then(|pending| state.player(pending.hunter));
                match hunter {
                    Some(p) if p.is_human => Step::AwaitHuman(self.prompt_for(
                        "You have been eliminated. Choose a player to shoot, or pass.",
                        state.valid_targets_for(p.id),
                    )),
                    Some(p) => Step::Decide(self.task(p.id, TaskKind::HunterShoot, None)),
                    None => Step::Transition(phase),
                }
            }

            GamePhase::Discussion => match state.current_speaker.and_then(|id| state.player(id)) {
                Some(p) if p.is_human => Step::AwaitHuman(
                    self.prompt_for("It is your turn to speak. Say something, or pass.", Vec::new()),
                ),
                Some(p) => Step::Decide(self.task(p.id, TaskKind::DiscussionStatement, None)),
                None => Step::Transition(phase),
            },

            GamePhase::Voting => match self.next_voter().and_then(|id| state.player(id)) {
                Some(p) if p.is_human => Step::AwaitHuman(self.prompt_for(
                    "Cast your vote to eliminate a player, or pass to abstain.",
                    state.valid_targets_for(p.id),
                )),
                Some(p) => Step::Decide(self.task(p.id, TaskKind::VotePlayer, None)),
                None => Step::Transition(phase),
            },
        }
    }

    fn night_step(&self, role: Role, kind: TaskKind) -> Step {
        match self.role_actor(role) {
            Actor::Human(player) => Step::AwaitHuman(self.night_prompt(player, kind)),
            Actor::Ai(player) => {
                let subject = match kind {
                    TaskKind::WitchSave => self.save_victim(),
                    _ => None,
                };
                Step::Decide(self.task(player.id, kind, subject))
            }
            Actor::Nobody => Step::Transition(self.state.phase),
        }
    }

    /// A living human holder acts for the role; otherwise the first living
    /// AI holder in seat order does.
    fn role_actor(&self, role: Role) -> Actor<'_> {
        let state = &*self.state;
        if let Some(human) = state.human_player().filter(|p| p.is_alive && p.role == role) {
            return Actor::Human(human);
        }
        match state.alive_with_role(role).find(|p| p.is_ai()) {
            Some(ai) => Actor::Ai(ai),
            None => Actor::Nobody,
        }
    }

    /// Tonight's victim if the witch can still save them.
    pub(crate) fn save_victim(&self) -> Option<PlayerId> {
        let state = &*self.state;
        if !state.witch_potions.antidote {
            return None;
        }
        state.werewolf_target.filter(|id| state.is_alive(*id))
    }

    /// The human votes first, then AI seats in seat order.
    pub(crate) fn next_voter(&self) -> Option<PlayerId> {
        let state = &*self.state;
        let pending = |p: &&Player| !state.current_votes.contains_key(&p.id);
        if let Some(human) = state.human_player().filter(|p| p.is_alive).filter(pending) {
            return Some(human.id);
        }
        state.alive().filter(pending).map(|p| p.id).next()
    }

    fn task(&self, actor: PlayerId, kind: TaskKind, subject: Option<PlayerId>) -> DecisionTask {
        DecisionTask {
            actor,
            kind,
            round: self.state.round,
            subject,
        }
    }

    fn prompt_for(&self, message: &str, choices: Vec<PlayerId>) -> HumanPrompt {
        HumanPrompt {
            phase: self.state.phase,
            message: message.to_string(),
            choices,
        }
    }

    fn role_prompt(&self) -> HumanPrompt {
        let state = &*self.state;
        let mut message = match state.human_player() {
            Some(human) => format!("You are Player {}. Your role is {}.", human.id, human.role),
            None => "You are watching this game.".to_string(),
        };
        if state.human_player().is_some_and(|p| p.is_werewolf()) {
            let mates: Vec<String> = state
                .werewolf_team()
                .into_iter()
                .filter(|id| *id != state.human)
                .map(|id| format!("Player {id}"))
                .collect();
            if !mates.is_empty() {
                message.push_str(&format!(" Your fellow werewolves: {}.", mates.join(", ")));
            }
        }
        message.push_str(" Acknowledge to begin the first night.");
        self.prompt_for(&message, Vec::new())
    }

    fn night_prompt(&self, player: &Player, kind: TaskKind) -> HumanPrompt {
        let state = &*self.state;
        let alive = state.alive_ids();
        match kind {
            TaskKind::WerewolfTarget => {
                self.prompt_for("Choose a player for the werewolves to attack.", alive)
            }
            TaskKind::GuardProtect => {
                let choices = alive
                    .into_iter()
                    .filter(|id| Some(*id) != state.guard_last_protected)
                    .collect();
                self.prompt_for(
                    "Choose a player to protect tonight. You cannot protect the same player two nights in a row.",
                    choices,
                )
            }
            TaskKind::SeerCheck => self.prompt_for(
                "Choose a player whose identity you want to check.",
                state.valid_targets_for(player.id),
            ),
            TaskKind::WitchSave => {
                let victim = self
                    .save_victim()
                    .map(|id| format!("Player {id}"))
                    .unwrap_or_else(|| "nobody".to_string());
                self.prompt_for(
                    &format!("{victim} was attacked tonight. Use your antidote, or pass."),
                    Vec::new(),
                )
            }
            TaskKind::WitchPoison => self.prompt_for(
                "Choose a player to poison, or pass.",
                state.valid_targets_for(player.id),
            ),
            _ => self.prompt_for("Make your choice.", alive),
        }
    }
}
