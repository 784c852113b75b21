use crate::log::{LogCategory, LogDraft, LogKind};
use crate::rules::{self, VoteOutcome};
use crate::state::{GamePhase, HunterResume, PendingHunter, PlayerId, Role};

use super::{EngineError, GameEngine};

/// Day phase bodies: morning reveal, the hunter's shot, discussion and the
/// vote.
impl<'a> GameEngine<'a> {
    pub(super) fn start_day(&mut self) {
        let round = self.state.round;
        self.announce(format!("Day {round} begins. Everyone, open your eyes."));

        let deaths: Vec<PlayerId> = self.state.pending_deaths.drain(..).collect();
        let mut hunter = None;
        for id in deaths {
            if let Some(role) = self.state.player(id).map(|p| p.role) {
                self.log.role_revealed(id, role);
                if role == Role::Hunter {
                    hunter = Some(id);
                }
            }
        }

        match hunter {
            Some(hunter) => self.await_hunter(hunter, HunterResume::Discussion),
            None => self.enter(GamePhase::Discussion),
        }
    }

    fn await_hunter(&mut self, hunter: PlayerId, resume: HunterResume) {
        self.state.pending_hunter = Some(PendingHunter { hunter, resume });
        self.state.hunter_target = None;
        self.announce(format!(
            "Player {hunter} was the Hunter and may take one more player down."
        ));
        self.enter(GamePhase::HunterMayAct);
    }

    pub(super) fn commit_shot(
        &mut self,
        hunter: PlayerId,
        target: Option<PlayerId>,
    ) -> Result<(), EngineError> {
        if let Some(target) = target {
            let revealed = self.state.player_mut(target).map(|p| {
                p.kill();
                p.role
            });
            self.state.hunter_target = Some(target);
            self.state.current_round_mut().hunter_shot = Some(target);
            self.log.append(
                LogDraft::public(format!("The Hunter, Player {hunter}, shot Player {target}."))
                    .category(LogCategory::Deaths),
            );
            if let Some(role) = revealed {
                self.log.role_revealed(target, role);
            }
        } else {
            self.announce(format!("The Hunter, Player {hunter}, did not shoot."));
        }
        self.finish_hunter()
    }

    /// Closes `HunterMayAct` and resumes where the hunter's death interrupted.
    pub(super) fn finish_hunter(&mut self) -> Result<(), EngineError> {
        let Some(pending) = self.state.pending_hunter.take() else {
            return Err(EngineError::MissingHunter {
                context: self.context(),
            });
        };
        if self.check_win() {
            return Ok(());
        }
        match pending.resume {
            HunterResume::Discussion => self.enter(GamePhase::Discussion),
            HunterResume::NightStart => self.end_day(),
        }
        Ok(())
    }

    pub(super) fn open_discussion(&mut self) {
        let state = &mut *self.state;
        state.speaking_order = state.alive_ids();
        state.speaker_cursor = 0;
        state.current_speaker = state.speaking_order.first().copied();
        let order: Vec<String> = state
            .speaking_order
            .iter()
            .map(|id| format!("Player {id}"))
            .collect();
        if let Some(first) = state.current_speaker {
            self.announce(format!("Discussion begins. Player {first} speaks first."));
            // AI seats get the full order as context; the human is prompted in turn.
            self.log.append(
                LogDraft::ai_only(format!("Speaking order today: {}.", order.join(", ")))
                    .category(LogCategory::Discussion),
            );
        }
    }

    /// Records the current speaker's statement and hands the floor on.
    /// An empty statement counts as skipping.
    pub(super) fn commit_statement(&mut self, speaker: PlayerId, text: &str, kind: LogKind) {
        let text = text.trim();
        let message = if text.is_empty() {
            format!("Player {speaker} skips speaking.")
        } else {
            format!("Player {speaker} says: {text}")
        };
        self.log.append(
            LogDraft::public(message)
                .kind(kind)
                .category(LogCategory::Discussion),
        );

        let state = &mut *self.state;
        state.speaker_cursor += 1;
        state.current_speaker = state.speaking_order.get(state.speaker_cursor).copied();
    }

    pub(super) fn open_voting(&mut self) {
        self.state.current_votes.clear();
        self.state.current_speaker = None;
        self.announce("Discussion is over. Time to vote.");
    }

    pub(super) fn commit_vote(&mut self, voter: PlayerId, target: Option<PlayerId>, kind: LogKind) {
        self.state.current_votes.insert(voter, target);
        self.log.vote_cast(voter, target, kind);
    }

    pub(super) fn resolve_votes(&mut self) {
        let state = &mut *self.state;
        let counts = rules::tally(&state.current_votes, &state.players);
        let outcome = rules::resolve_votes(&state.current_votes, &mut state.players);
        state.current_votes.clear();
        self.log
            .append(LogDraft::system(format!("vote tally: {counts:?} -> {outcome:?}")));

        let mut eliminated = None;
        let message = match &outcome {
            VoteOutcome::Eliminated { player, votes } => {
                eliminated = Some(*player);
                format!("Player {player} received {votes} votes and is eliminated.")
            }
            VoteOutcome::Tie { players, votes } => {
                let tied: Vec<String> = players.iter().map(|p| format!("Player {p}")).collect();
                format!(
                    "The vote is tied between {} with {votes} votes each. No one is eliminated.",
                    tied.join(" and ")
                )
            }
            VoteOutcome::NoVotes => "No votes were cast. No one is eliminated.".to_string(),
        };
        self.log
            .append(LogDraft::public(message).category(LogCategory::Voting));

        self.state.current_round_mut().eliminated = eliminated;
        let eliminated_role = eliminated.and_then(|id| self.state.player(id).map(|p| (id, p.role)));
        if let Some((id, role)) = eliminated_role {
            self.log.role_revealed(id, role);
        }

        if self.check_win() {
            return;
        }
        match eliminated_role {
            Some((hunter, Role::Hunter)) => self.await_hunter(hunter, HunterResume::NightStart),
            _ => self.end_day(),
        }
    }

    /// Posts the round summary and lets the next night begin.
    fn end_day(&mut self) {
        let record = self.state.current_round_mut().clone();
        self.log.round_summary(&record);
        self.enter(GamePhase::NightStart);
    }
}
