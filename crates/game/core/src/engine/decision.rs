use crate::action::{DecisionTask, ParsedAction, TaskKind};
use crate::env::{PcgRng, RngOracle, compute_seed};
use crate::log::{LogDraft, LogKind};
use crate::state::PlayerId;

use super::{EngineError, GameEngine, Step};

const VOTE_FALLBACK_CONTEXT: u32 = 0x564f;

impl<'a> GameEngine<'a> {
    /// Commits an AI seat's answer to `task`.
    ///
    /// `answer` is `None` when the provider failed or its reply could not be
    /// normalised. Unusable night answers leave that role without effect for
    /// the night; an unusable vote is replaced by a seeded random target.
    /// Fails with [`EngineError::StaleDecision`] if the game has moved past
    /// `task`.
    pub fn apply_decision(
        &mut self,
        task: &DecisionTask,
        answer: Option<ParsedAction>,
    ) -> Result<(), EngineError> {
        match self.plan() {
            Step::Decide(current) if current == *task => {}
            _ => {
                return Err(EngineError::StaleDecision {
                    task: *task,
                    context: self.context().with_actor(task.actor),
                });
            }
        }

        let actor = task.actor;
        match task.kind {
            TaskKind::WerewolfTarget => {
                let target = self.usable_target(task, &answer, |_, _| true);
                self.commit_attack(target);
            }
            TaskKind::GuardProtect => {
                let last = self.state.guard_last_protected;
                let target = self.usable_target(task, &answer, |_, t| Some(t) != last);
                self.commit_protect(actor, target);
            }
            TaskKind::SeerCheck => {
                let target = self.usable_target(task, &answer, |a, t| a != t);
                self.commit_check(actor, target);
            }
            TaskKind::WitchSave => {
                let victim = self.save_victim();
                let use_antidote = match &answer {
                    Some(ParsedAction::YesNo(yes)) => *yes,
                    Some(ParsedAction::TargetId(id)) if Some(*id) == victim => true,
                    Some(ParsedAction::Abstain) => false,
                    other => {
                        self.decision_failed(task, other);
                        false
                    }
                };
                self.commit_save(actor, use_antidote);
            }
            TaskKind::WitchPoison => {
                let target = self.optional_target(task, &answer);
                self.commit_poison(actor, target);
            }
            TaskKind::HunterShoot => {
                let target = self.optional_target(task, &answer);
                self.commit_shot(actor, target)?;
            }
            TaskKind::DiscussionStatement => {
                let text = match &answer {
                    Some(ParsedAction::FreeText(text)) => text.clone(),
                    Some(ParsedAction::Abstain) => String::new(),
                    other => {
                        self.decision_failed(task, other);
                        String::new()
                    }
                };
                self.commit_statement(actor, &text, LogKind::Ai);
            }
            TaskKind::VotePlayer => {
                let target = match &answer {
                    Some(ParsedAction::Abstain) => None,
                    _ => match self.usable_target(task, &answer, |a, t| a != t) {
                        Some(target) => Some(target),
                        None => self.fallback_vote(actor),
                    },
                };
                self.commit_vote(actor, target, LogKind::Ai);
            }
        }
        Ok(())
    }

    /// Living target accepted by `allowed(actor, target)`, or `None` after
    /// logging the failure.
    fn usable_target(
        &mut self,
        task: &DecisionTask,
        answer: &Option<ParsedAction>,
        allowed: impl Fn(PlayerId, PlayerId) -> bool,
    ) -> Option<PlayerId> {
        match answer {
            Some(ParsedAction::TargetId(target))
                if self.state.is_alive(*target) && allowed(task.actor, *target) =>
            {
                Some(*target)
            }
            other => {
                self.decision_failed(task, other);
                None
            }
        }
    }

    /// For tasks that may be declined with "no": a living target other than
    /// the actor, or `None` for a decline or an unusable answer.
    fn optional_target(
        &mut self,
        task: &DecisionTask,
        answer: &Option<ParsedAction>,
    ) -> Option<PlayerId> {
        match answer {
            Some(ParsedAction::YesNo(false)) | Some(ParsedAction::Abstain) => None,
            _ => self.usable_target(task, answer, |a, t| a != t),
        }
    }

    fn decision_failed(&mut self, task: &DecisionTask, answer: &Option<ParsedAction>) {
        self.log.append(
            LogDraft::system(format!(
                "Player {} gave no usable {} decision ({answer:?})",
                task.actor, task.kind
            ))
            .kind(LogKind::Error),
        );
    }

    /// Uniform seeded pick among living players other than the voter.
    fn fallback_vote(&mut self, voter: PlayerId) -> Option<PlayerId> {
        let choices = self.state.valid_targets_for(voter);
        let seed = compute_seed(
            self.state.game_seed,
            self.state.nonce,
            voter.0 as u32,
            VOTE_FALLBACK_CONTEXT,
        );
        self.state.nonce += 1;
        let pick = PcgRng
            .pick_index(seed, choices.len())
            .map(|index| choices[index]);
        self.log.append(LogDraft::system(format!(
            "Player {voter} vote replaced by fallback {pick:?}"
        )));
        pick
    }
}
