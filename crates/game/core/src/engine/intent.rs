use crate::action::{IntentError, PlayerIntent, TargetAction};
use crate::log::LogKind;
use crate::state::{GamePhase, Player, PlayerId, Role};

use super::GameEngine;

impl<'a> GameEngine<'a> {
    /// Validates and commits input from the human seat.
    ///
    /// A rejected intent leaves the game untouched and can be retried.
    pub fn apply_intent(&mut self, intent: PlayerIntent) -> Result<(), IntentError> {
        if self.state.is_over() {
            return Err(IntentError::GameOver);
        }
        let phase = self.state.phase;
        let human = self.state.human;

        match intent {
            PlayerIntent::AcknowledgeRole => {
                self.expect_phase(GamePhase::ShowRoleModal)?;
                self.enter(GamePhase::NightStart);
            }

            PlayerIntent::SelectTarget { action, target } => {
                self.expect_phase(action.phase())?;
                match action {
                    TargetAction::Attack => {
                        self.human_role_holder(Role::Werewolf)?;
                        self.living_target(target)?;
                        self.commit_attack(Some(target));
                    }
                    TargetAction::Protect => {
                        self.human_role_holder(Role::Guard)?;
                        self.living_target(target)?;
                        if self.state.guard_last_protected == Some(target) {
                            return Err(IntentError::RepeatProtect(target));
                        }
                        self.commit_protect(human, Some(target));
                    }
                    TargetAction::Check => {
                        self.human_role_holder(Role::Seer)?;
                        self.other_living_target(target)?;
                        self.commit_check(human, Some(target));
                    }
                    TargetAction::Poison => {
                        self.human_role_holder(Role::Witch)?;
                        if !self.state.witch_potions.poison {
                            return Err(IntentError::PotionUsed("poison"));
                        }
                        self.other_living_target(target)?;
                        self.commit_poison(human, Some(target));
                    }
                    TargetAction::Shoot => {
                        self.human_hunter()?;
                        self.other_living_target(target)?;
                        self.commit_shot(human, Some(target))
                            .map_err(|_| IntentError::NotYourTurn)?;
                    }
                }
            }

            PlayerIntent::UseAntidote => {
                self.expect_phase(GamePhase::WitchActsSave)?;
                self.human_role_holder(Role::Witch)?;
                if !self.state.witch_potions.antidote {
                    return Err(IntentError::PotionUsed("antidote"));
                }
                if self.save_victim().is_none() {
                    return Err(IntentError::NoVictim);
                }
                self.commit_save(human, true);
            }

            PlayerIntent::Pass => match phase {
                GamePhase::WitchActsSave => {
                    self.human_role_holder(Role::Witch)?;
                    self.commit_save(human, false);
                }
                GamePhase::WitchActsPoison => {
                    self.human_role_holder(Role::Witch)?;
                    self.commit_poison(human, None);
                }
                GamePhase::HunterMayAct => {
                    self.human_hunter()?;
                    self.commit_shot(human, None)
                        .map_err(|_| IntentError::NotYourTurn)?;
                }
                GamePhase::Discussion => {
                    self.human_speaker()?;
                    self.commit_statement(human, "", LogKind::Human);
                }
                GamePhase::Voting => {
                    self.human_voter()?;
                    self.commit_vote(human, None, LogKind::Human);
                }
                _ => return Err(IntentError::WrongPhase { phase }),
            },

            PlayerIntent::SubmitSpeech(text) => {
                self.expect_phase(GamePhase::Discussion)?;
                self.human_speaker()?;
                self.commit_statement(human, &text, LogKind::Human);
            }

            PlayerIntent::CastVote(target) => {
                self.expect_phase(GamePhase::Voting)?;
                self.human_voter()?;
                self.other_living_target(target)?;
                self.commit_vote(human, Some(target), LogKind::Human);
            }
        }
        Ok(())
    }

    fn expect_phase(&self, expected: GamePhase) -> Result<(), IntentError> {
        let phase = self.state.phase;
        if phase == expected {
            Ok(())
        } else {
            Err(IntentError::WrongPhase { phase })
        }
    }

    fn human(&self) -> Result<&Player, IntentError> {
        self.state.human_player().ok_or(IntentError::NotYourTurn)
    }

    /// The human holds `role` and is alive.
    fn human_role_holder(&self, role: Role) -> Result<(), IntentError> {
        let human = self.human()?;
        if human.role != role {
            return Err(IntentError::NotYourTurn);
        }
        if !human.is_alive {
            return Err(IntentError::ActorDead);
        }
        Ok(())
    }

    /// The human is the dead hunter owed a shot.
    fn human_hunter(&self) -> Result<(), IntentError> {
        match self.state.pending_hunter {
            Some(pending) if pending.hunter == self.state.human => Ok(()),
            _ => Err(IntentError::NotYourTurn),
        }
    }

    fn human_speaker(&self) -> Result<(), IntentError> {
        if self.state.current_speaker == Some(self.state.human) {
            Ok(())
        } else {
            Err(IntentError::NotYourTurn)
        }
    }

    fn human_voter(&self) -> Result<(), IntentError> {
        if !self.human()?.is_alive {
            return Err(IntentError::ActorDead);
        }
        if self.next_voter() == Some(self.state.human) {
            Ok(())
        } else {
            Err(IntentError::NotYourTurn)
        }
    }

    fn living_target(&self, target: PlayerId) -> Result<(), IntentError> {
        match self.state.player(target) {
            None => Err(IntentError::UnknownTarget(target)),
            Some(p) if !p.is_alive => Err(IntentError::TargetDead(target)),
            Some(_) => Ok(()),
        }
    }

    fn other_living_target(&self, target: PlayerId) -> Result<(), IntentError> {
        if target == self.state.human {
            return Err(IntentError::SelfTarget);
        }
        self.living_target(target)
    }
}
