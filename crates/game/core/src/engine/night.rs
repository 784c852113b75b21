use crate::log::LogDraft;
use crate::rules;
use crate::state::{GamePhase, PlayerId, Role, SeerCheck};

use super::GameEngine;

/// Night phase bodies. The `commit_*` methods are shared by AI decisions and
/// human intents; callers validate the target first. `None` means the role
/// took no action tonight.
impl<'a> GameEngine<'a> {
    pub(super) fn start_night(&mut self) {
        let state = &mut *self.state;
        state.round += 1;
        for player in &mut state.players {
            player.clear_night_flags();
        }
        state.werewolf_target = None;
        state.poison_target = None;
        state.hunter_target = None;
        state.pending_deaths.clear();
        let round = state.round;
        self.announce(format!("Night {round} falls. Everyone, close your eyes."));
        self.enter(GamePhase::WerewolvesAct);
    }

    pub(super) fn commit_attack(&mut self, target: Option<PlayerId>) {
        if let Some(target) = target {
            self.state.werewolf_target = Some(target);
            self.log.werewolf_kill(target);
        }
        self.enter(GamePhase::GuardActs);
    }

    pub(super) fn commit_protect(&mut self, guard: PlayerId, target: Option<PlayerId>) {
        if let Some(target) = target {
            if let Some(player) = self.state.player_mut(target) {
                player.is_protected = true;
            }
            self.state.guard_last_protected = Some(target);
            self.log.guard_protect(guard, target);
        }
        self.enter(GamePhase::SeerActs);
    }

    pub(super) fn commit_check(&mut self, seer: PlayerId, target: Option<PlayerId>) {
        let checked = target.and_then(|t| self.state.player(t).map(|p| (t, p.role)));
        if let Some((target, role)) = checked {
            self.state.seer_last_check = Some(SeerCheck { target, role });
            self.log.seer_check(seer, target, role);
        }
        self.enter(GamePhase::WitchActsSave);
    }

    pub(super) fn enter_witch(&mut self) {
        self.announce("Witch, open your eyes.");
        let witch = self.state.alive_with_role(Role::Witch).map(|p| p.id).next();
        if let (Some(witch), Some(victim)) = (witch, self.save_victim()) {
            self.log.witch_briefing(witch, victim);
        }
    }

    pub(super) fn commit_save(&mut self, witch: PlayerId, use_antidote: bool) {
        if let Some(victim) = self.save_victim().filter(|_| use_antidote) {
            if let Some(player) = self.state.player_mut(victim) {
                player.is_healed_by_witch = true;
            }
            self.state.witch_potions.antidote = false;
            self.log.witch_save(witch, victim);
        }
        self.enter(GamePhase::WitchActsPoison);
    }

    pub(super) fn commit_poison(&mut self, witch: PlayerId, target: Option<PlayerId>) {
        if let Some(target) = target.filter(|_| self.state.witch_potions.poison) {
            self.state.poison_target = Some(target);
            self.state.witch_potions.poison = false;
            self.log.witch_poison(witch, target);
        }
        self.enter(GamePhase::NightResolution);
    }

    pub(super) fn resolve_night(&mut self) {
        let state = &mut *self.state;
        let attack = state.werewolf_target;
        let poison = state.poison_target;
        let outcome = rules::resolve_night(&mut state.players, attack, poison);

        state.pending_deaths.clear();
        for id in outcome.dead_ids() {
            // At most one attack and one poison death per night.
            let _ = state.pending_deaths.try_push(id);
        }
        let deaths: Vec<PlayerId> = state.pending_deaths.to_vec();
        state.current_round_mut().night_deaths = deaths.clone();

        let seat_of = |role: Role| {
            state
                .players
                .iter()
                .find(|p| p.role == role)
                .map(|p| p.id)
        };
        let guard = seat_of(Role::Guard);
        let witch = seat_of(Role::Witch);

        self.log.night_deaths(&deaths);
        if let Some(target) = outcome.blocked_by_guard {
            self.log.guard_blocked(guard, target);
        }
        if let Some(target) = outcome.blocked_by_witch {
            self.log.witch_blocked(witch, target);
        }
        let causes: Vec<String> = outcome
            .deaths
            .iter()
            .map(|d| format!("{}:{}", d.player, d.cause))
            .collect();
        self.log.append(LogDraft::system(format!(
            "night {} resolved: attack={attack:?} poison={poison:?} deaths=[{}] guard_block={:?} witch_block={:?}",
            self.state.round,
            causes.join(", "),
            outcome.blocked_by_guard,
            outcome.blocked_by_witch,
        )));

        if !self.check_win() {
            self.enter(GamePhase::DayStart);
        }
    }
}
