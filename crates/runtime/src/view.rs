//! Read model of the table for the human's screen.
use serde::Serialize;

use game_core::{GamePhase, GameState, HumanPrompt, PlayerId, Role, Winner, WitchPotions};

use crate::orchestrator::{RosterEntry, roster_for};

/// Everything the human may see about the table right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub generation: u64,
    pub phase: GamePhase,
    pub round: u32,
    pub human: PlayerId,
    pub human_role: Option<Role>,
    pub roster: Vec<RosterEntry>,
    pub current_speaker: Option<PlayerId>,
    /// Only filled in when the human is the witch.
    pub potions: Option<WitchPotions>,
    pub prompt: Option<HumanPrompt>,
    pub winner: Option<Winner>,
    pub stalled: Option<String>,
}

impl TableView {
    pub fn build(
        state: &GameState,
        generation: u64,
        prompt: Option<HumanPrompt>,
        stalled: Option<String>,
    ) -> Self {
        let human_role = state.human_player().map(|p| p.role);
        Self {
            generation,
            phase: state.phase,
            round: state.round,
            human: state.human,
            human_role,
            roster: roster_for(state, state.human),
            current_speaker: state.current_speaker,
            potions: (human_role == Some(Role::Witch)).then_some(state.witch_potions),
            prompt,
            winner: state.winner,
            stalled,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{GameConfig, GameSetup};

    fn dealt(role: Role) -> GameState {
        let setup = GameSetup::with_seed(11)
            .human_seat(PlayerId(0))
            .human_role(role);
        GameState::deal(&GameConfig::default(), &setup).expect("deal")
    }

    #[test]
    fn hides_other_roles_from_a_villager() {
        let state = dealt(Role::Villager);
        let view = TableView::build(&state, 1, None, None);

        assert_eq!(view.human_role, Some(Role::Villager));
        assert_eq!(view.roster.len(), state.players.len());
        for entry in view.roster.iter().filter(|e| e.id != state.human) {
            assert_eq!(entry.known_role, None, "seat {} leaked", entry.id);
        }
        assert_eq!(view.potions, None);
    }

    #[test]
    fn witch_sees_her_potions() {
        let view = TableView::build(&dealt(Role::Witch), 3, None, None);
        assert_eq!(view.potions, Some(WitchPotions::default()));
        assert_eq!(view.generation, 3);
    }

    #[test]
    fn werewolf_sees_teammates() {
        let state = dealt(Role::Werewolf);
        let view = TableView::build(&state, 1, None, None);
        let mates: Vec<_> = view.roster.iter().filter(|e| e.teammate).collect();

        assert_eq!(mates.len(), state.werewolf_team().len() - 1);
        assert!(mates.iter().all(|e| e.known_role == Some(Role::Werewolf)));
    }
}
