//! Authoritative game state representation.
//!
//! This module owns the roster, the phase, and the per-night and per-day
//! bookkeeping. Runtime layers clone or query this state but mutate it
//! exclusively through the engine.
pub mod types;

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::config::{GameConfig, GameSetup};
use crate::env::{PcgRng, RngOracle, compute_seed};
pub use types::{
    DeathCause, GamePhase, HunterResume, Player, PlayerId, Role, RoleSet, RoundRecord, SeerCheck,
    Winner, WitchPotions,
};

const SEAT_CONTEXT: u32 = 0x5345;

/// Errors raised while dealing a new game.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InitializationError {
    #[error("a game needs between 2 and {max} players, got {count}")]
    PlayerCount { count: usize, max: usize },

    #[error("the role distribution contains no werewolf")]
    NoWerewolf,

    #[error("requested role {0} is not part of the role distribution")]
    RoleUnavailable(Role),

    #[error("requested seat {seat} is outside the table of {count} players")]
    SeatOutOfRange { seat: PlayerId, count: usize },
}

/// A dead hunter who still owes a revenge shot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingHunter {
    pub hunter: PlayerId,
    pub resume: HunterResume,
}

/// Canonical snapshot of one game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Set once when the game is dealt. Combined with `nonce` for every draw.
    pub game_seed: u64,

    /// Incremented whenever the engine draws a random fallback.
    pub nonce: u64,

    /// Night counter, starting at 1 on the first night.
    pub round: u32,

    pub phase: GamePhase,
    pub players: Vec<Player>,
    pub human: PlayerId,

    pub werewolf_target: Option<PlayerId>,
    pub poison_target: Option<PlayerId>,
    pub hunter_target: Option<PlayerId>,
    pub witch_potions: WitchPotions,
    pub guard_last_protected: Option<PlayerId>,
    pub seer_last_check: Option<SeerCheck>,

    pub current_speaker: Option<PlayerId>,
    /// Living players at the moment discussion opened, in seat order.
    pub speaking_order: Vec<PlayerId>,
    pub(crate) speaker_cursor: usize,

    /// Voter → target, `None` meaning an explicit abstain.
    pub current_votes: BTreeMap<PlayerId, Option<PlayerId>>,

    /// Deaths of the most recent night, cleared once announced.
    pub pending_deaths: ArrayVec<PlayerId, { GameConfig::MAX_NIGHT_DEATHS }>,
    pub pending_hunter: Option<PendingHunter>,

    pub winner: Option<Winner>,
    pub rounds: Vec<RoundRecord>,

    /// Phase for which the human was already prompted.
    pub(crate) prompted: Option<GamePhase>,
}

impl GameState {
    /// Deals roles and seats for a fresh game in the `Setup` phase.
    pub fn deal(config: &GameConfig, setup: &GameSetup) -> Result<Self, InitializationError> {
        let count = config.player_count();
        if !(2..=GameConfig::MAX_PLAYERS).contains(&count) {
            return Err(InitializationError::PlayerCount {
                count,
                max: GameConfig::MAX_PLAYERS,
            });
        }
        if !config.roles.iter().any(|role| role.is_werewolf()) {
            return Err(InitializationError::NoWerewolf);
        }

        let rng = PcgRng;
        let human_seat = match setup.human_seat {
            Some(seat) if seat.index() >= count => {
                return Err(InitializationError::SeatOutOfRange { seat, count });
            }
            Some(seat) => seat.index(),
            None => rng
                .pick_index(compute_seed(setup.seed, 0, 0, SEAT_CONTEXT), count)
                .unwrap_or(0),
        };

        let mut roles = config.roles.clone();
        match setup.human_role {
            Some(role) => {
                let position = roles
                    .iter()
                    .position(|r| *r == role)
                    .ok_or(InitializationError::RoleUnavailable(role))?;
                roles.remove(position);
                rng.shuffle(setup.seed, &mut roles);
                roles.insert(human_seat, role);
            }
            None => rng.shuffle(setup.seed, &mut roles),
        }

        let players = roles
            .into_iter()
            .enumerate()
            .map(|(seat, role)| Player::new(PlayerId(seat as u8), role, seat == human_seat))
            .collect();

        Ok(Self {
            game_seed: setup.seed,
            nonce: 0,
            round: 0,
            phase: GamePhase::Setup,
            players,
            human: PlayerId(human_seat as u8),
            werewolf_target: None,
            poison_target: None,
            hunter_target: None,
            witch_potions: WitchPotions::default(),
            guard_last_protected: None,
            seer_last_check: None,
            current_speaker: None,
            speaking_order: Vec::new(),
            speaker_cursor: 0,
            current_votes: BTreeMap::new(),
            pending_deaths: ArrayVec::new(),
            pending_hunter: None,
            winner: None,
            rounds: Vec::new(),
            prompted: None,
        })
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.index())
    }

    pub fn human_player(&self) -> Option<&Player> {
        self.player(self.human)
    }

    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.player(id).is_some_and(|p| p.is_alive)
    }

    pub fn alive(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive)
    }

    pub fn alive_ids(&self) -> Vec<PlayerId> {
        self.alive().map(|p| p.id).collect()
    }

    /// Living holders of `role` in seat order.
    pub fn alive_with_role(&self, role: Role) -> impl Iterator<Item = &Player> {
        self.alive().filter(move |p| p.role == role)
    }

    /// Seats of all werewolves, dead or alive.
    pub fn werewolf_team(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.is_werewolf())
            .map(|p| p.id)
            .collect()
    }

    /// Living players the given voter may still pick, excluding themselves.
    pub fn valid_targets_for(&self, actor: PlayerId) -> Vec<PlayerId> {
        self.alive()
            .filter(|p| p.id != actor)
            .map(|p| p.id)
            .collect()
    }

    /// Role the viewer is entitled to know for `subject`.
    ///
    /// Covers the viewer's own seat, werewolf teammates, the seer's latest
    /// check and any role revealed by death.
    pub fn known_role(&self, viewer: PlayerId, subject: PlayerId) -> Option<Role> {
        let viewer_player = self.player(viewer)?;
        let subject_player = self.player(subject)?;
        if viewer == subject {
            return Some(viewer_player.role);
        }
        if let Some(role) = subject_player.revealed_role {
            return Some(role);
        }
        if viewer_player.is_werewolf() && subject_player.is_werewolf() {
            return Some(Role::Werewolf);
        }
        if viewer_player.role == Role::Seer {
            if let Some(check) = self.seer_last_check {
                if check.target == subject {
                    return Some(check.role);
                }
            }
        }
        None
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub(crate) fn current_round_mut(&mut self) -> &mut RoundRecord {
        let round = self.round;
        if self.rounds.last().is_none_or(|r| r.round != round) {
            self.rounds.push(RoundRecord {
                round,
                ..RoundRecord::default()
            });
        }
        let last = self.rounds.len() - 1;
        &mut self.rounds[last]
    }
}
