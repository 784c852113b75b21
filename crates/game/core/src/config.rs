use crate::state::{PlayerId, Role};

/// Table composition and rule constants.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Roles dealt at the start of the game, one per seat.
    pub roles: Vec<Role>,
}

impl GameConfig {
    // ===== compile-time constants =====
    pub const PLAYER_COUNT: usize = 8;
    /// A night kills at most the werewolf victim and the poisoned player.
    pub const MAX_NIGHT_DEATHS: usize = 2;
    pub const MAX_PLAYERS: usize = u8::MAX as usize;

    pub const DEFAULT_ROLES: [Role; Self::PLAYER_COUNT] = [
        Role::Werewolf,
        Role::Werewolf,
        Role::Seer,
        Role::Witch,
        Role::Hunter,
        Role::Guard,
        Role::Villager,
        Role::Villager,
    ];

    pub fn new() -> Self {
        Self {
            roles: Self::DEFAULT_ROLES.to_vec(),
        }
    }

    pub fn with_roles(roles: Vec<Role>) -> Self {
        Self { roles }
    }

    pub fn player_count(&self) -> usize {
        self.roles.len()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-game choices made before the first night.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSetup {
    /// Seed for role dealing, seat choice and fallback picks.
    pub seed: u64,
    /// Role requested by the human; random when `None`.
    pub human_role: Option<Role>,
    /// Seat requested by the human; random when `None`.
    pub human_seat: Option<PlayerId>,
}

impl GameSetup {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn human_role(mut self, role: Role) -> Self {
        self.human_role = Some(role);
        self
    }

    #[must_use]
    pub fn human_seat(mut self, seat: PlayerId) -> Self {
        self.human_seat = Some(seat);
        self
    }
}
