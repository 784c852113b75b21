use bitflags::bitflags;

/// Secret identity dealt to each player at game start.
///
/// Werewolves form one team; every other role plays for the village.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Role {
    /// Chooses a victim with the pack every night.
    Werewolf,
    /// Learns the exact role of one living player per night.
    Seer,
    /// Holds one antidote and one poison for the whole game.
    Witch,
    /// Takes one living player down when eliminated.
    Hunter,
    /// Shields one player per night, never the same player twice in a row.
    Guard,
    /// No night ability.
    Villager,
}

impl Role {
    pub const fn is_werewolf(self) -> bool {
        matches!(self, Role::Werewolf)
    }

    /// Roles that wake up during the night sequence.
    pub const fn has_night_action(self) -> bool {
        matches!(
            self,
            Role::Werewolf | Role::Seer | Role::Witch | Role::Guard
        )
    }

    pub const fn as_set(self) -> RoleSet {
        match self {
            Role::Werewolf => RoleSet::WEREWOLF,
            Role::Seer => RoleSet::SEER,
            Role::Witch => RoleSet::WITCH,
            Role::Hunter => RoleSet::HUNTER,
            Role::Guard => RoleSet::GUARD,
            Role::Villager => RoleSet::VILLAGER,
        }
    }
}

bitflags! {
    /// Set of roles allowed to read a private log entry.
    ///
    /// An empty set places no role restriction on the entry.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct RoleSet: u8 {
        const WEREWOLF = 1 << 0;
        const SEER     = 1 << 1;
        const WITCH    = 1 << 2;
        const HUNTER   = 1 << 3;
        const GUARD    = 1 << 4;
        const VILLAGER = 1 << 5;
    }
}

impl RoleSet {
    pub fn admits(self, role: Role) -> bool {
        self.contains(role.as_set())
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        role.as_set()
    }
}

/// Which side won the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Winner {
    Werewolves,
    Villagers,
    Draw,
}
