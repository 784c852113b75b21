use core::fmt;

use super::Role;

/// Seat number of a player, stable for the whole game (0..N-1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for PlayerId {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

/// A seat at the table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub role: Role,
    pub is_human: bool,
    pub is_alive: bool,

    /// Set by the guard during the current night, cleared at night start.
    pub is_protected: bool,

    /// Set by the witch's antidote during the current night, cleared at night start.
    pub is_healed_by_witch: bool,

    /// Public knowledge of the role, only present once the player is dead.
    pub revealed_role: Option<Role>,
}

impl Player {
    pub fn new(id: PlayerId, role: Role, is_human: bool) -> Self {
        let name = if is_human {
            format!("Player {id} (You)")
        } else {
            format!("Player {id}")
        };
        Self {
            id,
            name,
            role,
            is_human,
            is_alive: true,
            is_protected: false,
            is_healed_by_witch: false,
            revealed_role: None,
        }
    }

    pub fn is_werewolf(&self) -> bool {
        self.role.is_werewolf()
    }

    pub fn is_ai(&self) -> bool {
        !self.is_human
    }

    /// Marks the player dead and makes the role public.
    pub fn kill(&mut self) {
        self.is_alive = false;
        self.revealed_role = Some(self.role);
    }

    pub(crate) fn clear_night_flags(&mut self) {
        self.is_protected = false;
        self.is_healed_by_witch = false;
    }
}
