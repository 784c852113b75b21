use super::{PlayerId, Role};

/// Remaining witch potions. Each flag only ever goes from `true` to `false`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WitchPotions {
    pub antidote: bool,
    pub poison: bool,
}

impl Default for WitchPotions {
    fn default() -> Self {
        Self {
            antidote: true,
            poison: true,
        }
    }
}

/// Most recent seer result. Older checks only survive in the log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeerCheck {
    pub target: PlayerId,
    pub role: Role,
}

/// Why a player died.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DeathCause {
    Werewolf,
    Poison,
    Vote,
    HunterShot,
}

/// Public facts about one completed day, used for round summaries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundRecord {
    pub round: u32,
    pub night_deaths: Vec<PlayerId>,
    pub eliminated: Option<PlayerId>,
    pub hunter_shot: Option<PlayerId>,
}
