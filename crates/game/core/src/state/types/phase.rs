use super::Role;

/// One discrete stage of the day/night cycle.
///
/// Nominal order:
/// `Setup → ShowRoleModal → NightStart → WerewolvesAct → GuardActs → SeerActs →
/// WitchActsSave → WitchActsPoison → NightResolution → DayStart →
/// [HunterMayAct] → Discussion → Voting → VoteResults → {NightStart | HunterMayAct}`
/// and eventually `GameOver`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    #[default]
    Setup,
    ShowRoleModal,
    NightStart,
    WerewolvesAct,
    GuardActs,
    SeerActs,
    WitchActsSave,
    WitchActsPoison,
    NightResolution,
    DayStart,
    HunterMayAct,
    Discussion,
    Voting,
    VoteResults,
    GameOver,
}

impl GamePhase {
    pub const fn is_night(self) -> bool {
        matches!(
            self,
            GamePhase::NightStart
                | GamePhase::WerewolvesAct
                | GamePhase::GuardActs
                | GamePhase::SeerActs
                | GamePhase::WitchActsSave
                | GamePhase::WitchActsPoison
                | GamePhase::NightResolution
        )
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver)
    }

    /// Role whose holder acts in this phase, for the single-role night phases.
    pub const fn acting_role(self) -> Option<Role> {
        match self {
            GamePhase::WerewolvesAct => Some(Role::Werewolf),
            GamePhase::GuardActs => Some(Role::Guard),
            GamePhase::SeerActs => Some(Role::Seer),
            GamePhase::WitchActsSave | GamePhase::WitchActsPoison => Some(Role::Witch),
            GamePhase::HunterMayAct => Some(Role::Hunter),
            _ => None,
        }
    }
}

/// Where the game resumes once a pending hunter shot is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HunterResume {
    /// The hunter died at night; the day continues with discussion.
    Discussion,
    /// The hunter was voted out; the next night starts.
    NightStart,
}

impl HunterResume {
    pub const fn phase(self) -> GamePhase {
        match self {
            HunterResume::Discussion => GamePhase::Discussion,
            HunterResume::NightStart => GamePhase::NightStart,
        }
    }
}
