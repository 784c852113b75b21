use crate::state::{GamePhase, PlayerId};

/// Night or revenge action aimed at a single seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TargetAction {
    Attack,
    Protect,
    Check,
    Poison,
    Shoot,
}

impl TargetAction {
    pub const fn phase(self) -> GamePhase {
        match self {
            TargetAction::Attack => GamePhase::WerewolvesAct,
            TargetAction::Protect => GamePhase::GuardActs,
            TargetAction::Check => GamePhase::SeerActs,
            TargetAction::Poison => GamePhase::WitchActsPoison,
            TargetAction::Shoot => GamePhase::HunterMayAct,
        }
    }
}

/// Discrete input from the human seat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerIntent {
    /// Close the role reveal and let the first night begin.
    AcknowledgeRole,
    SelectTarget {
        action: TargetAction,
        target: PlayerId,
    },
    /// Spend the antidote on tonight's victim.
    UseAntidote,
    /// Decline the current optional action: antidote, poison, hunter shot,
    /// speaking, or voting.
    Pass,
    SubmitSpeech(String),
    CastVote(PlayerId),
}

/// What the game is waiting for from the human.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HumanPrompt {
    pub phase: GamePhase,
    pub message: String,
    /// Seats that would be accepted as a target, if the prompt takes one.
    pub choices: Vec<PlayerId>,
}
