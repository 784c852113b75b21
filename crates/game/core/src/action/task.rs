use crate::state::{GamePhase, PlayerId, Role};

/// What an AI player is being asked to decide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskKind {
    WerewolfTarget,
    GuardProtect,
    SeerCheck,
    WitchSave,
    WitchPoison,
    HunterShoot,
    DiscussionStatement,
    VotePlayer,
}

/// Shape of a valid answer to a task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerShape {
    /// A seat number.
    Target,
    /// "yes", "no", or a seat number.
    YesNoOrTarget,
    /// Anything; empty means the player stays silent.
    FreeText,
}

impl TaskKind {
    pub const fn answer_shape(self) -> AnswerShape {
        match self {
            TaskKind::WerewolfTarget
            | TaskKind::GuardProtect
            | TaskKind::SeerCheck
            | TaskKind::VotePlayer => AnswerShape::Target,
            TaskKind::WitchSave | TaskKind::WitchPoison | TaskKind::HunterShoot => {
                AnswerShape::YesNoOrTarget
            }
            TaskKind::DiscussionStatement => AnswerShape::FreeText,
        }
    }

    /// Phase in which this task is posed.
    pub const fn phase(self) -> GamePhase {
        match self {
            TaskKind::WerewolfTarget => GamePhase::WerewolvesAct,
            TaskKind::GuardProtect => GamePhase::GuardActs,
            TaskKind::SeerCheck => GamePhase::SeerActs,
            TaskKind::WitchSave => GamePhase::WitchActsSave,
            TaskKind::WitchPoison => GamePhase::WitchActsPoison,
            TaskKind::HunterShoot => GamePhase::HunterMayAct,
            TaskKind::DiscussionStatement => GamePhase::Discussion,
            TaskKind::VotePlayer => GamePhase::Voting,
        }
    }

    /// Role required to receive the task, if any.
    pub const fn role(self) -> Option<Role> {
        self.phase().acting_role()
    }
}

/// One decision requested from one AI seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionTask {
    pub actor: PlayerId,
    pub kind: TaskKind,
    pub round: u32,
    /// Extra context the question needs, e.g. the witch's victim.
    pub subject: Option<PlayerId>,
}

/// Normalised answer from a decision provider.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParsedAction {
    TargetId(PlayerId),
    YesNo(bool),
    FreeText(String),
    Abstain,
}
