//! Event payloads. They carry metadata only: log text is read through the
//! role-filtered views, never broadcast.
use serde::{Deserialize, Serialize};

use game_core::{GamePhase, LogCategory, LogKind, PlayerId, Visibility, Winner};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseEvent {
    Changed {
        from: GamePhase,
        to: GamePhase,
        round: u32,
    },
    /// The driver stopped because the human must act.
    AwaitingHuman { phase: GamePhase },
    /// An AI seat is being asked for a decision.
    Deciding { phase: GamePhase, player: PlayerId },
    /// A step failed; nothing advances until a restart.
    Stalled { phase: GamePhase, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Game the entry belongs to; ids restart with every game.
    pub generation: u64,
    pub id: u64,
    pub kind: LogKind,
    pub category: LogCategory,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeEvent {
    Started { generation: u64, players: usize },
    Restarted { generation: u64 },
    GameOver { winner: Winner, round: u32 },
}
