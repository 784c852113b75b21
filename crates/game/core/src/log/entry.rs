use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::state::{PlayerId, Role, RoleSet};

/// Who may read an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    /// Everyone at the table.
    Public,
    /// Only viewers admitted by the entry's role and player allow-sets.
    Private,
    /// Diagnostics. Never shown to any player.
    System,
    /// Shared with every AI player, hidden from the human.
    AiOnly,
    /// Shown to the human only, never fed to AI players.
    UiOnly,
}

/// Who produced an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum LogKind {
    Human,
    Ai,
    System,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case")]
pub enum LogCategory {
    GameFlow,
    Actions,
    NightActions,
    Deaths,
    Voting,
    RoleInfo,
    Discussion,
    RoundSummary,
    Error,
    Debug,
}

/// Immutable record in the game log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    /// Monotonic, starting at 1.
    pub id: u64,
    pub message: String,
    pub kind: LogKind,
    pub category: LogCategory,
    pub visibility: Visibility,
    pub visible_to_roles: RoleSet,
    pub visible_to_players: BTreeSet<PlayerId>,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    /// Whether a private entry admits this viewer.
    ///
    /// Each non-empty allow-set must admit the viewer; an entry scoped to
    /// both a role and a seat is only readable by that seat holding that role.
    pub fn admits(&self, player: PlayerId, role: Role) -> bool {
        let role_ok = self.visible_to_roles.is_empty() || self.visible_to_roles.admits(role);
        let player_ok =
            self.visible_to_players.is_empty() || self.visible_to_players.contains(&player);
        role_ok && player_ok
    }
}

/// Entry content before the log assigns its id and timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogDraft {
    pub message: String,
    pub kind: LogKind,
    pub category: LogCategory,
    pub visibility: Visibility,
    pub visible_to_roles: RoleSet,
    pub visible_to_players: BTreeSet<PlayerId>,
}

impl LogDraft {
    fn new(message: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            message: message.into(),
            kind: LogKind::System,
            category: LogCategory::GameFlow,
            visibility,
            visible_to_roles: RoleSet::empty(),
            visible_to_players: BTreeSet::new(),
        }
    }

    pub fn public(message: impl Into<String>) -> Self {
        Self::new(message, Visibility::Public)
    }

    /// Private to every holder of `role`.
    pub fn to_role(message: impl Into<String>, role: Role) -> Self {
        Self::new(message, Visibility::Private).roles(role.as_set())
    }

    /// Private to one seat holding `role`.
    pub fn to_player(message: impl Into<String>, player: PlayerId, role: Role) -> Self {
        Self::new(message, Visibility::Private)
            .roles(role.as_set())
            .player(player)
    }

    pub fn system(message: impl Into<String>) -> Self {
        Self::new(message, Visibility::System).category(LogCategory::Debug)
    }

    pub fn ui_only(message: impl Into<String>) -> Self {
        Self::new(message, Visibility::UiOnly)
    }

    pub fn ai_only(message: impl Into<String>) -> Self {
        Self::new(message, Visibility::AiOnly)
    }

    #[must_use]
    pub fn kind(mut self, kind: LogKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn category(mut self, category: LogCategory) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn roles(mut self, roles: RoleSet) -> Self {
        self.visible_to_roles |= roles;
        self
    }

    #[must_use]
    pub fn player(mut self, player: PlayerId) -> Self {
        self.visible_to_players.insert(player);
        self
    }
}
