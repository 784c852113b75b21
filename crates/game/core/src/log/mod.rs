//! Append-only game log with per-entry visibility.
//!
//! Every message the game produces lands here exactly once. Readers never
//! see the raw list; they ask for a view:
//!
//! - [`VisibilityLog::for_ui`] filters for one seat at the table,
//! - [`VisibilityLog::for_decision_context`] is the full history an AI
//!   player of a given role is entitled to when deciding.
//!
//! The role-scoped writers in [`notes`] encode who learns what at night.
mod entry;
pub mod notes;

use chrono::Utc;

pub use entry::{LogCategory, LogDraft, LogEntry, LogKind, Visibility};

use crate::state::{PlayerId, Role};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibilityLog {
    human: Option<PlayerId>,
    entries: Vec<LogEntry>,
    next_id: u64,
}

impl VisibilityLog {
    pub fn new(human: PlayerId) -> Self {
        Self {
            human: Some(human),
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Stores the draft under the next id and returns the stored entry.
    pub fn append(&mut self, draft: LogDraft) -> &LogEntry {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.entries.push(LogEntry {
            id,
            message: draft.message,
            kind: draft.kind,
            category: draft.category,
            visibility: draft.visibility,
            visible_to_roles: draft.visible_to_roles,
            visible_to_players: draft.visible_to_players,
            timestamp: Utc::now(),
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Entries appended after the entry with id `after`.
    pub fn since(&self, after: u64) -> &[LogEntry] {
        let start = self.entries.partition_point(|e| e.id <= after);
        &self.entries[start..]
    }

    /// Drops every entry and restarts ids at 1.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_id = 1;
    }

    fn is_human(&self, player: PlayerId) -> bool {
        self.human == Some(player)
    }

    /// Whether `player` holding `role` may see `entry` at the table.
    pub fn visible_to(&self, entry: &LogEntry, player: PlayerId, role: Role) -> bool {
        match entry.visibility {
            Visibility::Public => true,
            Visibility::Private => entry.admits(player, role),
            Visibility::UiOnly => self.is_human(player),
            Visibility::AiOnly => !self.is_human(player),
            Visibility::System => false,
        }
    }

    /// Entries the given seat may read, in creation order.
    pub fn for_ui(&self, player: PlayerId, role: Role) -> Vec<&LogEntry> {
        self.entries
            .iter()
            .filter(|entry| self.visible_to(entry, player, role))
            .collect()
    }

    /// Full history available to an AI player of `role`, in creation order.
    ///
    /// Private entries are matched on role only, so seat-scoped notes reach
    /// the role holder regardless of seat.
    pub fn for_decision_context(&self, role: Role) -> Vec<&LogEntry> {
        self.entries
            .iter()
            .filter(|entry| match entry.visibility {
                Visibility::Public | Visibility::AiOnly => true,
                Visibility::Private => entry.visible_to_roles.admits(role),
                Visibility::System | Visibility::UiOnly => false,
            })
            .collect()
    }

    /// Entries of one category that the given seat may read.
    pub fn by_category(
        &self,
        category: LogCategory,
        player: PlayerId,
        role: Role,
    ) -> Vec<&LogEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.category == category)
            .filter(|entry| self.visible_to(entry, player, role))
            .collect()
    }
}
