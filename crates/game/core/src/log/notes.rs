//! Writers for the messages whose audience is fixed by the rules.
//!
//! Night choices only ever reach the seat or role that made them; what the
//! whole table hears about a death is the name and nothing else.
use super::{LogCategory, LogDraft, LogEntry, LogKind, VisibilityLog};
use crate::state::{PlayerId, Role, RoundRecord};

impl VisibilityLog {
    /// Tells the pack who its members are. Written once when the game is dealt.
    pub fn werewolf_team(&mut self, team: &[PlayerId]) -> &LogEntry {
        let names = join_players(team);
        self.append(
            LogDraft::to_role(format!("The werewolf team is: {names}."), Role::Werewolf)
                .category(LogCategory::RoleInfo),
        )
    }

    pub fn werewolf_kill(&mut self, target: PlayerId) -> &LogEntry {
        self.append(
            LogDraft::to_role(
                format!("The werewolves chose to attack Player {target}."),
                Role::Werewolf,
            )
            .category(LogCategory::NightActions),
        )
    }

    pub fn guard_protect(&mut self, guard: PlayerId, target: PlayerId) -> &LogEntry {
        self.append(
            LogDraft::to_player(
                format!("You protected Player {target} tonight."),
                guard,
                Role::Guard,
            )
            .category(LogCategory::NightActions),
        )
    }

    pub fn guard_blocked(&mut self, guard: Option<PlayerId>, target: PlayerId) -> &LogEntry {
        let draft = LogDraft::to_role(
            format!("Your protection saved Player {target} from the werewolves."),
            Role::Guard,
        );
        self.append(scope(draft, guard).category(LogCategory::NightActions))
    }

    pub fn seer_check(&mut self, seer: PlayerId, target: PlayerId, role: Role) -> &LogEntry {
        let verdict = if role.is_werewolf() {
            "a werewolf"
        } else {
            "not a werewolf"
        };
        self.append(
            LogDraft::to_player(
                format!("Your vision reveals that Player {target} is {verdict} (role: {role})."),
                seer,
                Role::Seer,
            )
            .category(LogCategory::NightActions),
        )
    }

    /// Tells the witch who was attacked before she decides on the antidote.
    pub fn witch_briefing(&mut self, witch: PlayerId, victim: PlayerId) -> &LogEntry {
        self.append(
            LogDraft::to_player(
                format!("Tonight the werewolves attacked Player {victim}."),
                witch,
                Role::Witch,
            )
            .category(LogCategory::RoleInfo),
        )
    }

    pub fn witch_save(&mut self, witch: PlayerId, target: PlayerId) -> &LogEntry {
        self.append(
            LogDraft::to_player(
                format!("You used the antidote on Player {target}."),
                witch,
                Role::Witch,
            )
            .category(LogCategory::NightActions),
        )
    }

    pub fn witch_poison(&mut self, witch: PlayerId, target: PlayerId) -> &LogEntry {
        self.append(
            LogDraft::to_player(
                format!("You poisoned Player {target}."),
                witch,
                Role::Witch,
            )
            .category(LogCategory::NightActions),
        )
    }

    pub fn witch_blocked(&mut self, witch: Option<PlayerId>, target: PlayerId) -> &LogEntry {
        let draft = LogDraft::to_role(
            format!("Your antidote saved Player {target}."),
            Role::Witch,
        );
        self.append(scope(draft, witch).category(LogCategory::NightActions))
    }

    /// Public morning announcement. Never states how anyone died.
    pub fn night_deaths(&mut self, deaths: &[PlayerId]) -> &LogEntry {
        let message = match deaths {
            [] => "Last night was peaceful. No one died.".to_string(),
            [one] => format!("Last night, Player {one} died."),
            many => format!("Last night, {} died.", join_players(many)),
        };
        self.append(LogDraft::public(message).category(LogCategory::Deaths))
    }

    /// Public reveal of a dead player's role.
    pub fn role_revealed(&mut self, player: PlayerId, role: Role) -> &LogEntry {
        self.append(
            LogDraft::public(format!("Player {player} was a {role}."))
                .category(LogCategory::Deaths),
        )
    }

    pub fn vote_cast(&mut self, voter: PlayerId, target: Option<PlayerId>, kind: LogKind) -> &LogEntry {
        let message = match target {
            Some(target) => format!("Player {voter} votes for Player {target}."),
            None => format!("Player {voter} abstains."),
        };
        self.append(
            LogDraft::public(message)
                .kind(kind)
                .category(LogCategory::Voting),
        )
    }

    pub fn round_summary(&mut self, record: &RoundRecord) -> &LogEntry {
        let night = if record.night_deaths.is_empty() {
            "no one died at night".to_string()
        } else {
            format!("{} died at night", join_players(&record.night_deaths))
        };
        let day = match record.eliminated {
            Some(player) => format!("Player {player} was voted out"),
            None => "no one was voted out".to_string(),
        };
        let mut message = format!("Round {} summary: {night}; {day}", record.round);
        if let Some(shot) = record.hunter_shot {
            message.push_str(&format!("; the hunter shot Player {shot}"));
        }
        message.push('.');
        self.append(LogDraft::public(message).category(LogCategory::RoundSummary))
    }
}

fn scope(draft: LogDraft, seat: Option<PlayerId>) -> LogDraft {
    match seat {
        Some(seat) => draft.player(seat),
        None => draft,
    }
}

fn join_players(players: &[PlayerId]) -> String {
    players
        .iter()
        .map(|p| format!("Player {p}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::Visibility;

    #[test]
    fn werewolf_kill_is_pack_private() {
        let mut log = VisibilityLog::new(PlayerId(0));
        let entry = log.werewolf_kill(PlayerId(5)).clone();
        assert_eq!(entry.visibility, Visibility::Private);
        assert!(entry.visible_to_players.is_empty());
        assert!(log.for_ui(PlayerId(1), Role::Werewolf).contains(&&entry));
        assert!(!log.for_ui(PlayerId(1), Role::Seer).contains(&&entry));
    }

    #[test]
    fn death_announcement_hides_mechanism() {
        let mut log = VisibilityLog::new(PlayerId(0));
        let entry = log.night_deaths(&[PlayerId(5)]).clone();
        assert_eq!(entry.visibility, Visibility::Public);
        assert_eq!(entry.message, "Last night, Player 5 died.");
        for word in ["werewol", "poison", "attack", "guard", "witch"] {
            assert!(!entry.message.to_lowercase().contains(word));
        }
    }

    #[test]
    fn seer_result_reaches_only_that_seat() {
        let mut log = VisibilityLog::new(PlayerId(0));
        let entry = log.seer_check(PlayerId(2), PlayerId(6), Role::Werewolf).clone();
        assert!(entry.message.contains("is a werewolf"));
        assert!(log.for_ui(PlayerId(2), Role::Seer).contains(&&entry));
        assert!(!log.for_ui(PlayerId(3), Role::Seer).contains(&&entry));
    }
}
