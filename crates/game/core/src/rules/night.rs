use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::{DeathCause, Player, PlayerId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Death {
    pub player: PlayerId,
    pub cause: DeathCause,
}

/// Result of resolving one night.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NightOutcome {
    pub deaths: ArrayVec<Death, { GameConfig::MAX_NIGHT_DEATHS }>,
    pub blocked_by_guard: Option<PlayerId>,
    pub blocked_by_witch: Option<PlayerId>,
}

impl NightOutcome {
    pub fn dead_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.deaths.iter().map(|d| d.player)
    }
}

/// Computes and applies the deaths of one night.
///
/// A protected victim survives the attack, then a healed one. A poisoned
/// player dies by poison, replacing any werewolf death of the same seat, so
/// nobody dies twice. All deaths are applied together after the decision.
pub fn resolve_night(
    players: &mut [Player],
    werewolf_target: Option<PlayerId>,
    poison_target: Option<PlayerId>,
) -> NightOutcome {
    let mut outcome = NightOutcome::default();

    if let Some(target) = werewolf_target.filter(|id| is_alive(players, *id)) {
        let victim = &players[target.index()];
        if victim.is_protected {
            outcome.blocked_by_guard = Some(target);
        } else if victim.is_healed_by_witch {
            outcome.blocked_by_witch = Some(target);
        } else {
            outcome.deaths.push(Death {
                player: target,
                cause: DeathCause::Werewolf,
            });
        }
    }

    if let Some(target) = poison_target.filter(|id| is_alive(players, *id)) {
        outcome.deaths.retain(|d| d.player != target);
        outcome.deaths.push(Death {
            player: target,
            cause: DeathCause::Poison,
        });
    }

    for death in &outcome.deaths {
        players[death.player.index()].kill();
    }
    outcome
}

fn is_alive(players: &[Player], id: PlayerId) -> bool {
    players.get(id.index()).is_some_and(|p| p.is_alive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Role;

    fn table() -> Vec<Player> {
        (0..8)
            .map(|i| Player::new(PlayerId(i), Role::Villager, i == 0))
            .collect()
    }

    #[test]
    fn guard_protection_blocks_attack() {
        let mut players = table();
        players[5].is_protected = true;
        let outcome = resolve_night(&mut players, Some(PlayerId(5)), None);
        assert!(outcome.deaths.is_empty());
        assert_eq!(outcome.blocked_by_guard, Some(PlayerId(5)));
        assert!(players[5].is_alive);
    }

    #[test]
    fn witch_heal_blocks_attack() {
        let mut players = table();
        players[4].is_healed_by_witch = true;
        let outcome = resolve_night(&mut players, Some(PlayerId(4)), None);
        assert!(outcome.deaths.is_empty());
        assert_eq!(outcome.blocked_by_witch, Some(PlayerId(4)));
        assert_eq!(outcome.blocked_by_guard, None);
    }

    #[test]
    fn guard_takes_precedence_over_heal() {
        let mut players = table();
        players[4].is_protected = true;
        players[4].is_healed_by_witch = true;
        let outcome = resolve_night(&mut players, Some(PlayerId(4)), None);
        assert_eq!(outcome.blocked_by_guard, Some(PlayerId(4)));
        assert_eq!(outcome.blocked_by_witch, None);
    }

    #[test]
    fn poisoned_and_attacked_player_dies_once() {
        let mut players = table();
        let outcome = resolve_night(&mut players, Some(PlayerId(3)), Some(PlayerId(3)));
        assert_eq!(
            outcome.deaths.as_slice(),
            &[Death {
                player: PlayerId(3),
                cause: DeathCause::Poison
            }]
        );
        assert!(!players[3].is_alive);
        assert_eq!(players[3].revealed_role, Some(Role::Villager));
    }

    #[test]
    fn poison_ignores_protection() {
        let mut players = table();
        players[6].is_protected = true;
        let outcome = resolve_night(&mut players, Some(PlayerId(2)), Some(PlayerId(6)));
        let dead: Vec<_> = outcome.dead_ids().collect();
        assert_eq!(dead, vec![PlayerId(2), PlayerId(6)]);
    }

    #[test]
    fn dead_or_missing_targets_are_ignored() {
        let mut players = table();
        players[1].kill();
        let outcome = resolve_night(&mut players, Some(PlayerId(1)), Some(PlayerId(42)));
        assert_eq!(outcome, NightOutcome::default());
    }
}
